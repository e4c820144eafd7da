//! Build configuration.
//!
//! A build is described by a [`BuildConfig`]: the build mode, the project root
//! that package lookup starts from, the framework packages to isolate, lookup
//! options and the chunk policy options. Values come from three layers, highest
//! precedence first:
//!
//! 1. command-line overrides ([`ConfigOverrides`])
//! 2. the project file `framework-chunks.toml` ([`ConfigFile`]), given explicitly
//!    or found by walking up from the working directory
//! 3. the environment (`NODE_ENV=production` selects a production build) and
//!    built-in defaults
//!
//! # Configuration Format
//!
//! ```toml
//! mode = "production"
//! root = "."
//! framework_packages = ["react", "react-dom"]
//!
//! [resolve]
//! respect_exports = true
//! preserve_symlinks = false
//!
//! [chunks]
//! framework_name = "framework"
//! framework_priority = 40
//! runtime_chunk = "runtime"
//! default_groups = true
//! min_size = 20000
//!
//! [[groups]]
//! name = "icons"
//! test = "[\\\\/]icons[\\\\/]"
//! priority = 10
//! enforce = true
//! ```
//!
//! Relative `root` values in the file are resolved against the file's directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;

use crate::chunks::{CacheGroup, ChunkOptions, ChunkScope};
use crate::constants::{CONFIG_FILE_NAME, DEFAULT_FRAMEWORK_PACKAGES, PRODUCTION_NODE_ENV};
use crate::core::ChunkError;
use crate::manifest::LookupOptions;
use crate::utils::{find_file_upwards, normalize_path};

/// Whether the build optimises for iteration speed or for output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Fast-iteration build; framework resolution is skipped
    #[default]
    Development,
    /// Production build; framework paths are resolved eagerly
    Production,
}

impl BuildMode {
    /// Mode implied by a `NODE_ENV` value: only `production` is a production build.
    #[must_use]
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some(PRODUCTION_NODE_ENV) => Self::Production,
            _ => Self::Development,
        }
    }

    /// Whether framework paths are resolved in this mode.
    #[must_use]
    pub const fn resolves_framework(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for BuildMode {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ChunkError::InvalidBuildMode {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// An extra pattern-based cache group declared in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Chunk name
    pub name: String,
    /// Regex matched against module resources
    pub test: String,
    /// Group priority
    #[serde(default)]
    pub priority: i32,
    /// Loading kinds the group may take
    #[serde(default)]
    pub scope: ChunkScope,
    /// Bypass size thresholds
    #[serde(default)]
    pub enforce: bool,
    /// Minimum total size; defaults to the chunk options' `min_size`
    #[serde(default)]
    pub min_size: Option<u64>,
}

impl GroupConfig {
    /// Compile into a [`CacheGroup`].
    pub fn to_cache_group(&self, default_min_size: u64) -> Result<CacheGroup, ChunkError> {
        CacheGroup::pattern(
            self.name.clone(),
            &self.test,
            self.priority,
            self.scope,
            self.enforce,
            self.min_size.unwrap_or(default_min_size),
        )
    }
}

/// Contents of `framework-chunks.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Build mode
    pub mode: Option<BuildMode>,
    /// Project root, relative to the file's directory
    pub root: Option<PathBuf>,
    /// Framework root packages
    pub framework_packages: Option<Vec<String>>,
    /// Lookup options
    pub resolve: LookupOptions,
    /// Chunk policy options
    pub chunks: ChunkOptions,
    /// Extra pattern groups
    pub groups: Vec<GroupConfig>,
}

impl ConfigFile {
    /// Parse configuration text.
    pub fn parse(content: &str, file: &Path) -> Result<Self, ChunkError> {
        toml::from_str(content).map_err(|e| ChunkError::ConfigParseError {
            file: file.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a configuration file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Ok(Self::parse(&content, path)?)
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Explicit configuration file; must exist when given
    pub config_path: Option<PathBuf>,
    /// Build mode
    pub mode: Option<BuildMode>,
    /// Project root, relative to the working directory
    pub root: Option<PathBuf>,
    /// Framework packages; replaces the configured list when non-empty
    pub packages: Vec<String>,
}

/// Fully resolved configuration of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Build mode
    pub mode: BuildMode,
    /// Absolute directory the package lookup starts from
    pub root: PathBuf,
    /// Framework root packages, in order
    pub framework_packages: Vec<String>,
    /// Lookup options
    pub lookup: LookupOptions,
    /// Chunk policy options
    pub chunks: ChunkOptions,
    /// Extra pattern groups
    pub groups: Vec<GroupConfig>,
    /// Configuration file that was used, if any
    pub source: Option<PathBuf>,
}

impl BuildConfig {
    /// Load the configuration for a build started in `cwd`.
    ///
    /// `node_env` is the value of `NODE_ENV`, passed in so callers and tests
    /// control it explicitly.
    pub async fn load(overrides: &ConfigOverrides, cwd: &Path, node_env: Option<&str>) -> Result<Self> {
        let source = match &overrides.config_path {
            Some(path) => {
                let path = absolutize(cwd, path);
                if !fs::try_exists(&path).await.unwrap_or(false) {
                    return Err(ChunkError::ConfigNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Some(path)
            }
            None => find_file_upwards(cwd, CONFIG_FILE_NAME),
        };

        let file = match &source {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                ConfigFile::load_from(path).await?
            }
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                ConfigFile::default()
            }
        };

        let config = Self::from_layers(file, source, overrides, cwd, node_env)?;
        if !fs::metadata(&config.root).await.map(|m| m.is_dir()).unwrap_or(false) {
            return Err(ChunkError::RootNotFound {
                path: config.root.display().to_string(),
            }
            .into());
        }
        Ok(config)
    }

    /// Merge the layers without touching the filesystem.
    pub fn from_layers(
        file: ConfigFile,
        source: Option<PathBuf>,
        overrides: &ConfigOverrides,
        cwd: &Path,
        node_env: Option<&str>,
    ) -> Result<Self, ChunkError> {
        let mode = overrides.mode.or(file.mode).unwrap_or_else(|| BuildMode::from_node_env(node_env));

        let file_dir = source.as_deref().and_then(Path::parent).map(Path::to_path_buf);
        let root = match (&overrides.root, &file.root, &file_dir) {
            (Some(root), _, _) => absolutize(cwd, root),
            (None, Some(root), Some(dir)) => absolutize(dir, root),
            (None, Some(root), None) => absolutize(cwd, root),
            (None, None, Some(dir)) => dir.clone(),
            (None, None, None) => cwd.to_path_buf(),
        };

        let framework_packages = if overrides.packages.is_empty() {
            file.framework_packages.unwrap_or_else(|| {
                DEFAULT_FRAMEWORK_PACKAGES.iter().map(|p| (*p).to_string()).collect()
            })
        } else {
            overrides.packages.clone()
        };

        let config = Self {
            mode,
            root,
            framework_packages,
            lookup: file.resolve,
            chunks: file.chunks,
            groups: file.groups,
            source,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot describe a working build.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if let Some(empty) = self.framework_packages.iter().find(|p| p.trim().is_empty()) {
            return Err(ChunkError::ConfigError {
                message: format!("framework package names must not be empty (got {empty:?})"),
            });
        }
        if self.chunks.framework_name.is_empty() {
            return Err(ChunkError::ConfigError {
                message: "chunks.framework_name must not be empty".to_string(),
            });
        }
        if self.chunks.runtime_chunk.as_deref() == Some(self.chunks.framework_name.as_str()) {
            return Err(ChunkError::ConfigError {
                message: format!(
                    "runtime chunk and framework chunk are both named '{}'",
                    self.chunks.framework_name
                ),
            });
        }
        for group in &self.groups {
            if group.name.is_empty() {
                return Err(ChunkError::ConfigError {
                    message: "cache group names must not be empty".to_string(),
                });
            }
            if group.name == self.chunks.framework_name {
                return Err(ChunkError::ConfigError {
                    message: format!("cache group '{}' shadows the framework chunk", group.name),
                });
            }
        }
        Ok(())
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}
