//! Node-style package lookup.
//!
//! Finds the `package.json` of a named package the way
//! `require.resolve("<name>/package.json", { paths: [from] })` does: the
//! `node_modules` folder of `from` and of every ancestor is tried, nearest first,
//! and the first folder containing `<name>/package.json` wins. Because the search
//! starts from the importer's own directory, nested (private) copies of a package
//! are found before hoisted ones.
//!
//! A failed lookup is a [`LookupMiss`], never a hard error: the resolver uses the
//! variant only to explain why a branch was dropped.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::PackageManifest;
use crate::constants::{NODE_MODULES, PACKAGE_MANIFEST};
use crate::utils::paths::strip_verbatim_prefix;

/// A package whose manifest was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedPackage {
    /// Package name that was looked up
    pub name: String,
    /// Absolute path of the package's `package.json`
    pub manifest_path: PathBuf,
}

impl LocatedPackage {
    /// The package root directory (the manifest's parent).
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.manifest_path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }
}

/// Why a package could not be located.
#[derive(Debug, Error)]
pub enum LookupMiss {
    /// The name cannot be a package name (empty, relative or absolute path)
    #[error("'{name}' is not a valid package name")]
    InvalidName {
        /// Rejected name
        name: String,
    },

    /// No `node_modules` folder above the start directory contains the package
    #[error("package '{name}' is not installed in any node_modules above {}", from.display())]
    NotInstalled {
        /// Package name
        name: String,
        /// Directory the lookup started from
        from: PathBuf,
    },

    /// The package's `exports` map does not expose `./package.json`
    #[error("package '{name}' does not export ./package.json ({})", manifest.display())]
    NotExported {
        /// Package name
        name: String,
        /// Manifest that was found
        manifest: PathBuf,
    },

    /// The manifest was found but is not valid JSON
    #[error("manifest of '{name}' at {} is not valid JSON: {source}", manifest.display())]
    InvalidManifest {
        /// Package name
        name: String,
        /// Manifest that was found
        manifest: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem error while resolving or reading the manifest
    #[error("failed to access {} while locating '{name}': {source}", path.display())]
    Io {
        /// Package name
        name: String,
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Reason category of a [`LookupMiss`], cheap to copy into reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissKind {
    /// See [`LookupMiss::InvalidName`]
    InvalidName,
    /// See [`LookupMiss::NotInstalled`]
    NotInstalled,
    /// See [`LookupMiss::NotExported`]
    NotExported,
    /// See [`LookupMiss::InvalidManifest`]
    InvalidManifest,
    /// See [`LookupMiss::Io`]
    Io,
}

impl LookupMiss {
    /// The reason category of this miss.
    #[must_use]
    pub const fn kind(&self) -> MissKind {
        match self {
            Self::InvalidName { .. } => MissKind::InvalidName,
            Self::NotInstalled { .. } => MissKind::NotInstalled,
            Self::NotExported { .. } => MissKind::NotExported,
            Self::InvalidManifest { .. } => MissKind::InvalidManifest,
            Self::Io { .. } => MissKind::Io,
        }
    }
}

/// Resolves a package name to its manifest, relative to a directory.
///
/// Implementations must be deterministic for a fixed filesystem state; the
/// resolver's output order depends on it.
pub trait PackageLocator {
    /// Locate the manifest of `name` as seen from `from`.
    fn locate(&self, name: &str, from: &Path) -> Result<LocatedPackage, LookupMiss>;
}

/// Options of the filesystem lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupOptions {
    /// Fail the lookup when the package's `exports` map hides `./package.json`.
    pub respect_exports: bool,
    /// Keep symlinked package paths as found instead of resolving them.
    pub preserve_symlinks: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            respect_exports: true,
            preserve_symlinks: false,
        }
    }
}

/// [`PackageLocator`] walking `node_modules` folders on disk.
#[derive(Debug, Clone, Default)]
pub struct NodeModulesLocator {
    options: LookupOptions,
}

impl NodeModulesLocator {
    /// Create a locator with the given options.
    #[must_use]
    pub const fn new(options: LookupOptions) -> Self {
        Self {
            options,
        }
    }

    /// The `node_modules` folders searched from `from`, nearest first.
    ///
    /// An ancestor that is itself a `node_modules` folder contributes no
    /// `node_modules/node_modules` candidate.
    #[must_use]
    pub fn search_paths(from: &Path) -> Vec<PathBuf> {
        from.ancestors()
            .filter(|dir| dir.file_name().is_none_or(|name| name != NODE_MODULES))
            .map(|dir| dir.join(NODE_MODULES))
            .collect()
    }

    fn check_exports(&self, name: &str, manifest: &Path) -> Result<(), LookupMiss> {
        let content = std::fs::read_to_string(manifest).map_err(|source| LookupMiss::Io {
            name: name.to_string(),
            path: manifest.to_path_buf(),
            source,
        })?;
        let parsed =
            PackageManifest::from_json(&content).map_err(|source| LookupMiss::InvalidManifest {
                name: name.to_string(),
                manifest: manifest.to_path_buf(),
                source,
            })?;
        if parsed.exposes_manifest() {
            Ok(())
        } else {
            Err(LookupMiss::NotExported {
                name: name.to_string(),
                manifest: manifest.to_path_buf(),
            })
        }
    }
}

/// Whether `name` can be joined under a `node_modules` folder safely.
///
/// Accepts `name` and `@scope/name`; rejects paths and traversal segments.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    if name.is_empty() || name.contains('\\') {
        return false;
    }
    let segments: Vec<&str> = name.split('/').collect();
    let segment_ok = |s: &str| !s.is_empty() && s != "." && s != ".." && !s.starts_with('.');
    match segments.as_slice() {
        [single] => segment_ok(single) && !single.starts_with('@'),
        [scope, pkg] => scope.len() > 1 && scope.starts_with('@') && segment_ok(&scope[1..]) && segment_ok(pkg),
        _ => false,
    }
}

impl PackageLocator for NodeModulesLocator {
    fn locate(&self, name: &str, from: &Path) -> Result<LocatedPackage, LookupMiss> {
        if !is_valid_package_name(name) {
            return Err(LookupMiss::InvalidName {
                name: name.to_string(),
            });
        }

        let from = std::path::absolute(from).map_err(|source| LookupMiss::Io {
            name: name.to_string(),
            path: from.to_path_buf(),
            source,
        })?;

        let Some(found) = Self::search_paths(&from)
            .into_iter()
            .map(|dir| dir.join(name).join(PACKAGE_MANIFEST))
            .find(|candidate| candidate.is_file())
        else {
            return Err(LookupMiss::NotInstalled {
                name: name.to_string(),
                from,
            });
        };

        let manifest_path = if self.options.preserve_symlinks {
            found
        } else {
            let real = std::fs::canonicalize(&found).map_err(|source| LookupMiss::Io {
                name: name.to_string(),
                path: found.clone(),
                source,
            })?;
            strip_verbatim_prefix(real)
        };

        if self.options.respect_exports {
            self.check_exports(name, &manifest_path)?;
        }

        Ok(LocatedPackage {
            name: name.to_string(),
            manifest_path,
        })
    }
}
