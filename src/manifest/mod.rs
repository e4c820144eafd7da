//! Package manifest (`package.json`) reading.
//!
//! The resolver needs exactly two things from a manifest: the names of the
//! package's direct `dependencies`, in document order, and whether the package's
//! `exports` map lets `./package.json` be resolved from outside the package. Both
//! live here, together with the lookup collaborator in [`locate`].
//!
//! Version constraints are parsed as opaque JSON and never interpreted.
//!
//! # Examples
//!
//! ```rust,no_run
//! use framework_chunks::manifest::{ManifestReader, PackageJsonReader};
//! use std::path::Path;
//!
//! let reader = PackageJsonReader;
//! match reader.dependency_names(Path::new("node_modules/react-dom/package.json")) {
//!     Ok(names) => println!("react-dom depends on {names:?}"),
//!     Err(e) => println!("treating as leaf: {e}"),
//! }
//! ```

pub mod locate;

pub use locate::{LocatedPackage, LookupMiss, LookupOptions, MissKind, NodeModulesLocator, PackageLocator};

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The subset of `package.json` this crate reads.
///
/// Every other field is ignored, whatever its type. `dependencies` and `exports`
/// are kept as raw JSON because their shapes vary between packages and are
/// validated lazily.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Mapping from dependency name to version constraint.
    #[serde(default)]
    pub dependencies: Option<Value>,
    /// Package entry-point map. `null` is treated as absent.
    #[serde(default)]
    pub exports: Option<Value>,
}

/// Failure to obtain the dependency names of a located package.
///
/// The resolver treats every variant as an empty dependency set.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        /// Manifest path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or not a JSON object
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        /// Manifest path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// `dependencies` is present but is not an object
    #[error("Manifest {path} has a non-object 'dependencies' field ({found})")]
    InvalidDependencies {
        /// Manifest path
        path: PathBuf,
        /// JSON type that was found instead
        found: &'static str,
    },
}

impl PackageManifest {
    /// Parse a manifest from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Names of the direct dependencies in document order.
    ///
    /// A missing or `null` field yields an empty list.
    pub fn dependency_names(&self, path: &Path) -> Result<Vec<String>, ManifestError> {
        match &self.dependencies {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Object(map)) => Ok(map.keys().cloned().collect()),
            Some(other) => Err(ManifestError::InvalidDependencies {
                path: path.to_path_buf(),
                found: json_type_name(other),
            }),
        }
    }

    /// Whether the package lets `<name>/package.json` be resolved from outside.
    ///
    /// Packages without an `exports` field expose every file.
    #[must_use]
    pub fn exposes_manifest(&self) -> bool {
        match &self.exports {
            None | Some(Value::Null) => true,
            Some(exports) => exports_expose_subpath(exports, "./package.json"),
        }
    }
}

/// Check whether an `exports` value maps `subpath` to a non-null target.
///
/// Strings, arrays and objects without `.`-prefixed keys only define the package
/// main entry (`.`), so they expose no other subpath. For subpath maps an exact
/// key wins; otherwise the most specific single-`*` pattern that matches is used
/// (longest text before the `*`, then longest key).
#[must_use]
pub fn exports_expose_subpath(exports: &Value, subpath: &str) -> bool {
    let Value::Object(map) = exports else {
        return false;
    };
    if !map.keys().any(|key| key.starts_with('.')) {
        return false;
    }

    if let Some(target) = map.get(subpath) {
        return !target.is_null();
    }

    let mut best: Option<(&str, &Value)> = None;
    for (key, target) in map {
        let Some(star) = key.find('*') else {
            continue;
        };
        if key[star + 1..].contains('*') {
            continue;
        }
        let (prefix, suffix) = (&key[..star], &key[star + 1..]);
        let matches = subpath.len() >= prefix.len() + suffix.len()
            && subpath.starts_with(prefix)
            && subpath.ends_with(suffix);
        if !matches {
            continue;
        }
        let more_specific = match best {
            None => true,
            Some((best_key, _)) => {
                let best_prefix = best_key.find('*').unwrap_or(best_key.len());
                prefix.len() > best_prefix
                    || (prefix.len() == best_prefix && key.len() > best_key.len())
            }
        };
        if more_specific {
            best = Some((key.as_str(), target));
        }
    }

    best.is_some_and(|(_, target)| !target.is_null())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Source of a package's direct dependency names.
///
/// The filesystem implementation is [`PackageJsonReader`]; tests substitute
/// in-memory graphs.
pub trait ManifestReader {
    /// Return the dependency names declared by the manifest at `manifest_path`.
    fn dependency_names(&self, manifest_path: &Path) -> Result<Vec<String>, ManifestError>;
}

/// Reads `dependencies` from `package.json` files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageJsonReader;

impl ManifestReader for PackageJsonReader {
    fn dependency_names(&self, manifest_path: &Path) -> Result<Vec<String>, ManifestError> {
        PackageManifest::load(manifest_path)?.dependency_names(manifest_path)
    }
}
