//! Temporary project directories with installed packages.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::{NODE_MODULES, PACKAGE_MANIFEST};

/// A temporary project root with a `node_modules` layout built on demand.
///
/// The root is canonicalized on creation so paths computed here compare equal
/// to the symlink-resolved paths the locator returns (macOS temp directories
/// live behind `/var -> /private/var`).
pub struct PackageTree {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root: PathBuf,
}

impl PackageTree {
    /// Create an empty project root.
    pub fn new() -> Result<Self> {
        // Logs show up when RUST_LOG is set
        super::init_test_logging(None);

        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let root = crate::utils::paths::strip_verbatim_prefix(
            temp_dir.path().canonicalize().context("Failed to canonicalize temp dir")?,
        );
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` (slash-separated) under the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        relative.split('/').filter(|s| !s.is_empty()).fold(self.root.clone(), |p, s| p.join(s))
    }

    /// Absolute path of the manifest inside the package directory `package_dir`.
    pub fn manifest_path(&self, package_dir: &str) -> PathBuf {
        self.path(package_dir).join(PACKAGE_MANIFEST)
    }

    /// Install `name` into the root `node_modules` with the given manifest text.
    pub fn install(&self, name: &str, manifest: &str) -> Result<PathBuf> {
        self.install_at("", name, manifest)
    }

    /// Install `name` into `<owner>/node_modules`, where `owner` is relative to
    /// the root (empty for the root itself).
    pub fn install_at(&self, owner: &str, name: &str, manifest: &str) -> Result<PathBuf> {
        let dir = name.split('/').fold(self.path(owner).join(NODE_MODULES), |p, s| p.join(s));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        std::fs::write(dir.join(PACKAGE_MANIFEST), manifest)
            .with_context(|| format!("Failed to write manifest in {}", dir.display()))?;
        Ok(dir)
    }

    /// Write an arbitrary file under the root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
