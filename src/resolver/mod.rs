//! Framework dependency path resolution.
//!
//! Starting from a few framework root packages, the resolver walks the implicit
//! dependency graph described by installed `package.json` files and records the
//! root directory of every package it reaches. The result, a
//! [`FrameworkPathSet`], is what the chunk classifier matches module paths
//! against.
//!
//! # Algorithm
//!
//! Depth-first, in declaration order:
//!
//! 1. A package name already visited is skipped. This breaks cycles and means a
//!    package reachable along several paths is explored once, from the first
//!    path that reached it.
//! 2. The package is looked up relative to the directory of its importer (the
//!    start directory for roots). A lookup miss ends the branch silently.
//! 3. The package directory is recorded unless already present; a directory seen
//!    before ends the branch, which also catches different names resolving to the
//!    same place.
//! 4. Each declared dependency is visited relative to the package directory, so
//!    nested private copies win over hoisted ones.
//!
//! Nothing here fails: missing packages and unreadable manifests shrink the
//! result instead, because framework isolation is an optimisation and must not
//! break a build on machines where the packages live elsewhere.
//!
//! # Known limitation
//!
//! Visitation is keyed on the package name only. When two importers resolve the
//! same name to different installed copies, only the first copy's directory and
//! subtree are recorded.
//!
//! # Examples
//!
//! ```rust,no_run
//! use framework_chunks::manifest::LookupOptions;
//! use framework_chunks::resolver::FrameworkPathResolver;
//! use std::path::Path;
//!
//! let resolver = FrameworkPathResolver::with_options(LookupOptions::default());
//! let paths = resolver.resolve(&["react", "react-dom"], Path::new("."));
//! for prefix in &paths {
//!     println!("{prefix}");
//! }
//! ```

pub mod path_set;

pub use path_set::FrameworkPathSet;

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::manifest::{
    LookupOptions, ManifestReader, MissKind, NodeModulesLocator, PackageJsonReader, PackageLocator,
};
use crate::utils::dir_prefix;

/// A recorded framework package directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    /// Package name the directory was reached through
    pub package: String,
    /// Directory prefix added to the path set
    pub directory: String,
    /// Package whose manifest declared this one; `None` for roots
    pub introduced_by: Option<String>,
}

/// A package whose lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissRecord {
    /// Package name
    pub package: String,
    /// Directory the lookup started from
    pub from: PathBuf,
    /// Reason category
    pub kind: MissKind,
    /// Human-readable reason
    pub message: String,
}

/// A located package whose dependencies could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableManifest {
    /// Package name
    pub package: String,
    /// Manifest path
    pub manifest: PathBuf,
    /// Human-readable reason
    pub message: String,
}

/// Everything one resolution observed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveReport {
    /// The framework directory prefixes
    pub paths: FrameworkPathSet,
    /// One entry per prefix, in the same order
    pub entries: Vec<ResolvedEntry>,
    /// Packages that could not be located
    pub misses: Vec<MissRecord>,
    /// Located packages treated as having no dependencies
    pub unreadable: Vec<UnreadableManifest>,
}

/// Per-call traversal state.
///
/// Created fresh by every resolution so a resolver can be reused and shared.
#[derive(Debug, Default)]
struct TraversalState {
    visited: HashSet<String>,
    report: ResolveReport,
}

/// Resolves framework root packages to their transitive directory footprint.
///
/// Generic over the lookup and manifest collaborators; the defaults use the
/// filesystem.
#[derive(Debug, Clone, Default)]
pub struct FrameworkPathResolver<L = NodeModulesLocator, R = PackageJsonReader> {
    locator: L,
    reader: R,
}

impl FrameworkPathResolver {
    /// Filesystem resolver with the given lookup options.
    #[must_use]
    pub fn with_options(options: LookupOptions) -> Self {
        Self::new(NodeModulesLocator::new(options), PackageJsonReader)
    }
}

impl<L: PackageLocator, R: ManifestReader> FrameworkPathResolver<L, R> {
    /// Create a resolver from its collaborators.
    pub const fn new(locator: L, reader: R) -> Self {
        Self {
            locator,
            reader,
        }
    }

    /// Resolve `roots` from `start_dir` and return the framework path set.
    pub fn resolve<S: AsRef<str>>(&self, roots: &[S], start_dir: &Path) -> FrameworkPathSet {
        self.resolve_with_report(roots, start_dir).paths
    }

    /// Resolve `roots` from `start_dir`, keeping the provenance of each entry and
    /// the reasons for every dropped branch.
    pub fn resolve_with_report<S: AsRef<str>>(&self, roots: &[S], start_dir: &Path) -> ResolveReport {
        let mut state = TraversalState::default();

        for root in roots {
            self.visit(&mut state, root.as_ref(), start_dir, None);
        }

        tracing::info!(
            "Resolved {} framework path(s) from {} root package(s) ({} lookup miss(es))",
            state.report.paths.len(),
            roots.len(),
            state.report.misses.len()
        );
        state.report
    }

    fn visit(&self, state: &mut TraversalState, name: &str, relative_to: &Path, parent: Option<&str>) {
        if !state.visited.insert(name.to_string()) {
            return;
        }

        let located = match self.locator.locate(name, relative_to) {
            Ok(located) => located,
            Err(miss) => {
                tracing::debug!(
                    "Skipping '{}' (from {}): {}",
                    name,
                    relative_to.display(),
                    miss
                );
                state.report.misses.push(MissRecord {
                    package: name.to_string(),
                    from: relative_to.to_path_buf(),
                    kind: miss.kind(),
                    message: miss.to_string(),
                });
                return;
            }
        };

        let Some(directory) = located.directory().map(Path::to_path_buf) else {
            tracing::debug!(
                "Skipping '{}': manifest {} has no parent directory",
                name,
                located.manifest_path.display()
            );
            return;
        };

        let prefix = dir_prefix(&directory);
        if !state.report.paths.insert(prefix.clone()) {
            tracing::debug!("Directory {} already recorded, not descending into '{}'", prefix, name);
            return;
        }
        tracing::debug!("Recorded '{}' at {}", name, prefix);
        state.report.entries.push(ResolvedEntry {
            package: name.to_string(),
            directory: prefix,
            introduced_by: parent.map(str::to_string),
        });

        let dependencies = match self.reader.dependency_names(&located.manifest_path) {
            Ok(names) => names,
            Err(e) => {
                tracing::debug!("Treating '{}' as a leaf: {}", name, e);
                state.report.unreadable.push(UnreadableManifest {
                    package: name.to_string(),
                    manifest: located.manifest_path.clone(),
                    message: e.to_string(),
                });
                Vec::new()
            }
        };

        for dependency in &dependencies {
            self.visit(state, dependency, &directory, Some(name));
        }
    }
}
