//! Path utilities for prefix construction, normalization and discovery.
//!
//! Framework path prefixes are compared against module resource paths as plain
//! strings, so the helpers here decide the exact textual form of a directory:
//! lossy UTF-8, no Windows verbatim prefix, and a trailing separator.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Render a directory as a prefix string ending in the platform separator.
///
/// The trailing separator keeps `.../react/` from matching `.../react-slider/...`.
///
/// # Examples
///
/// ```rust
/// use framework_chunks::utils::paths::dir_prefix;
/// use std::path::Path;
///
/// # #[cfg(unix)]
/// assert_eq!(dir_prefix(Path::new("/proj/node_modules/react")), "/proj/node_modules/react/");
/// # #[cfg(unix)]
/// assert_eq!(dir_prefix(Path::new("/proj/node_modules/react/")), "/proj/node_modules/react/");
/// ```
#[must_use]
pub fn dir_prefix(dir: &Path) -> String {
    let mut prefix = dir.to_string_lossy().into_owned();
    if !prefix.ends_with(MAIN_SEPARATOR) {
        prefix.push(MAIN_SEPARATOR);
    }
    prefix
}

/// Remove the `\\?\` verbatim prefix that `canonicalize` adds on Windows.
///
/// Bundlers report resource paths without it, so prefixes must not carry it
/// either. Paths without the prefix, and all paths on other platforms, are
/// returned unchanged.
#[must_use]
pub fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    #[cfg(windows)]
    {
        let text = path.to_string_lossy();
        if let Some(rest) = text.strip_prefix(r"\\?\UNC\") {
            return PathBuf::from(format!(r"\\{rest}"));
        }
        if let Some(rest) = text.strip_prefix(r"\\?\") {
            return PathBuf::from(rest);
        }
    }
    path
}

/// Normalizes a path by resolving `.` and `..` components.
///
/// This is a logical operation: the filesystem is not consulted and symbolic
/// links are not followed.
///
/// # Examples
///
/// ```rust
/// use framework_chunks::utils::paths::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// let path = Path::new("/foo/./bar/../baz");
/// assert_eq!(normalize_path(path), PathBuf::from("/foo/baz"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            std::path::Component::CurDir => {} // Skip .
            std::path::Component::ParentDir => {
                components.pop(); // Remove previous component for ..
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Search `start` and its ancestors for a file called `file_name`.
///
/// Returns the first match, nearest first, or `None` after reaching the
/// filesystem root.
#[must_use]
pub fn find_file_upwards(start: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !current.pop() {
            return None;
        }
    }
}
