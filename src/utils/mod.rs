//! Cross-platform utilities
//!
//! - [`paths`] - Prefix rendering, normalization and upward file discovery

pub mod paths;

pub use paths::{dir_prefix, find_file_upwards, normalize_path};
