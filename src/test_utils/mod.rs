//! Test utilities for framework-chunks
//!
//! Helpers for building throwaway `node_modules` trees and for enabling log
//! output in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use framework_chunks::test_utils::PackageTree;
//!
//! let tree = PackageTree::new().unwrap();
//! tree.install("react", r#"{ "dependencies": { "loose-envify": "^1.1.0" } }"#).unwrap();
//! tree.install("loose-envify", "{}").unwrap();
//! ```

pub mod package_tree;

pub use package_tree::PackageTree;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=framework_chunks=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
