//! Global constants used throughout the framework-chunks codebase.
//!
//! Names of files and directories the lookup touches, and the defaults of the
//! framework cache group, are defined here so the resolver, the chunk policy and
//! the command layer agree on them.

/// Package manifest file name looked up inside each package directory.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Directory holding installed packages at each level of the lookup.
pub const NODE_MODULES: &str = "node_modules";

/// Project configuration file searched for from the working directory upward.
pub const CONFIG_FILE_NAME: &str = "framework-chunks.toml";

/// Environment variable selecting the build mode, as in Node tooling.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Value of [`NODE_ENV_VAR`] that selects a production build.
pub const PRODUCTION_NODE_ENV: &str = "production";

/// Framework packages isolated when the configuration names none.
pub const DEFAULT_FRAMEWORK_PACKAGES: &[&str] = &["react", "react-dom"];

/// Name of the chunk holding framework modules.
pub const FRAMEWORK_CHUNK_NAME: &str = "framework";

/// Priority of the framework cache group.
///
/// Must stay above [`VENDORS_PRIORITY`] and [`DEFAULT_GROUP_PRIORITY`] so framework
/// modules are claimed before the default groups see them.
pub const FRAMEWORK_PRIORITY: i32 = 40;

/// Name of the default group for other `node_modules` code.
pub const VENDORS_CHUNK_NAME: &str = "vendors";

/// Priority of the default vendors group.
pub const VENDORS_PRIORITY: i32 = -10;

/// Name of the default group for modules shared between chunks.
pub const DEFAULT_GROUP_NAME: &str = "default";

/// Priority of the default shared-module group.
pub const DEFAULT_GROUP_PRIORITY: i32 = -20;

/// Minimum number of origin chunks for the default shared-module group.
pub const DEFAULT_GROUP_MIN_CHUNKS: usize = 2;

/// Minimum total size in bytes before a non-enforced group becomes a chunk.
pub const DEFAULT_MIN_SIZE: u64 = 20_000;

/// Name of the separate runtime chunk.
pub const RUNTIME_CHUNK_NAME: &str = "runtime";

/// Chunk a module falls back to when it reports no origin chunk.
pub const MAIN_CHUNK_NAME: &str = "main";
