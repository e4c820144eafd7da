//! framework-chunks - isolate framework packages into their own chunk
//!
//! A web application's framework code (React and everything React pulls in)
//! changes far less often than application code. Emitting it as a separate
//! chunk with a stable name lets browsers keep it cached across deployments.
//! This crate computes which files belong in that chunk and expresses the rule
//! as a split-chunks cache group.
//!
//! # Architecture Overview
//!
//! A production build goes through two steps:
//!
//! 1. **Resolution**: the [`resolver`] walks the `package.json` dependency
//!    graph from the framework root packages, looking each package up the way
//!    Node's `require.resolve` does, and collects the root directory of every
//!    package it reaches into a [`resolver::FrameworkPathSet`].
//! 2. **Classification**: the [`chunks`] module turns that set into a module
//!    predicate and registers it as the `framework` cache group (priority 40,
//!    enforced) ahead of the default `vendors` and `default` groups.
//!
//! Development builds skip both steps; the framework group then matches
//! nothing.
//!
//! # Core Modules
//!
//! - [`resolver`] - Transitive framework path resolution and its report
//! - [`chunks`] - Module classification, cache groups and chunk planning
//! - [`manifest`] - `package.json` reading and Node-style package lookup
//! - [`config`] - Build mode and `framework-chunks.toml` handling
//! - [`context`] - One build's resolved paths and policy
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-facing error formatting
//! - [`utils`] - Path helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use framework_chunks::chunks::{ChunkOptions, SplitChunksPolicy};
//! use framework_chunks::manifest::LookupOptions;
//! use framework_chunks::resolver::FrameworkPathResolver;
//! use std::path::Path;
//!
//! let resolver = FrameworkPathResolver::with_options(LookupOptions::default());
//! let paths = resolver.resolve(&["react", "react-dom"], Path::new("."));
//! let policy = SplitChunksPolicy::for_framework(paths, &ChunkOptions::default());
//! for group in policy.groups() {
//!     println!("{} (priority {})", group.name, group.priority);
//! }
//! ```

pub mod chunks;
pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod core;
pub mod manifest;
pub mod resolver;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
