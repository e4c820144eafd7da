//! Integration test suite for framework-chunks
//!
//! End-to-end tests that run the binary against temporary `node_modules`
//! trees.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolve**: Framework path resolution (`resolve`)
//! - **classify**: Module classification (`classify`)
//! - **plan**: Chunk planning over module lists (`plan`)
//! - **config**: Configuration file, build mode and error reporting

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod classify;
mod config;
mod plan;
mod resolve;
