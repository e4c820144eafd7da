//! Core types for framework-chunks
//!
//! This module holds the error taxonomy shared by the command layer:
//! - [`ChunkError`] - Enumerated error types for configuration, input and I/O failures
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use framework_chunks::core::{ChunkError, user_friendly_error};
//!
//! let err = anyhow::Error::from(ChunkError::RootNotFound {
//!     path: "/does/not/exist".to_string(),
//! });
//! let friendly = user_friendly_error(err);
//! assert!(friendly.suggestion.is_some());
//! ```

pub mod error;

pub use error::{ChunkError, ErrorContext, user_friendly_error};
