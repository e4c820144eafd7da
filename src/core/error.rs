//! Error handling for framework-chunks
//!
//! This module provides the error types and the user-facing error rendering used by
//! the command-line front end. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions on the terminal
//!
//! # Architecture
//!
//! - [`ChunkError`] - Enumerated failure cases of configuration, input and I/O handling
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! Resolution itself never produces a [`ChunkError`]: package lookup misses and
//! unreadable manifests are folded into the traversal (see [`crate::resolver`]), so a
//! build degrades to "no framework isolation" instead of failing.
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use framework_chunks::core::{ChunkError, ErrorContext, user_friendly_error};
//!
//! fn load() -> Result<(), ChunkError> {
//!     Err(ChunkError::ConfigNotFound {
//!         path: "framework-chunks.toml".to_string(),
//!     })
//! }
//!
//! if let Err(e) = load() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for framework-chunks operations
///
/// Each variant names one failure mode of the command layer. Variants carry the
/// path or value involved so that [`user_friendly_error`] can produce a targeted
/// suggestion.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the configuration file that was not found
        path: String,
    },

    /// Configuration file has invalid syntax or structure
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the configuration file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration values are inconsistent or out of range
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Unknown build mode string
    #[error("Invalid build mode '{value}' (expected 'development' or 'production')")]
    InvalidBuildMode {
        /// The rejected value
        value: String,
    },

    /// Cache group test pattern does not compile
    #[error("Invalid pattern '{pattern}' for cache group '{group}'")]
    InvalidPattern {
        /// Name of the cache group declaring the pattern
        group: String,
        /// The pattern source
        pattern: String,
        /// Reason reported by the regex compiler
        reason: String,
    },

    /// Module list supplied to the planner could not be parsed
    #[error("Invalid module list in {file}")]
    ModuleListParseError {
        /// Path of the module list file
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Root directory for resolution does not exist or is not a directory
    #[error("Root directory does not exist: {path}")]
    RootNotFound {
        /// The missing directory
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for ChunkError {
    fn clone(&self) -> Self {
        match self {
            Self::ConfigNotFound {
                path,
            } => Self::ConfigNotFound {
                path: path.clone(),
            },
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::InvalidBuildMode {
                value,
            } => Self::InvalidBuildMode {
                value: value.clone(),
            },
            Self::InvalidPattern {
                group,
                pattern,
                reason,
            } => Self::InvalidPattern {
                group: group.clone(),
                pattern: pattern.clone(),
                reason: reason.clone(),
            },
            Self::ModuleListParseError {
                file,
                reason,
            } => Self::ModuleListParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::RootNotFound {
                path,
            } => Self::RootNotFound {
                path: path.clone(),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use framework_chunks::core::{ChunkError, ErrorContext};
///
/// let context = ErrorContext::new(ChunkError::InvalidBuildMode {
///     value: "staging".to_string(),
/// })
/// .with_suggestion("Use --mode development or --mode production");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ChunkError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ChunkError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises [`ChunkError`] variants anywhere in the error chain, then
/// [`std::io::Error`] kinds. Anything else is rendered with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(chunk_error) = cause.downcast_ref::<ChunkError>() {
            return create_error_context(chunk_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ChunkError::Other {
                    message: format!("Permission denied: {error:#}"),
                })
                .with_suggestion("Check file ownership and permissions of the project directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ChunkError::Other {
                    message: format!("File not found: {error:#}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ChunkError::Other {
        message,
    })
}

/// Map each [`ChunkError`] variant to a context with a tailored suggestion.
fn create_error_context(error: ChunkError) -> ErrorContext {
    match &error {
        ChunkError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass an existing file to --config or omit the flag to use defaults")
            .with_details("Without --config, framework-chunks.toml is searched for in the working directory and its parents"),

        ChunkError::ConfigParseError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Check the TOML syntax and field names of the configuration file")
                .with_details(details)
        }

        ChunkError::InvalidBuildMode { .. } => ErrorContext::new(error)
            .with_suggestion("Use 'development' or 'production' (or set NODE_ENV=production)"),

        ChunkError::InvalidPattern { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Cache group tests use Rust regex syntax; escape path separators as [\\\\/]")
                .with_details(details)
        }

        ChunkError::ModuleListParseError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("The module list must be a JSON array of objects with at least an 'id' field")
                .with_details(details)
        }

        ChunkError::RootNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the directory that contains node_modules with --root"),

        _ => ErrorContext::new(error),
    }
}
