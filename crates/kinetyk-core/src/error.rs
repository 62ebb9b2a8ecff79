//! Error types for Kinetyk operations.
//!
//! This module provides the common [`Error`] type and [`Result`] alias used
//! across all Kinetyk crates. Uses `thiserror` for derive macros.
//!
//! Pipeline-local failures (`Format`, `Validation`) skip the offending source
//! file and let the run continue; everything else is surfaced to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using Kinetyk's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Kinetyk operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Missing or malformed front matter in a source file.
    #[error("format error in {path}: {message}")]
    Format {
        /// Source file the error was found in.
        path: String,
        /// What was wrong with it.
        message: String,
    },

    /// A record failed schema validation.
    #[error("validation failed for '{id}': {}", .errors.join("; "))]
    Validation {
        /// Record id (or source path when no id could be derived).
        id: String,
        /// Path-qualified validation errors.
        errors: Vec<String>,
    },

    /// A requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A query is missing a required parameter.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// I/O error with the path involved.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Underlying I/O error.
        source: std::io::Error,
        /// Path the operation was against.
        path: PathBuf,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal operation failure (serialization and the like).
    #[error("{0}")]
    Operation(String),
}

impl Error {
    /// Create a format error for a source file.
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a record.
    pub fn validation(id: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Validation {
            id: id.into(),
            errors,
        }
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Wrap an I/O error with the path it occurred at.
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// Returns `true` for errors that skip one source file without aborting
    /// the pipeline run.
    pub fn is_record_local(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::Validation { .. })
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` if this is a bad-request error.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
