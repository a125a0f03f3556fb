//! Error types for LaunchPad registrations.
//!
//! Argument errors are raised before the store is touched. Everything else
//! is a store access failure and carries the underlying error as `source`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the LaunchPad registration store.
#[derive(Debug, Error)]
pub enum LaunchPadError {
    // Argument errors
    #[error("'{param}' {message}")]
    InvalidArgument { param: &'static str, message: String },

    #[error("'{param}' cannot be null")]
    NullArgument { param: &'static str },

    // Store access errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Store access error: {message}")]
    StoreAccess { message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for LaunchPad operations.
pub type Result<T> = std::result::Result<T, LaunchPadError>;

impl From<std::io::Error> for LaunchPadError {
    fn from(err: std::io::Error) -> Self {
        LaunchPadError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for LaunchPadError {
    fn from(err: rusqlite::Error) -> Self {
        LaunchPadError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl LaunchPadError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        LaunchPadError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an `InvalidArgument` error for a blank or missing value.
    pub fn blank_argument(param: &'static str) -> Self {
        LaunchPadError::InvalidArgument {
            param,
            message: "cannot be null or whitespace".to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than the store.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            LaunchPadError::InvalidArgument { .. } | LaunchPadError::NullArgument { .. }
        )
    }

    /// Process exit code for command-line hosts.
    ///
    /// - 2: argument error
    /// - 1: store access or configuration error
    pub fn exit_code(&self) -> i32 {
        if self.is_argument_error() {
            2
        } else {
            1
        }
    }
}
