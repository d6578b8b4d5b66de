//! Error types and Result aliases for dirwatcher.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using dirwatcher's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dirwatcher operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Directory watching error.
    #[error("watcher error: {0}")]
    Watcher(#[from] WatcherError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised while polling the watched directory.
///
/// The two variants carry different recovery policies in the watch loop:
/// a directory failure resets every tracked file, a file failure drops
/// only the offending entry.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// The watched directory is missing, not a directory, or not listable.
    #[error("directory '{path}' is not accessible: {reason}")]
    DirectoryAccess { path: PathBuf, reason: String },

    /// A tracked file could not be opened or read.
    #[error("file '{path}' is not readable: {reason}")]
    FileAccess { path: PathBuf, reason: String },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl WatcherError {
    /// Create a directory access error.
    pub fn directory(path: impl AsRef<Path>, reason: impl std::fmt::Display) -> Self {
        Self::DirectoryAccess {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a file access error.
    pub fn file(path: impl AsRef<Path>, reason: impl std::fmt::Display) -> Self {
        Self::FileAccess {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryAccess { path, .. } | Self::FileAccess { path, .. } => path,
        }
    }
}
