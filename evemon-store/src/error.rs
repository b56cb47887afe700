//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the document cache.
///
/// None of these are fatal: a failed cache write leaves the fresh result
/// intact and a failed read behaves like a miss. Messages are captured as
/// strings so the error can travel inside cloned fetch results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The cache directory could not be created.
    #[error("Couldn't create the cache directory {}: {message}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying IO error.
        message: String,
    },

    /// A cache file could not be written.
    #[error("Couldn't write cache file {}: {message}", path.display())]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying IO error.
        message: String,
    },

    /// A cache file exists but could not be read.
    #[error("Couldn't read cache file {}: {message}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        message: String,
    },

    /// No cache entry exists for the key.
    #[error("No cache file for {key}")]
    Miss {
        /// The cache key that was looked up.
        key: String,
    },
}

impl CacheError {
    /// Returns true if the cache could not be created, written or read.
    pub fn is_io(&self) -> bool {
        !self.is_miss()
    }

    /// Returns true if the entry simply did not exist.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::Miss { .. })
    }
}

/// Errors from configuration handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
