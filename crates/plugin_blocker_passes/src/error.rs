//! Error types for the Blocker Passes plugin.
//!
//! Only configuration handling can fail in a way callers need to see. Problems
//! with individual props (bad vectors, entities the host refuses to create) are
//! absorbed inside the round-start handler and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the plugin.
pub type Result<T> = std::result::Result<T, BlockerError>;

#[derive(Error, Debug)]
pub enum BlockerError {
    /// The configuration file exists but is not valid JSON for our schema.
    #[error("Failed to parse configuration {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The default configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[source] serde_json::Error),

    /// Refused to write defaults over a file that is already there.
    #[error("Configuration already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BlockerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
