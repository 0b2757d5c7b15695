//! Error handling for the provider network pipeline.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for the provider network pipeline
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Error opening, reading or writing a file
    #[error("IO error at {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// Error reading or writing CSV data
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// CSV file involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: csv::Error,
    },
    /// Error serializing or parsing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
    /// Input data that cannot be processed
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NetworkError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a CSV error with the path it happened on
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type for provider network operations
pub type Result<T> = std::result::Result<T, NetworkError>;
