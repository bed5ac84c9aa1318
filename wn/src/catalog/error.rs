//! Catalog error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading places
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid place data in {path} (line {line}): {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unrecognized catalog format: {0}")]
    UnknownFormat(String),

    #[error("Duplicate place id in catalog: {0}")]
    DuplicateId(String),
}

impl CatalogError {
    /// Check if this error comes from malformed content rather than access
    pub fn is_data_error(&self) -> bool {
        !matches!(self, CatalogError::Io { .. })
    }
}
