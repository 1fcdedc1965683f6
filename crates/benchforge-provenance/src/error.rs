//! Error types for provenance recording

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvenanceError {
    /// Compose file does not exist
    #[error("compose file not found: {}", .0.display())]
    ComposeNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Compose file could not be parsed
    #[error("invalid compose file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Provenance report could not be serialized
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for provenance operations
pub type Result<T> = std::result::Result<T, ProvenanceError>;
