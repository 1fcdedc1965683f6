//! Error types for artifact rendering

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    /// The pass-through config section could not be serialized
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, ComposeError>;
