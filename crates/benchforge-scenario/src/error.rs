//! Error types for scenario parsing, validation and image resolution

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scenario compilation.
///
/// Every variant is terminal: nothing is retried and no artifact is written
/// once one of these surfaces.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Agent declared neither an image nor a registry id
    #[error("{role} must have either 'image' or 'agentbeats_id' field")]
    MissingDeclaration { role: String },

    /// Agent declared both an image and a registry id
    #[error("{role} has both 'image' and 'agentbeats_id' - use one or the other")]
    ConflictingDeclaration { role: String },

    /// Literal images are rejected in CI so provenance stays attributable
    #[error("{role} requires 'agentbeats_id' when running in CI")]
    ImageNotAllowedInCi { role: String },

    /// Two or more participants share a name
    #[error("duplicate participant names found: {}", .0.join(", "))]
    DuplicateNames(Vec<String>),

    /// Registry lookup failed (not found, malformed response or transport)
    #[error("failed to resolve agent {id}: {detail}")]
    Lookup { id: String, detail: String },

    /// Scenario file does not exist
    #[error("scenario file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario TOML could not be parsed
    #[error("invalid scenario file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for scenario operations
pub type Result<T> = std::result::Result<T, ScenarioError>;
