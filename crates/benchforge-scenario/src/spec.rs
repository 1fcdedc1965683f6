//! Scenario schema definitions
//!
//! A scenario file declares one evaluator (the `[green_agent]` table), an
//! ordered list of `[[participants]]`, and a free-form `[config]` table that
//! is passed through to the generated a2a scenario verbatim.

use crate::error::{Result, ScenarioError};
use serde::Deserialize;
use std::path::Path;
use toml::value::Table;

/// Ordered map of environment variable names to TOML values.
///
/// Values are kept as raw TOML values so that non-string entries (ports,
/// flags) survive the round trip into the generated compose file.
pub type EnvMap = Table;

/// One agent declaration: the evaluator or a participant.
///
/// Exactly one of `image` / `agentbeats_id` must be set; the resolver
/// enforces this and populates `image` in place when the agent was declared
/// by registry id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentEntry {
    /// Participant name (absent for the evaluator, whose name is fixed)
    #[serde(default)]
    pub name: Option<String>,

    /// Literal runtime image reference
    #[serde(default)]
    pub image: Option<String>,

    /// Agent registry id, resolved to an image via the registry API
    #[serde(default)]
    pub agentbeats_id: Option<String>,

    /// Environment variables; string values may contain `${NAME}` placeholders
    #[serde(default)]
    pub env: EnvMap,
}

impl AgentEntry {
    /// Participant name, falling back to "unknown" for unnamed entries
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }
}

/// A parsed benchmark scenario.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioSpec {
    /// The evaluator ("green") agent that drives and scores the run
    #[serde(rename = "green_agent", default)]
    pub evaluator: AgentEntry,

    /// Agents under evaluation, in declaration order
    #[serde(default)]
    pub participants: Vec<AgentEntry>,

    /// Benchmark parameters, opaque to the compiler
    #[serde(default)]
    pub config: Table,
}

impl ScenarioSpec {
    /// Parse a scenario from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScenarioError::InputNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// All agents in declaration order, evaluator first.
    pub fn agents(&self) -> impl Iterator<Item = &AgentEntry> {
        std::iter::once(&self.evaluator).chain(self.participants.iter())
    }
}
