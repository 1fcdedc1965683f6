//! In-memory fakes for the registry trait (testing only)
//!
//! Provides `MemoryRegistry`, which satisfies [`AgentRegistry`] without any
//! network dependency.

use crate::error::{Result, ScenarioError};
use crate::registry::{AgentInfo, AgentRegistry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory agent registry backed by a `HashMap<id, image>`.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    agents: Mutex<HashMap<String, String>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent id with its image reference.
    pub fn insert(&self, id: &str, image: &str) {
        let mut agents = self.agents.lock().unwrap();
        agents.insert(id.to_string(), image.to_string());
    }
}

#[async_trait]
impl AgentRegistry for MemoryRegistry {
    async fn lookup(&self, id: &str) -> Result<AgentInfo> {
        let agents = self.agents.lock().unwrap();
        agents
            .get(id)
            .map(|image| AgentInfo {
                docker_image: image.clone(),
            })
            .ok_or_else(|| ScenarioError::Lookup {
                id: id.to_string(),
                detail: "agent not found".to_string(),
            })
    }
}
