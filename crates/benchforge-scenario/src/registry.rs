//! Agent registry client
//!
//! Resolves a registry id (`agentbeats_id`) to a concrete runtime image
//! reference via the agentbeats.dev HTTP API. The lookup is the only network
//! operation in the compiler; any failure is fatal to the whole run.

use crate::error::{Result, ScenarioError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Base URL of the public agent registry API
pub const AGENTBEATS_API_URL: &str = "https://agentbeats.dev/api/agents";

/// Per-lookup timeout; a timeout surfaces as a plain lookup failure
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Registry record for one agent.
///
/// The response must carry a `docker_image` field; any other shape is a
/// malformed-response failure.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentInfo {
    /// Runtime image reference for the agent
    pub docker_image: String,
}

/// Identity-to-image lookup capability.
#[async_trait]
pub trait AgentRegistry: Send + Sync {
    /// Resolve a registry id to its agent record.
    async fn lookup(&self, id: &str) -> Result<AgentInfo>;
}

/// HTTP client for the agent registry.
pub struct HttpAgentRegistry {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAgentRegistry {
    /// Create a client against the public registry.
    pub fn new() -> Self {
        Self::with_base_url(AGENTBEATS_API_URL)
    }

    /// Create a client against a specific registry endpoint.
    pub fn with_base_url(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("benchforge/", env!("CARGO_PKG_VERSION")))
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        HttpAgentRegistry {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

impl Default for HttpAgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentRegistry for HttpAgentRegistry {
    async fn lookup(&self, id: &str) -> Result<AgentInfo> {
        let url = format!("{}/{}", self.base_url, id);
        debug!("Fetching agent info from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScenarioError::Lookup {
                id: id.to_string(),
                detail: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScenarioError::Lookup {
                id: id.to_string(),
                detail: format!("registry returned HTTP {status}"),
            });
        }

        response
            .json::<AgentInfo>()
            .await
            .map_err(|e| ScenarioError::Lookup {
                id: id.to_string(),
                detail: format!("invalid registry response: {e}"),
            })
    }
}
