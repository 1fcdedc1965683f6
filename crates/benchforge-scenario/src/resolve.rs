//! Image resolution for scenario agents.
//!
//! Every agent must end up with a concrete `image` reference before the
//! topology can be built. An agent declared by literal `image` is accepted
//! as-is (outside CI); an agent declared by `agentbeats_id` is resolved
//! through the registry. Lookups run sequentially in declaration order,
//! evaluator first, and the first failure aborts the whole compilation so
//! no artifact is ever generated from a half-resolved scenario.

use crate::error::{Result, ScenarioError};
use crate::registry::AgentRegistry;
use crate::spec::{AgentEntry, ScenarioSpec};
use tracing::info;

/// Whether this process runs in a CI / remote-build context.
///
/// In CI, literal images are rejected: resolution must go through the
/// registry so the run's provenance stays attributable.
pub fn ci_context() -> bool {
    std::env::var_os("GITHUB_ACTIONS").is_some()
}

/// Resolve the image of every agent in the scenario, in place.
pub async fn resolve_all<R>(spec: &mut ScenarioSpec, registry: &R, ci: bool) -> Result<()>
where
    R: AgentRegistry + ?Sized,
{
    resolve_entry(&mut spec.evaluator, "green_agent", registry, ci).await?;

    for participant in &mut spec.participants {
        let role = format!("participant '{}'", participant.name());
        resolve_entry(participant, &role, registry, ci).await?;
    }

    Ok(())
}

/// Resolve one agent's image, writing it back into the entry.
///
/// Idempotent for an entry that already carries a literal image and no
/// registry id.
async fn resolve_entry<R>(entry: &mut AgentEntry, role: &str, registry: &R, ci: bool) -> Result<()>
where
    R: AgentRegistry + ?Sized,
{
    match (&entry.image, &entry.agentbeats_id) {
        (Some(_), Some(_)) => Err(ScenarioError::ConflictingDeclaration {
            role: role.to_string(),
        }),
        (Some(image), None) => {
            if ci {
                return Err(ScenarioError::ImageNotAllowedInCi {
                    role: role.to_string(),
                });
            }
            info!("Using {} image: {}", role, image);
            Ok(())
        }
        (None, Some(id)) => {
            let id = id.clone();
            let agent_info = registry.lookup(&id).await?;
            info!("Resolved {} image: {}", role, agent_info.docker_image);
            entry.image = Some(agent_info.docker_image);
            Ok(())
        }
        (None, None) => Err(ScenarioError::MissingDeclaration {
            role: role.to_string(),
        }),
    }
}
