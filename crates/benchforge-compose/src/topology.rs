//! Service topology derivation.
//!
//! Turns a resolved scenario into the service graph the compose renderer
//! emits: one evaluator service, N participant services and one
//! aggregator/client service, plus the startup dependency edges between
//! them.
//!
//! Startup ordering rationale: the evaluator polls participants at run
//! start, so participants only need to be reachable (process started); the
//! evaluator itself must be confirmed live via its health endpoint before
//! the client starts driving the benchmark.

use benchforge_scenario::{EnvMap, ScenarioSpec};
use toml::Value;
use tracing::debug;

/// Canonical evaluator listen port
pub const GREEN_AGENT_PORT: u16 = 9000;

/// Canonical participant listen port (participants run as separate network
/// addresses, so they all share one port number)
pub const PARTICIPANT_PORT: u16 = 8001;

/// Fixed service name of the evaluator
pub const GREEN_SERVICE: &str = "green-agent";

/// Fixed service name of the aggregator/client
pub const CLIENT_SERVICE: &str = "agentbeats-client";

/// Image the aggregator/client always runs
pub const CLIENT_IMAGE: &str = "ghcr.io/agentbeats/agentbeats-client:v1.0.0";

/// Environment entries injected into every agent service.
///
/// Passed into [`build`] as a plain parameter so the merge stays a pure
/// function; explicit scenario values override these.
pub fn default_env() -> EnvMap {
    let mut env = EnvMap::new();
    env.insert("PYTHONUNBUFFERED".to_string(), Value::String("1".to_string()));
    env
}

/// Condition under which a dependent service may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gating {
    /// Predecessor process has started
    Started,
    /// Predecessor health probe is passing
    Healthy,
}

impl Gating {
    /// Compose `depends_on` condition string.
    pub fn condition(&self) -> &'static str {
        match self {
            Gating::Started => "service_started",
            Gating::Healthy => "service_healthy",
        }
    }
}

/// One service in the deployment topology.
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    /// Service and container name
    pub name: String,
    /// Runtime image reference
    pub image: String,
    /// Merged environment (defaults first, explicit values override)
    pub env: EnvMap,
    /// Listen port, when the service exposes an agent endpoint
    pub port: Option<u16>,
    /// Startup dependencies with their gating condition
    pub depends_on: Vec<(String, Gating)>,
}

/// The derived service graph, recomputed fresh on every run.
#[derive(Debug, Clone)]
pub struct ResolvedTopology {
    pub evaluator: ServiceSpec,
    pub participants: Vec<ServiceSpec>,
    pub client: ServiceSpec,
}

impl ResolvedTopology {
    /// All services in render order: evaluator, participants, client.
    pub fn services(&self) -> impl Iterator<Item = &ServiceSpec> {
        std::iter::once(&self.evaluator)
            .chain(self.participants.iter())
            .chain(std::iter::once(&self.client))
    }
}

/// Build the service topology from a resolved scenario.
///
/// Every agent entry must already carry an image (see
/// `benchforge_scenario::resolve_all`).
pub fn build(spec: &ScenarioSpec, defaults: &EnvMap) -> ResolvedTopology {
    let participant_names: Vec<String> = spec
        .participants
        .iter()
        .map(|p| p.name().to_string())
        .collect();

    let evaluator = ServiceSpec {
        name: GREEN_SERVICE.to_string(),
        image: spec.evaluator.image.clone().unwrap_or_default(),
        env: merge_env(defaults, &spec.evaluator.env),
        port: Some(GREEN_AGENT_PORT),
        depends_on: participant_names
            .iter()
            .map(|name| (name.clone(), Gating::Started))
            .collect(),
    };

    let participants = spec
        .participants
        .iter()
        .map(|p| ServiceSpec {
            name: p.name().to_string(),
            image: p.image.clone().unwrap_or_default(),
            env: merge_env(defaults, &p.env),
            port: Some(PARTICIPANT_PORT),
            depends_on: Vec::new(),
        })
        .collect();

    // The client waits for the evaluator's health probe and for every
    // participant process.
    let mut client_depends = vec![(GREEN_SERVICE.to_string(), Gating::Healthy)];
    client_depends.extend(
        participant_names
            .iter()
            .map(|name| (name.clone(), Gating::Started)),
    );

    let client = ServiceSpec {
        name: CLIENT_SERVICE.to_string(),
        image: CLIENT_IMAGE.to_string(),
        env: EnvMap::new(),
        port: None,
        depends_on: client_depends,
    };

    debug!(
        "Derived topology: 1 evaluator, {} participant service(s), 1 client",
        participant_names.len()
    );

    ResolvedTopology {
        evaluator,
        participants,
        client,
    }
}

/// Merge explicit env entries over the defaults; explicit wins, defaults
/// keep their insertion position.
fn merge_env(defaults: &EnvMap, explicit: &EnvMap) -> EnvMap {
    let mut merged = defaults.clone();
    for (key, value) in explicit {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchforge_scenario::AgentEntry;

    fn resolved_spec(participant_names: &[&str]) -> ScenarioSpec {
        ScenarioSpec {
            evaluator: AgentEntry {
                image: Some("img:ev".to_string()),
                ..Default::default()
            },
            participants: participant_names
                .iter()
                .map(|name| AgentEntry {
                    name: Some(name.to_string()),
                    image: Some(format!("img:{name}")),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dependency_edges() {
        let topology = build(&resolved_spec(&["p1", "p2"]), &default_env());

        assert_eq!(
            topology.evaluator.depends_on,
            vec![
                ("p1".to_string(), Gating::Started),
                ("p2".to_string(), Gating::Started),
            ]
        );
        for participant in &topology.participants {
            assert!(participant.depends_on.is_empty());
        }
        assert_eq!(
            topology.client.depends_on,
            vec![
                (GREEN_SERVICE.to_string(), Gating::Healthy),
                ("p1".to_string(), Gating::Started),
                ("p2".to_string(), Gating::Started),
            ]
        );
    }

    #[test]
    fn test_ports_and_images() {
        let topology = build(&resolved_spec(&["p1"]), &default_env());

        assert_eq!(topology.evaluator.port, Some(GREEN_AGENT_PORT));
        assert_eq!(topology.evaluator.image, "img:ev");
        assert_eq!(topology.participants[0].port, Some(PARTICIPANT_PORT));
        assert_eq!(topology.participants[0].image, "img:p1");
        assert_eq!(topology.client.port, None);
        assert_eq!(topology.client.image, CLIENT_IMAGE);
    }

    #[test]
    fn test_default_env_injected_and_overridable() {
        let mut spec = resolved_spec(&["p1"]);
        spec.participants[0].env.insert(
            "PYTHONUNBUFFERED".to_string(),
            Value::String("0".to_string()),
        );
        spec.participants[0]
            .env
            .insert("EXTRA".to_string(), Value::String("x".to_string()));

        let topology = build(&spec, &default_env());

        let evaluator_env = &topology.evaluator.env;
        assert_eq!(
            evaluator_env["PYTHONUNBUFFERED"].as_str(),
            Some("1"),
            "defaults apply when not overridden"
        );

        let participant_env = &topology.participants[0].env;
        assert_eq!(
            participant_env["PYTHONUNBUFFERED"].as_str(),
            Some("0"),
            "explicit values win"
        );
        assert_eq!(participant_env["EXTRA"].as_str(), Some("x"));
        // Overridden defaults keep their original position
        let keys: Vec<_> = participant_env.keys().cloned().collect();
        assert_eq!(keys, vec!["PYTHONUNBUFFERED", "EXTRA"]);
    }

    #[test]
    fn test_service_render_order() {
        let topology = build(&resolved_spec(&["p1", "p2"]), &default_env());
        let names: Vec<_> = topology.services().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![GREEN_SERVICE, "p1", "p2", CLIENT_SERVICE]);
    }
}
