//! Benchforge deployment artifacts
//!
//! Derives the service topology from a resolved scenario and renders the
//! three launch artifacts: the compose file, the agent-to-agent scenario
//! file and the secret placeholder file.

pub mod error;
pub mod render;
pub mod topology;

pub use error::{ComposeError, Result};
pub use render::{render_compose, render_env_example, render_scenario};
pub use topology::{
    build, default_env, Gating, ResolvedTopology, ServiceSpec, CLIENT_IMAGE, CLIENT_SERVICE,
    GREEN_AGENT_PORT, GREEN_SERVICE, PARTICIPANT_PORT,
};

/// Generated artifact filenames, relative to the working directory
pub const COMPOSE_PATH: &str = "docker-compose.yml";
pub const A2A_SCENARIO_PATH: &str = "a2a-scenario.toml";
pub const ENV_EXAMPLE_PATH: &str = ".env.example";
