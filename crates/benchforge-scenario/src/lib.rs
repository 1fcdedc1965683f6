//! Benchforge scenario model
//!
//! Parses a declarative `scenario.toml`, validates it, and resolves every
//! agent to a concrete runtime image. The resolved scenario is the single
//! source of truth for all generated artifacts, so this crate fails fast:
//! any validation or resolution error aborts the compilation before a byte
//! of output exists.
//!
//! ## Pipeline position
//!
//! parse ([`ScenarioSpec::load`]) → validate ([`validate`]) → resolve
//! ([`resolve_all`]) → hand off to `benchforge-compose`.

pub mod error;
pub mod fakes;
pub mod registry;
pub mod resolve;
pub mod secrets;
pub mod spec;
pub mod telemetry;
pub mod validate;

pub use error::{Result, ScenarioError};
pub use registry::{AgentInfo, AgentRegistry, HttpAgentRegistry, AGENTBEATS_API_URL};
pub use resolve::{ci_context, resolve_all};
pub use secrets::SecretSet;
pub use spec::{AgentEntry, EnvMap, ScenarioSpec};
pub use telemetry::init_tracing;
pub use validate::validate;

/// Benchforge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
