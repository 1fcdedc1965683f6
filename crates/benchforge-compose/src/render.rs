//! Artifact renderers.
//!
//! Three independent pure functions over the resolved topology and scenario.
//! Each produces the full artifact text in memory; callers write to disk
//! only after every renderer has succeeded, so no partial artifact set can
//! exist. Rendering the same input twice yields byte-identical output.

use crate::error::Result;
use crate::topology::{ResolvedTopology, ServiceSpec, GREEN_AGENT_PORT, GREEN_SERVICE, PARTICIPANT_PORT};
use benchforge_scenario::{EnvMap, ScenarioSpec, SecretSet};
use toml::value::Table;
use toml::Value;

/// Health probe constants for the evaluator service
const HEALTHCHECK_INTERVAL: &str = "5s";
const HEALTHCHECK_TIMEOUT: &str = "5s";
const HEALTHCHECK_RETRIES: u32 = 10;
const HEALTHCHECK_START_PERIOD: &str = "10s";

/// Name of the shared bridge network
const NETWORK: &str = "agent-network";

/// Render the deployment topology as a docker-compose file.
pub fn render_compose(topology: &ResolvedTopology) -> String {
    let mut out = String::from("# Auto-generated from scenario.toml\n\nservices:\n");

    push_evaluator(&mut out, &topology.evaluator);
    out.push('\n');

    for participant in &topology.participants {
        push_participant(&mut out, participant);
        out.push('\n');
    }

    push_client(&mut out, &topology.client);
    out.push('\n');

    out.push_str(&format!(
        "networks:\n  {NETWORK}:\n    driver: bridge\n"
    ));
    out
}

fn push_evaluator(out: &mut String, service: &ServiceSpec) {
    push_service_header(out, service);
    push_env(out, &service.env);

    let port = service.port.unwrap_or(GREEN_AGENT_PORT);
    out.push_str("    healthcheck:\n");
    out.push_str(&format!(
        "      test: [\"CMD\", \"python\", \"-c\", \"import urllib.request; urllib.request.urlopen('http://localhost:{port}/health')\"]\n"
    ));
    out.push_str(&format!("      interval: {HEALTHCHECK_INTERVAL}\n"));
    out.push_str(&format!("      timeout: {HEALTHCHECK_TIMEOUT}\n"));
    out.push_str(&format!("      retries: {HEALTHCHECK_RETRIES}\n"));
    out.push_str(&format!("      start_period: {HEALTHCHECK_START_PERIOD}\n"));

    push_depends_on(out, service);
    push_network(out);
}

fn push_participant(out: &mut String, service: &ServiceSpec) {
    push_service_header(out, service);
    push_env(out, &service.env);
    push_depends_on(out, service);
    push_network(out);
}

fn push_client(out: &mut String, service: &ServiceSpec) {
    push_service_header(out, service);
    out.push_str("    volumes:\n");
    out.push_str("      - ./a2a-scenario.toml:/app/scenario.toml\n");
    out.push_str("      - ./output:/app/output\n");
    out.push_str("    command: [\"scenario.toml\", \"output/results.json\"]\n");
    push_depends_on(out, service);
    push_network(out);
}

fn push_service_header(out: &mut String, service: &ServiceSpec) {
    out.push_str(&format!("  {}:\n", service.name));
    out.push_str(&format!("    image: {}\n", service.image));
    out.push_str("    platform: linux/amd64\n");
    out.push_str(&format!("    container_name: {}\n", service.name));
}

/// Environment as literal `KEY=value` lines, in map insertion order.
fn push_env(out: &mut String, env: &EnvMap) {
    if env.is_empty() {
        return;
    }
    out.push_str("    environment:\n");
    for (key, value) in env {
        out.push_str(&format!("      - {}={}\n", key, env_value(value)));
    }
}

/// Dependency edges with an explicit gating condition per edge.
fn push_depends_on(out: &mut String, service: &ServiceSpec) {
    if service.depends_on.is_empty() {
        return;
    }
    out.push_str("    depends_on:\n");
    for (dependency, gating) in &service.depends_on {
        out.push_str(&format!("      {dependency}:\n"));
        out.push_str(&format!("        condition: {}\n", gating.condition()));
    }
}

fn push_network(out: &mut String) {
    out.push_str(&format!("    networks:\n      - {NETWORK}\n"));
}

/// Strings render raw, other scalars via their TOML display form.
fn env_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render the agent-to-agent scenario file.
///
/// The `agentbeats_id` line is omitted for participants declared by literal
/// image; the `[config]` section passes through verbatim.
pub fn render_scenario(spec: &ScenarioSpec) -> Result<String> {
    let mut out = format!(
        "[green_agent]\nendpoint = \"http://{GREEN_SERVICE}:{GREEN_AGENT_PORT}\"\n\n"
    );

    for participant in &spec.participants {
        let name = participant.name();
        out.push_str("[[participants]]\n");
        out.push_str(&format!("role = \"{name}\"\n"));
        out.push_str(&format!(
            "endpoint = \"http://{name}:{PARTICIPANT_PORT}\"\n"
        ));
        if let Some(id) = &participant.agentbeats_id {
            out.push_str(&format!("agentbeats_id = \"{id}\"\n"));
        }
        out.push('\n');
    }

    let mut wrapper = Table::new();
    wrapper.insert("config".to_string(), Value::Table(spec.config.clone()));
    out.push_str(&toml::to_string(&wrapper)?);

    Ok(out)
}

/// Render the secret placeholder file, or `None` when there is nothing to
/// declare (in which case no file is written at all).
pub fn render_env_example(secrets: &SecretSet) -> Option<String> {
    if secrets.is_empty() {
        return None;
    }
    let mut out = String::new();
    for name in secrets {
        out.push_str(name);
        out.push_str("=\n");
    }
    Some(out)
}
