//! Integration tests for the full scenario-to-artifact pipeline.

use benchforge_compose::{
    build, default_env, render_compose, render_env_example, render_scenario, Gating,
};
use benchforge_scenario::fakes::MemoryRegistry;
use benchforge_scenario::secrets;
use benchforge_scenario::{resolve_all, validate, ScenarioError, ScenarioSpec};

const SCENARIO: &str = r#"
[green_agent]
agentbeats_id = "ev-registry-id"

[green_agent.env]
OPENAI_API_KEY = "${OPENAI_API_KEY}"

[[participants]]
name = "defender"
image = "ghcr.io/acme/defender:v3"

[[participants]]
name = "attacker"
agentbeats_id = "attacker-id"

[participants.env]
ATTACK_BUDGET = 100

[config]
rounds = 5
mode = "adversarial"
"#;

/// Test: full compile from TOML text to all three artifacts.
#[tokio::test]
async fn test_compile_scenario_end_to_end() {
    let registry = MemoryRegistry::new();
    registry.insert("ev-registry-id", "ghcr.io/acme/evaluator:v1");
    registry.insert("attacker-id", "ghcr.io/acme/attacker:v2");

    let mut spec = ScenarioSpec::from_toml_str(SCENARIO).expect("scenario parses");
    validate(&spec).expect("names are unique");
    resolve_all(&mut spec, &registry, false)
        .await
        .expect("all images resolve");

    let topology = build(&spec, &default_env());

    // Dependency contract: client waits for evaluator health and every
    // participant process; evaluator waits for every participant process.
    assert_eq!(
        topology.client.depends_on,
        vec![
            ("green-agent".to_string(), Gating::Healthy),
            ("defender".to_string(), Gating::Started),
            ("attacker".to_string(), Gating::Started),
        ]
    );
    assert_eq!(
        topology.evaluator.depends_on,
        vec![
            ("defender".to_string(), Gating::Started),
            ("attacker".to_string(), Gating::Started),
        ]
    );

    let compose = render_compose(&topology);
    assert!(compose.contains("    image: ghcr.io/acme/evaluator:v1\n"));
    assert!(compose.contains("    image: ghcr.io/acme/defender:v3\n"));
    assert!(compose.contains("    image: ghcr.io/acme/attacker:v2\n"));
    assert!(compose.contains("      - ATTACK_BUDGET=100\n"));
    assert!(compose.contains("        condition: service_healthy\n"));

    let scenario = render_scenario(&spec).expect("scenario renders");
    assert!(scenario.contains("endpoint = \"http://green-agent:9000\"\n"));
    assert!(scenario.contains("role = \"defender\"\n"));
    assert!(scenario.contains("endpoint = \"http://attacker:8001\"\n"));
    assert!(scenario.contains("agentbeats_id = \"attacker-id\"\n"));
    // Literal-image participants carry no registry id line
    assert!(!scenario.contains("agentbeats_id = \"ghcr.io/acme/defender:v3\""));
    assert!(scenario.contains("rounds = 5"));
    assert!(scenario.contains("mode = \"adversarial\""));

    let placeholders = render_env_example(&secrets::scan(&spec)).expect("one secret found");
    assert_eq!(placeholders, "OPENAI_API_KEY=\n");
}

/// Test: the minimal scenario produces exactly three services and no
/// placeholder artifact.
#[tokio::test]
async fn test_minimal_scenario_three_services() {
    let registry = MemoryRegistry::new();
    let mut spec = ScenarioSpec::from_toml_str(
        r#"
        [green_agent]
        image = "img:ev"

        [[participants]]
        name = "p1"
        image = "img:p1"
        "#,
    )
    .unwrap();
    validate(&spec).unwrap();
    resolve_all(&mut spec, &registry, false).await.unwrap();

    let topology = build(&spec, &default_env());
    let names: Vec<_> = topology.services().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["green-agent", "p1", "agentbeats-client"]);
    assert!(topology.participants[0].depends_on.is_empty());

    assert!(render_env_example(&secrets::scan(&spec)).is_none());
}

/// Test: duplicate participant names abort before any resolution.
#[tokio::test]
async fn test_duplicate_names_abort_compilation() {
    let spec = ScenarioSpec::from_toml_str(
        r#"
        [green_agent]
        image = "img:ev"

        [[participants]]
        name = "twin"
        image = "img:a"

        [[participants]]
        name = "twin"
        image = "img:b"
        "#,
    )
    .unwrap();

    let err = validate(&spec).unwrap_err();
    match err {
        ScenarioError::DuplicateNames(names) => assert_eq!(names, vec!["twin".to_string()]),
        other => panic!("expected DuplicateNames, got {other:?}"),
    }
}

/// Test: CI context rejects literal images before rendering anything.
#[tokio::test]
async fn test_ci_context_rejects_literal_images() {
    let registry = MemoryRegistry::new();
    let mut spec = ScenarioSpec::from_toml_str(
        r#"
        [green_agent]
        image = "img:ev"
        "#,
    )
    .unwrap();

    let err = resolve_all(&mut spec, &registry, true).await.unwrap_err();
    assert!(matches!(err, ScenarioError::ImageNotAllowedInCi { .. }));
}
