//! Benchforge - benchmark scenario compiler
//!
//! The `benchforge` command compiles a declarative `scenario.toml` into the
//! runtime artifacts for a multi-agent evaluation, and records provenance
//! for completed runs.
//!
//! ## Commands
//!
//! - `generate`: compile a scenario into docker-compose.yml,
//!   a2a-scenario.toml and .env.example
//! - `provenance`: record image digests, git identity and runner
//!   environment for a completed run

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use benchforge_compose::{
    build, default_env, render_compose, render_env_example, render_scenario,
    A2A_SCENARIO_PATH, COMPOSE_PATH, ENV_EXAMPLE_PATH,
};
use benchforge_scenario::{
    ci_context, init_tracing, resolve_all, secrets, validate, HttpAgentRegistry, ScenarioSpec,
};

#[derive(Parser)]
#[command(name = "benchforge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Benchmark scenario compiler for multi-agent evaluations", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate deployment artifacts from a scenario description
    Generate {
        /// Path to the scenario file
        #[arg(long, default_value = "scenario.toml")]
        scenario: PathBuf,
    },

    /// Record provenance for a completed run
    Provenance {
        /// Path to the docker-compose file
        #[arg(short, long, default_value = "docker-compose.yml")]
        compose: PathBuf,

        /// Output provenance file path
        #[arg(short, long, default_value = "output/provenance.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    match cli.command {
        Commands::Generate { scenario } => cmd_generate(&scenario).await,
        Commands::Provenance { compose, output } => cmd_provenance(&compose, &output),
    }
}

/// Compile a scenario into the three launch artifacts.
///
/// Everything is rendered in memory first; files are only written once the
/// whole compilation has succeeded, so a failure never leaves a partial
/// artifact set behind.
async fn cmd_generate(scenario_path: &Path) -> Result<()> {
    let mut spec = ScenarioSpec::load(scenario_path)?;
    validate(&spec)?;

    let registry = HttpAgentRegistry::new();
    resolve_all(&mut spec, &registry, ci_context()).await?;

    let topology = build(&spec, &default_env());
    let compose = render_compose(&topology);
    let a2a_scenario = render_scenario(&spec)?;
    let env_example = render_env_example(&secrets::scan(&spec));

    std::fs::write(COMPOSE_PATH, compose)
        .context(format!("Failed to write {COMPOSE_PATH}"))?;
    std::fs::write(A2A_SCENARIO_PATH, a2a_scenario)
        .context(format!("Failed to write {A2A_SCENARIO_PATH}"))?;

    if let Some(content) = env_example {
        std::fs::write(ENV_EXAMPLE_PATH, content)
            .context(format!("Failed to write {ENV_EXAMPLE_PATH}"))?;
        println!("Generated {ENV_EXAMPLE_PATH}");
    }

    println!("Generated {COMPOSE_PATH} and {A2A_SCENARIO_PATH}");
    Ok(())
}

/// Record provenance for a completed run.
fn cmd_provenance(compose_path: &Path, output_path: &Path) -> Result<()> {
    info!("Recording provenance from {:?}", compose_path);

    let provenance = benchforge_provenance::record(compose_path)?;
    benchforge_provenance::write_report(&provenance, output_path)?;

    println!("Recorded provenance to {}", output_path.display());
    println!("  - Timestamp: {}", provenance.timestamp.to_rfc3339());
    println!("  - Images: {}", provenance.images.len());
    Ok(())
}
