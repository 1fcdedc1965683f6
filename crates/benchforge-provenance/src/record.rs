//! Provenance capture for a completed benchmark run.
//!
//! Reads the generated compose file back, records each service's image and
//! its registry digest, the git identity of the working tree, and the CI
//! runner environment. Provenance is advisory rather than gating: every
//! lookup is best-effort and degrades to `"unknown"` (or is simply absent)
//! instead of failing the recording. Only a missing or unreadable compose
//! file is fatal.

use crate::error::{ProvenanceError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Marker for a value that could not be determined
pub const UNKNOWN: &str = "unknown";

/// Image reference and digest for one service.
#[derive(Debug, Clone, Serialize)]
pub struct ImageProvenance {
    /// Image reference as written in the compose file
    pub image: String,
    /// Repo digest reported by the container runtime, or "unknown"
    pub digest: String,
}

/// Source-control identity of the run, fields absent when not a git repo.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GitInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

/// CI runner identification, every field "unknown" when unset.
#[derive(Debug, Clone, Serialize)]
pub struct RunnerEnvironment {
    pub runner_os: String,
    pub runner_arch: String,
    pub github_workflow: String,
    pub github_run_id: String,
    pub github_run_number: String,
    pub github_actor: String,
    pub github_repository: String,
}

impl RunnerEnvironment {
    /// Capture the runner identification from the process environment.
    pub fn capture() -> Self {
        RunnerEnvironment {
            runner_os: env_or_unknown("RUNNER_OS"),
            runner_arch: env_or_unknown("RUNNER_ARCH"),
            github_workflow: env_or_unknown("GITHUB_WORKFLOW"),
            github_run_id: env_or_unknown("GITHUB_RUN_ID"),
            github_run_number: env_or_unknown("GITHUB_RUN_NUMBER"),
            github_actor: env_or_unknown("GITHUB_ACTOR"),
            github_repository: env_or_unknown("GITHUB_REPOSITORY"),
        }
    }
}

/// The full provenance report for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    /// When this report was recorded (UTC)
    pub timestamp: DateTime<Utc>,
    /// Source-control identity
    pub git: GitInfo,
    /// Per-service image references and digests
    pub images: BTreeMap<String, ImageProvenance>,
    /// CI runner identification
    pub environment: RunnerEnvironment,
}

/// Record provenance for the services declared in a compose file.
pub fn record(compose_path: &Path) -> Result<Provenance> {
    if !compose_path.exists() {
        return Err(ProvenanceError::ComposeNotFound(
            compose_path.to_path_buf(),
        ));
    }

    let content = std::fs::read_to_string(compose_path)?;
    let compose: serde_yaml::Value = serde_yaml::from_str(&content)?;

    let mut images = BTreeMap::new();
    if let Some(services) = compose.get("services").and_then(|s| s.as_mapping()) {
        for (name, service) in services {
            let Some(name) = name.as_str() else { continue };
            let Some(image) = service.get("image").and_then(|i| i.as_str()) else {
                continue;
            };
            if image.is_empty() {
                continue;
            }
            images.insert(
                name.to_string(),
                ImageProvenance {
                    image: image.to_string(),
                    digest: image_digest(image),
                },
            );
        }
    }

    Ok(Provenance {
        timestamp: Utc::now(),
        git: git_info(),
        images,
        environment: RunnerEnvironment::capture(),
    })
}

/// Write a provenance report as pretty JSON, creating parent directories.
pub fn write_report(provenance: &Provenance, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(provenance)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// Query the container runtime for an image's repo digest.
fn image_digest(image: &str) -> String {
    let output = Command::new("docker")
        .args(["inspect", "--format", "{{index .RepoDigests 0}}", image])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let digest = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if digest.is_empty() {
                UNKNOWN.to_string()
            } else {
                digest
            }
        }
        Ok(output) => {
            warn!(
                "docker inspect failed for {}: {}",
                image,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            UNKNOWN.to_string()
        }
        Err(e) => {
            warn!("docker not available ({e}), recording digest as unknown");
            UNKNOWN.to_string()
        }
    }
}

/// Capture git commit, branch and origin remote from the working tree.
fn git_info() -> GitInfo {
    let info = GitInfo {
        commit: run_git(&["rev-parse", "HEAD"]),
        branch: run_git(&["rev-parse", "--abbrev-ref", "HEAD"]),
        remote: run_git(&["remote", "get-url", "origin"]),
    };
    debug!("Captured git info: {:?}", info);
    info
}

fn run_git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

pub(crate) fn env_or_unknown(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| UNKNOWN.to_string())
}
