//! Benchforge provenance recorder
//!
//! Captures post-hoc metadata for a completed run: image digests, git
//! identity and CI runner environment. Best-effort by design — see
//! [`record`].

pub mod error;
pub mod record;

pub use error::{ProvenanceError, Result};
pub use record::{
    record, write_report, GitInfo, ImageProvenance, Provenance, RunnerEnvironment, UNKNOWN,
};
