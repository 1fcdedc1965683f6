//! Structural validation of a parsed scenario.

use crate::error::{Result, ScenarioError};
use crate::spec::ScenarioSpec;
use std::collections::BTreeSet;

/// Check that every participant name is unique.
///
/// All duplicates are collected and reported together in one error rather
/// than one at a time. Comparison is exact-string and case-sensitive. Runs
/// before any image resolution so a bad scenario never triggers network
/// traffic.
pub fn validate(spec: &ScenarioSpec) -> Result<()> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();

    for participant in &spec.participants {
        let name = participant.name();
        if !seen.insert(name) {
            duplicates.insert(name.to_string());
        }
    }

    if !duplicates.is_empty() {
        return Err(ScenarioError::DuplicateNames(
            duplicates.into_iter().collect(),
        ));
    }

    Ok(())
}
