//! Secret placeholder scanning.
//!
//! Environment values may reference operator-supplied secrets as `${NAME}`.
//! The scanner collects every placeholder name across the whole scenario so
//! the compiler can emit a `.env.example` skeleton for the operator to fill.

use crate::spec::ScenarioSpec;
use regex::Regex;
use std::collections::BTreeSet;

/// Unique placeholder names, lexicographically ordered.
pub type SecretSet = BTreeSet<String>;

/// Collect every `${NAME}` placeholder from every agent's environment.
///
/// A single value may yield several names; duplicates across agents collapse
/// into one entry. Non-string values never contain placeholders.
pub fn scan(spec: &ScenarioSpec) -> SecretSet {
    let pattern = Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid");
    let mut secrets = SecretSet::new();

    for agent in spec.agents() {
        for value in agent.env.values() {
            let Some(text) = value.as_str() else { continue };
            for capture in pattern.captures_iter(text) {
                secrets.insert(capture[1].to_string());
            }
        }
    }

    secrets
}
