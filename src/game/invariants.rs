//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger on an engine driven only through its public
//! operations. If they do, the bookkeeping is broken.

use thiserror::Error;

use crate::game::InfluenceEngine;

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check all engine invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(engine: &InfluenceEngine) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let factions = engine.factions();
    let mut owned = vec![0u32; factions.len()];

    for (coord, island) in engine.islands() {
        if island.total_friends() == 0 {
            violations.push(InvariantViolation::new(format!(
                "island at {coord} has no friends"
            )));
        }
        for &friend in island.friends() {
            if engine.island(friend).is_none() {
                violations.push(InvariantViolation::new(format!(
                    "island at {coord} lists {friend} as a friend, but it is water"
                )));
            }
        }
        match island.faction() {
            Some(id) if id >= factions.len() => {
                violations.push(InvariantViolation::new(format!(
                    "island at {coord} is owned by unknown faction {id}"
                )));
            }
            Some(id) => owned[id] += 1,
            None if island.population() > 0 => {
                violations.push(InvariantViolation::new(format!(
                    "island at {coord} has population {} but no owner",
                    island.population()
                )));
            }
            None => {}
        }
    }

    // Control counters match the board
    for (id, (faction, &count)) in factions.iter().zip(&owned).enumerate() {
        if faction.control != count {
            violations.push(InvariantViolation::new(format!(
                "faction {id} reports control {} but owns {count} islands",
                faction.control
            )));
        }
        if !faction.active && count > 0 {
            violations.push(InvariantViolation::new(format!(
                "eliminated faction {id} still owns {count} islands"
            )));
        }
    }

    if engine.faction_index() >= factions.len() {
        violations.push(InvariantViolation::new(format!(
            "turn index {} is outside the roster",
            engine.faction_index()
        )));
    }

    if engine.complete() && engine.total_controlling_factions() != 1 {
        violations.push(InvariantViolation::new(
            "game is complete without a single controlling faction",
        ));
    }

    violations
}

/// Assert all engine invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(engine: &InfluenceEngine) {
    let violations = check_invariants(engine);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("engine invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_engine: &InfluenceEngine) {}
