//! Game layer.
//!
//! Implements the rules on top of the board topology:
//! - Factions competing for island ownership
//! - Islands with population and a fixed friend list
//! - The engine: claims, simultaneous balance steps, turn rotation
//! - Snapshots and invariant checks

mod engine;
mod faction;
pub mod invariants;
mod island;
mod snapshot;

pub use engine::{EngineConfig, InfluenceEngine};
pub use faction::{Faction, FactionId};
pub use invariants::{InvariantViolation, check_invariants};
pub use island::Island;
pub use snapshot::{EngineSnapshot, FactionSnapshot, IslandSnapshot};
