// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Influence: a deterministic territorial-control game engine.
//!
//! Factions take turns growing the population of islands on a grid. An
//! island whose population reaches its number of neighbors ("friends")
//! overflows: it sends one person to each friend and converts them to its
//! owner. The game ends when a single faction owns every populated island.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (generate / play / survey)    │
//! ├─────────────────────────────────────┤
//! │   Game: engine, factions, islands   │
//! ├─────────────────────────────────────┤
//! │   Topology: layouts, stencils       │
//! ├─────────────────────────────────────┤
//! │   Grid storage                      │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use influence::{Coord, EngineConfig, InfluenceEngine, IslandLayout, Stencil};
//!
//! let layout = IslandLayout::from_rows(&["###", "###"]).unwrap();
//! let stencil = Arc::new(Stencil::cross().unwrap());
//! let config = EngineConfig::new(["red", "green"], false);
//! let mut engine = InfluenceEngine::new(&layout, stencil, &config).unwrap();
//!
//! assert!(engine.claim(Coord::new(0, 0), 1).unwrap());
//! assert_eq!(engine.faction_index(), 1);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod topology;

pub use config::{BoardConfig, ConfigError, ScenarioConfig};
pub use error::{EngineError, GridError, GridResult, StencilEdge, TopologyError};

// Re-export key game types at crate root for convenience
pub use game::{
    EngineConfig, EngineSnapshot, Faction, FactionId, InfluenceEngine, InvariantViolation, Island,
    check_invariants,
};
pub use grid::{BitGrid, Coord, Grid, TypedGrid};
pub use topology::{
    GeneratedBoard, IslandLayout, MapGenError, Stencil, generate_board, generate_layout,
    is_valid_emptiness,
};
