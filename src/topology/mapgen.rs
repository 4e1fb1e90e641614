//! Random board generation.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::BoardConfig;
use crate::error::{EngineError, GridError};
use crate::game::{EngineConfig, InfluenceEngine};
use crate::grid::Coord;
use crate::topology::{IslandLayout, Stencil};

/// Error type for board generation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapGenError {
    /// Emptiness must be a probability.
    #[error("emptiness {0} is outside [0, 1)")]
    InvalidEmptiness(f64),
    /// No generated layout produced a playable board.
    #[error("no playable board after {attempts} attempts (last error: {last})")]
    Exhausted {
        /// Layouts tried.
        attempts: u32,
        /// Why the final layout was rejected.
        last: EngineError,
    },
    /// The configuration itself is unusable, regardless of layout.
    #[error(transparent)]
    Engine(EngineError),
    /// Layout storage failure.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A freshly generated, playable board.
#[derive(Debug, Clone)]
pub struct GeneratedBoard {
    /// The engine, ready for the first claim.
    pub engine: InfluenceEngine,
    /// The layout the engine was built from.
    pub layout: IslandLayout,
    /// Number of layouts drawn, including the accepted one.
    pub attempts: u32,
}

/// Draw a frozen random layout: each cell holds an island when a uniform
/// sample in `[0, 1)` exceeds `emptiness`.
///
/// # Errors
///
/// Fails for zero dimensions or an emptiness outside `[0, 1)`.
pub fn generate_layout<R: Rng + ?Sized>(
    rows: usize,
    columns: usize,
    emptiness: f64,
    rng: &mut R,
) -> Result<IslandLayout, MapGenError> {
    if !is_valid_emptiness(emptiness) {
        return Err(MapGenError::InvalidEmptiness(emptiness));
    }
    let mut layout = IslandLayout::new(rows, columns)?;
    let cells: Vec<Coord> = layout.iter().map(|(coord, _)| coord).collect();
    for coord in cells {
        if rng.r#gen::<f64>() > emptiness {
            layout.set(coord, true)?;
        }
    }
    layout.freeze();
    Ok(layout)
}

/// Whether `emptiness` lies in `[0, 1)`. At 1.0 no cell can hold an island.
#[must_use]
pub fn is_valid_emptiness(emptiness: f64) -> bool {
    (0.0..1.0).contains(&emptiness)
}

/// Generate layouts from `seed` until one yields a valid engine.
///
/// Layouts that leave an island without friends, split into several groups,
/// or hold no island at all are discarded and redrawn, up to
/// `board.max_attempts` times. The same inputs always produce the same board.
///
/// # Errors
///
/// Returns [`MapGenError::Exhausted`] when every attempt was rejected, or
/// [`MapGenError::Engine`] when the faction list itself is invalid.
pub fn generate_board(
    board: &BoardConfig,
    engine: &EngineConfig,
    stencil: &Arc<Stencil>,
    seed: u64,
) -> Result<GeneratedBoard, MapGenError> {
    if engine.factions.len() < 2 {
        return Err(MapGenError::Engine(EngineError::TooFewFactions(
            engine.factions.len(),
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut last = EngineError::NoIslands;
    for attempt in 1..=board.max_attempts {
        let layout = generate_layout(board.rows, board.columns, board.emptiness, &mut rng)?;
        match InfluenceEngine::new(&layout, Arc::clone(stencil), engine) {
            Ok(built) => {
                debug!(seed, attempt, islands = built.total_islands(), "mapgen.accepted");
                return Ok(GeneratedBoard {
                    engine: built,
                    layout,
                    attempts: attempt,
                });
            }
            Err(err) => {
                warn!(seed, attempt, error = %err, "mapgen.rejected");
                last = err;
            }
        }
    }
    Err(MapGenError::Exhausted {
        attempts: board.max_attempts,
        last,
    })
}
