//! Error types for the influence engine.
//!
//! Every error here is a construction-time or contract violation. Illegal
//! moves are not errors: the engine ignores them.

use thiserror::Error;

use crate::grid::Coord;

/// Failures of grid storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A coordinate fell outside the grid.
    #[error("coordinate {coord} is outside a {rows}x{columns} grid")]
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        columns: usize,
    },
    /// A value of the wrong element kind was written into a typed grid.
    #[error("type mismatch: grid holds `{expected}`, got `{found}`")]
    TypeMismatch {
        /// Element kind declared by the grid.
        expected: &'static str,
        /// Kind of the rejected value, when known.
        found: &'static str,
    },
    /// The grid is frozen and rejects mutation.
    #[error("grid is frozen")]
    Frozen,
    /// A grid needs at least one row and one column.
    #[error("invalid grid dimensions {rows}x{columns}")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        columns: usize,
    },
}

/// Which border of a stencil failed edge-coverage validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilEdge {
    /// Row 0.
    FirstRow,
    /// Column 0.
    FirstColumn,
    /// The last row (only checked when there is more than one row).
    LastRow,
    /// The last column (only checked when there is more than one column).
    LastColumn,
}

impl std::fmt::Display for StencilEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FirstRow => "first row",
            Self::FirstColumn => "first column",
            Self::LastRow => "last row",
            Self::LastColumn => "last column",
        };
        f.write_str(name)
    }
}

/// Failures while building stencils, layouts and neighbor lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A stencil edge has no active cell.
    #[error("invalid stencil: {edge} has no active cell")]
    InvalidStencil {
        /// The empty edge.
        edge: StencilEdge,
    },
    /// The stencil center lies outside the stencil.
    #[error("stencil center {center} is outside a {rows}x{columns} stencil")]
    CenterOutOfBounds {
        /// Requested center.
        center: Coord,
        /// Stencil row count.
        rows: usize,
        /// Stencil column count.
        columns: usize,
    },
    /// A layout or stencil was used before being frozen.
    #[error("{0} must be frozen before use")]
    NotFrozen(&'static str),
    /// An occupied cell has no friends under the stencil.
    #[error("island at {coord} has no neighbors")]
    NoNeighbors {
        /// The isolated cell.
        coord: Coord,
    },
    /// Underlying grid failure.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Failures of engine construction and turn rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A game needs at least two factions.
    #[error("at least two factions are required, got {0}")]
    TooFewFactions(usize),
    /// The layout has no occupied cell.
    #[error("layout has no islands")]
    NoIslands,
    /// Not every island can reach every other island.
    #[error("board is disconnected: reached {reached} of {total} islands")]
    Disconnected {
        /// Islands reached from the first island.
        reached: usize,
        /// Total islands on the board.
        total: usize,
    },
    /// Turn rotation went all the way around without finding a faction able to move.
    #[error("no faction is able to move (rotation started at faction {start})")]
    NoEligibleFaction {
        /// Faction index the rotation started from.
        start: usize,
    },
    /// Underlying topology failure.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// Underlying grid failure.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;
