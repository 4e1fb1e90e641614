//! Relative neighbor patterns.

use std::fmt;
use std::ops::Deref;

use crate::error::{StencilEdge, TopologyError};
use crate::grid::{BitGrid, Coord};
use crate::topology::IslandLayout;

/// A boolean offset pattern with a designated center cell.
///
/// Every active cell `s` stands for the offset `s - center`. Freezing checks
/// that the first row and column (and the last ones, when distinct) each hold
/// an active cell, so the pattern's bounding box is tight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stencil {
    bits: BitGrid,
    center: Coord,
}

impl Stencil {
    /// Create an empty, thawed stencil.
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero or `center` lies outside the stencil.
    pub fn new(rows: usize, columns: usize, center: Coord) -> Result<Self, TopologyError> {
        let bits = BitGrid::new(rows, columns)?;
        if !bits.in_bounds(center) {
            return Err(TopologyError::CenterOutOfBounds {
                center,
                rows,
                columns,
            });
        }
        Ok(Self { bits, center })
    }

    /// Build a frozen stencil from `#`/`.` rows.
    ///
    /// # Errors
    ///
    /// Fails on malformed rows, a bad center, or an empty edge.
    pub fn from_rows(rows: &[&str], center: Coord) -> Result<Self, TopologyError> {
        let bits = BitGrid::from_rows(rows)?;
        if !bits.in_bounds(center) {
            return Err(TopologyError::CenterOutOfBounds {
                center,
                rows: bits.rows(),
                columns: bits.columns(),
            });
        }
        let mut stencil = Self { bits, center };
        stencil.freeze()?;
        Ok(stencil)
    }

    /// The four orthogonal neighbors: a frozen 3x3 plus shape centered at (1, 1).
    ///
    /// # Errors
    ///
    /// Same as [`Stencil::from_rows`].
    pub fn cross() -> Result<Self, TopologyError> {
        Self::from_rows(&[".#.", "#.#", ".#."], Coord::new(1, 1))
    }

    /// The designated center cell.
    #[must_use]
    pub const fn center(&self) -> Coord {
        self.center
    }

    /// Activate or clear a pattern cell.
    ///
    /// # Errors
    ///
    /// Fails for out-of-bounds coordinates or a frozen stencil.
    pub fn set(&mut self, coord: Coord, active: bool) -> Result<(), TopologyError> {
        self.bits.set(coord, active)?;
        Ok(())
    }

    /// Validate edge coverage and make the stencil read-only.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidStencil`] naming the first empty edge.
    pub fn freeze(&mut self) -> Result<(), TopologyError> {
        let last_row = i32::try_from(self.bits.rows()).unwrap_or(i32::MAX) - 1;
        let last_column = i32::try_from(self.bits.columns()).unwrap_or(i32::MAX) - 1;

        let checks = [
            (StencilEdge::FirstRow, true, self.bits.row_has_active(0)),
            (StencilEdge::FirstColumn, true, self.bits.column_has_active(0)),
            (StencilEdge::LastRow, last_row > 0, self.bits.row_has_active(last_row)),
            (
                StencilEdge::LastColumn,
                last_column > 0,
                self.bits.column_has_active(last_column),
            ),
        ];
        if let Some((edge, _, _)) = checks
            .into_iter()
            .find(|&(_, required, covered)| required && !covered)
        {
            return Err(TopologyError::InvalidStencil { edge });
        }

        self.bits.freeze();
        Ok(())
    }

    /// Make the stencil mutable again.
    pub fn thaw(&mut self) {
        self.bits.thaw();
    }

    /// Offsets of the active cells relative to the center, in row-major order.
    pub fn offsets(&self) -> impl Iterator<Item = Coord> + '_ {
        self.bits.active().map(move |cell| cell - self.center)
    }

    /// Absolute coordinates of the friends of `key` on `layout`.
    ///
    /// A friend is `key + offset` for every stencil offset that lands inside
    /// the layout on an occupied cell. The order follows the stencil.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoNeighbors`] if no offset qualifies.
    pub fn friends_of(&self, layout: &IslandLayout, key: Coord) -> Result<Vec<Coord>, TopologyError> {
        let mut friends = Vec::new();
        for offset in self.offsets() {
            let target = key + offset;
            if layout.in_bounds(target) && layout.get(target)? {
                friends.push(target);
            }
        }
        if friends.is_empty() {
            return Err(TopologyError::NoNeighbors { coord: key });
        }
        Ok(friends)
    }
}

impl Deref for Stencil {
    type Target = BitGrid;

    fn deref(&self) -> &BitGrid {
        &self.bits
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (coord, bit) in self.bits.iter() {
            if coord.column == 0 && coord.row > 0 {
                writeln!(f)?;
            }
            let glyph = match (coord == self.center, bit) {
                (true, true) => "@",
                (true, false) => "o",
                (false, true) => "#",
                (false, false) => ".",
            };
            f.write_str(glyph)?;
        }
        Ok(())
    }
}
