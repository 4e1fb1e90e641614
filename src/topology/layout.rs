//! Island placement maps.

use std::fmt;
use std::ops::Deref;

use crate::error::GridResult;
use crate::grid::{BitGrid, Coord};

/// A boolean map of which cells hold an island.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandLayout {
    bits: BitGrid,
}

impl IslandLayout {
    /// Create a thawed layout with no islands.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> GridResult<Self> {
        Ok(Self {
            bits: BitGrid::new(rows, columns)?,
        })
    }

    /// Build a frozen layout from `#` (island) / `.` (water) rows.
    ///
    /// # Errors
    ///
    /// Fails on empty, ragged or malformed rows.
    pub fn from_rows(rows: &[&str]) -> GridResult<Self> {
        let mut bits = BitGrid::from_rows(rows)?;
        bits.freeze();
        Ok(Self { bits })
    }

    /// Place or remove an island.
    ///
    /// # Errors
    ///
    /// Fails for out-of-bounds coordinates or a frozen layout.
    pub fn set(&mut self, coord: Coord, island: bool) -> GridResult<()> {
        self.bits.set(coord, island)
    }

    /// Iterate over island coordinates in row-major order.
    pub fn islands(&self) -> impl Iterator<Item = Coord> + '_ {
        self.bits.active()
    }

    /// Make the layout read-only.
    pub fn freeze(&mut self) {
        self.bits.freeze();
    }

    /// Make the layout mutable again.
    pub fn thaw(&mut self) {
        self.bits.thaw();
    }
}

impl Deref for IslandLayout {
    type Target = BitGrid;

    fn deref(&self) -> &BitGrid {
        &self.bits
    }
}

impl fmt::Display for IslandLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.bits, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_layout_islands() {
        let layout = IslandLayout::from_rows(&[".#", "#."]).unwrap();
        assert!(layout.is_frozen());
        assert_eq!(
            layout.islands().collect::<Vec<_>>(),
            vec![Coord::new(0, 1), Coord::new(1, 0)]
        );
        assert_eq!(layout.count_active(), 2);
    }

    #[test]
    fn test_layout_freeze_cycle() {
        let mut layout = IslandLayout::new(2, 2).unwrap();
        layout.set(Coord::new(0, 0), true).unwrap();
        layout.freeze();
        assert_eq!(layout.set(Coord::new(1, 1), true), Err(GridError::Frozen));
        layout.thaw();
        layout.set(Coord::new(1, 1), true).unwrap();
        assert_eq!(layout.to_string(), "#.\n.#");
    }
}
