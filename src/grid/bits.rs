//! Boolean occupancy maps.

use std::fmt;

use crate::error::{GridError, GridResult};
use crate::grid::{Coord, TypedGrid};

/// A typed grid of booleans where every cell defaults to `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    cells: TypedGrid<bool>,
}

impl BitGrid {
    /// Create a thawed grid with every cell `false`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> GridResult<Self> {
        let mut cells = TypedGrid::new(rows, columns)?;
        let coords: Vec<Coord> = cells.iter().map(|(coord, _)| coord).collect();
        for coord in coords {
            cells.set(coord, false)?;
        }
        Ok(Self { cells })
    }

    /// Parse rows of `#` (set) and `.` (clear) characters.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] for empty input or ragged
    /// rows, and [`GridError::TypeMismatch`] for any other character.
    pub fn from_rows(rows: &[&str]) -> GridResult<Self> {
        let columns = rows.first().map_or(0, |row| row.chars().count());
        if rows.iter().any(|row| row.chars().count() != columns) {
            return Err(GridError::InvalidDimensions {
                rows: rows.len(),
                columns,
            });
        }

        let mut grid = Self::new(rows.len(), columns)?;
        for (r, line) in (0i32..).zip(rows) {
            for (c, ch) in (0i32..).zip(line.chars()) {
                let bit = match ch {
                    '#' => true,
                    '.' => false,
                    _ => {
                        return Err(GridError::TypeMismatch {
                            expected: "bool",
                            found: "char",
                        });
                    }
                };
                grid.set(Coord::new(r, c), bit)?;
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.columns()
    }

    /// Check if a coordinate lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.cells.in_bounds(coord)
    }

    /// Read a cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn get(&self, coord: Coord) -> GridResult<bool> {
        Ok(self.cells.get(coord)?.copied().unwrap_or(false))
    }

    /// Write a cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for bad coordinates and
    /// [`GridError::Frozen`] if the grid is frozen.
    pub fn set(&mut self, coord: Coord, bit: bool) -> GridResult<()> {
        self.cells.set(coord, bit)?;
        Ok(())
    }

    /// Reset a cell to `false`.
    ///
    /// # Errors
    ///
    /// Same as [`BitGrid::set`].
    pub fn clear(&mut self, coord: Coord) -> GridResult<()> {
        self.set(coord, false)
    }

    /// Iterate over every cell in row-major order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Coord, bool)> + '_ {
        self.cells
            .iter()
            .map(|(coord, bit)| (coord, bit.copied().unwrap_or(false)))
    }

    /// Iterate over set cells in row-major order.
    pub fn active(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter().filter_map(|(coord, bit)| bit.then_some(coord))
    }

    /// Number of set cells.
    #[must_use]
    pub fn count_active(&self) -> usize {
        self.active().count()
    }

    /// Whether any cell in `row` is set.
    #[must_use]
    pub fn row_has_active(&self, row: i32) -> bool {
        self.active().any(|coord| coord.row == row)
    }

    /// Whether any cell in `column` is set.
    #[must_use]
    pub fn column_has_active(&self, column: i32) -> bool {
        self.active().any(|coord| coord.column == column)
    }

    /// Whether the grid currently rejects mutation.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.cells.is_frozen()
    }

    /// Make the grid read-only.
    pub fn freeze(&mut self) {
        self.cells.freeze();
    }

    /// Make the grid mutable again.
    pub fn thaw(&mut self) {
        self.cells.thaw();
    }

    /// Produce an independent, thawed copy.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            cells: self.cells.duplicate(),
        }
    }
}

impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (coord, bit) in self.iter() {
            if coord.column == 0 && coord.row > 0 {
                writeln!(f)?;
            }
            f.write_str(if bit { "#" } else { "." })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitgrid_defaults_false() {
        let grid = BitGrid::new(2, 3).unwrap();
        assert!(grid.iter().all(|(_, bit)| !bit));
        assert_eq!(grid.count_active(), 0);
    }

    #[test]
    fn test_bitgrid_from_rows() {
        let grid = BitGrid::from_rows(&["#.", ".#", "##"]).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 2);
        assert!(grid.get(Coord::new(0, 0)).unwrap());
        assert!(!grid.get(Coord::new(0, 1)).unwrap());
        assert_eq!(grid.count_active(), 4);
        assert_eq!(grid.to_string(), "#.\n.#\n##");
    }

    #[test]
    fn test_bitgrid_from_rows_rejects_bad_input() {
        assert!(matches!(
            BitGrid::from_rows(&["#.", "#"]),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            BitGrid::from_rows(&["#x"]),
            Err(GridError::TypeMismatch { .. })
        ));
        assert!(BitGrid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_bitgrid_edges() {
        let grid = BitGrid::from_rows(&["...", ".#.", "..."]).unwrap();
        assert!(grid.row_has_active(1));
        assert!(!grid.row_has_active(0));
        assert!(grid.column_has_active(1));
        assert!(!grid.column_has_active(2));
    }

    #[test]
    fn test_bitgrid_frozen() {
        let mut grid = BitGrid::new(1, 1).unwrap();
        grid.freeze();
        assert_eq!(grid.set(Coord::new(0, 0), true), Err(GridError::Frozen));

        let mut copy = grid.duplicate();
        assert!(copy.set(Coord::new(0, 0), true).is_ok());
        assert!(!grid.get(Coord::new(0, 0)).unwrap());

        copy.clear(Coord::new(0, 0)).unwrap();
        assert_eq!(copy.count_active(), 0);
    }
}
