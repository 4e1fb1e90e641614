//! Row-major grid storage.

// Cell indices are bounded by the grid size, which is checked on construction
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use std::fmt;

use crate::error::{GridError, GridResult};
use crate::grid::Coord;

/// A fixed-size 2-D container of optional values.
///
/// Cells are stored in row-major order. A frozen grid rejects every mutation
/// with [`GridError::Frozen`] until it is thawed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    columns: usize,
    /// Cells stored in row-major order.
    cells: Vec<Option<T>>,
    /// Whether mutation is currently rejected.
    frozen: bool,
}

impl<T> Grid<T> {
    /// Create an empty, thawed grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero
    /// or the grid could not be addressed with `i32` coordinates.
    pub fn new(rows: usize, columns: usize) -> GridResult<Self> {
        let addressable = i32::try_from(rows).is_ok() && i32::try_from(columns).is_ok();
        if rows == 0 || columns == 0 || !addressable {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        let size = rows
            .checked_mul(columns)
            .ok_or(GridError::InvalidDimensions { rows, columns })?;
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, || None);

        Ok(Self {
            rows,
            columns,
            cells,
            frozen: false,
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells (`rows * columns`), occupied or not.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid currently rejects mutation.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Make the grid read-only.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Make the grid mutable again.
    pub fn thaw(&mut self) {
        self.frozen = false;
    }

    /// Check if a coordinate lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.offset(coord).is_ok()
    }

    fn offset(&self, coord: Coord) -> GridResult<usize> {
        let row = usize::try_from(coord.row).ok().filter(|&r| r < self.rows);
        let column = usize::try_from(coord.column).ok().filter(|&c| c < self.columns);
        match (row, column) {
            (Some(row), Some(column)) => Ok(row * self.columns + column),
            _ => Err(GridError::OutOfBounds {
                coord,
                rows: self.rows,
                columns: self.columns,
            }),
        }
    }

    fn coord_at(&self, index: usize) -> Coord {
        Coord::new((index / self.columns) as i32, (index % self.columns) as i32)
    }

    fn ensure_thawed(&self) -> GridResult<()> {
        if self.frozen {
            Err(GridError::Frozen)
        } else {
            Ok(())
        }
    }

    /// Read the value at a coordinate (`None` for an empty cell).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates outside the grid.
    pub fn get(&self, coord: Coord) -> GridResult<Option<&T>> {
        let index = self.offset(coord)?;
        Ok(self.cells[index].as_ref())
    }

    /// Mutable access to the value at a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for bad coordinates and
    /// [`GridError::Frozen`] if the grid is frozen.
    pub fn get_mut(&mut self, coord: Coord) -> GridResult<Option<&mut T>> {
        let index = self.offset(coord)?;
        self.ensure_thawed()?;
        Ok(self.cells[index].as_mut())
    }

    /// Store a value, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for bad coordinates and
    /// [`GridError::Frozen`] if the grid is frozen.
    pub fn set(&mut self, coord: Coord, value: T) -> GridResult<Option<T>> {
        self.replace(coord, Some(value))
    }

    /// Empty a cell, returning the value it held.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for bad coordinates and
    /// [`GridError::Frozen`] if the grid is frozen.
    pub fn remove(&mut self, coord: Coord) -> GridResult<Option<T>> {
        self.replace(coord, None)
    }

    /// Store a value or empty a cell, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for bad coordinates and
    /// [`GridError::Frozen`] if the grid is frozen.
    pub fn replace(&mut self, coord: Coord, value: Option<T>) -> GridResult<Option<T>> {
        let index = self.offset(coord)?;
        self.ensure_thawed()?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Iterate over every cell in row-major order.
    ///
    /// The iterator is double-ended; `.rev()` walks from the last row and
    /// column back to `(0, 0)`.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Coord, Option<&T>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.coord_at(index), cell.as_ref()))
    }

    /// Iterate over every cell in reverse row-major order.
    pub fn iter_rev(&self) -> impl Iterator<Item = (Coord, Option<&T>)> + '_ {
        self.iter().rev()
    }

    /// Iterate over occupied cells only, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.iter().filter_map(|(coord, cell)| cell.map(|value| (coord, value)))
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Build a new thawed grid by transforming every occupied cell.
    #[must_use]
    pub fn map<U>(&self, mut f: impl FnMut(Coord, &T) -> U) -> Grid<U> {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| cell.as_ref().map(|value| f(self.coord_at(index), value)))
            .collect();
        Grid {
            rows: self.rows,
            columns: self.columns,
            cells,
            frozen: false,
        }
    }
}

impl<T: PartialEq> Grid<T> {
    /// Check if any cell holds a value equal to `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.cells.iter().flatten().any(|cell| cell == value)
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    /// Render the grid as a table.
    ///
    /// Columns are separated by `|` and rows by `-`/`+` rules. Every column
    /// is padded to its widest line and multi-line values keep their lines
    /// aligned. Empty cells render blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|cell| match cell {
                Some(value) => value
                    .to_string()
                    .replace("\r\n", "\n")
                    .replace('\r', "\n")
                    .split('\n')
                    .map(str::to_owned)
                    .collect(),
                None => vec![String::new()],
            })
            .collect();

        let mut heights = vec![0usize; self.rows];
        let mut widths = vec![0usize; self.columns];
        for (index, lines) in text.iter().enumerate() {
            let (row, column) = (index / self.columns, index % self.columns);
            heights[row] = heights[row].max(lines.len());
            let widest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
            widths[column] = widths[column].max(widest);
        }

        let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
        let rule = rule.join("+");

        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "{rule}")?;
            }
            for line in 0..heights[row] {
                if line > 0 {
                    writeln!(f)?;
                }
                for (column, &width) in widths.iter().enumerate() {
                    if column > 0 {
                        f.write_str("|")?;
                    }
                    let lines = &text[row * self.columns + column];
                    let piece = lines.get(line).map_or("", String::as_str);
                    write!(f, "{piece:<width$}")?;
                }
            }
        }
        Ok(())
    }
}
