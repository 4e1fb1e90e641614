//! Bounded 2-D containers.
//!
//! - [`Grid`]: row-major storage of optional values with a freeze switch
//! - [`TypedGrid`]: a grid bound to one element kind, with deep duplication
//! - [`BitGrid`]: a typed grid of booleans defaulting to `false`

mod bits;
mod matrix;
mod typed;

pub use bits::BitGrid;
pub use matrix::Grid;
pub use typed::TypedGrid;

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A (row, column) position.
///
/// Coordinates are signed so that offsets computed from a stencil may point
/// outside a grid; every grid operation rejects such positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0 is the top row).
    pub row: i32,
    /// Column index (0 is the leftmost column).
    pub column: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

impl Add for Coord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.column + rhs.column)
    }
}

impl Sub for Coord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.column - rhs.column)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_arithmetic() {
        let a = Coord::new(2, 3);
        let b = Coord::new(1, 1);
        assert_eq!(a + b, Coord::new(3, 4));
        assert_eq!(b - a, Coord::new(-1, -2));
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(Coord::new(4, -1).to_string(), "(4, -1)");
        assert_eq!(Coord::from((0, 7)), Coord::new(0, 7));
    }
}
