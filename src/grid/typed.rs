//! Grids bound to a single element kind.

use std::any::{Any, type_name};
use std::ops::{Deref, DerefMut};

use crate::error::{GridError, GridResult};
use crate::grid::{Coord, Grid};

/// A [`Grid`] whose cells are either empty or hold a value of kind `T`.
///
/// Statically typed writes go through the underlying [`Grid`] (reachable via
/// `Deref`). Values arriving as `dyn Any` are checked against the declared
/// kind by [`TypedGrid::insert_boxed`] and rejected with
/// [`GridError::TypeMismatch`] when they do not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedGrid<T> {
    inner: Grid<T>,
}

impl<T: 'static> TypedGrid<T> {
    /// Create an empty, thawed typed grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> GridResult<Self> {
        Ok(Self {
            inner: Grid::new(rows, columns)?,
        })
    }

    /// Name of the element kind this grid accepts.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        type_name::<T>()
    }

    /// Store a value of any type, checking it against the grid's kind.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TypeMismatch`] if `V` is not `T`, plus the
    /// errors of [`Grid::set`].
    pub fn insert_value<V: Any>(&mut self, coord: Coord, value: V) -> GridResult<Option<T>> {
        let boxed: Box<dyn Any> = Box::new(value);
        match boxed.downcast::<T>() {
            Ok(value) => self.inner.set(coord, *value),
            Err(_) => Err(GridError::TypeMismatch {
                expected: type_name::<T>(),
                found: type_name::<V>(),
            }),
        }
    }

    /// Store a type-erased value or empty the cell.
    ///
    /// `None` is always accepted and empties the cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TypeMismatch`] if the value is not a `T`, plus
    /// the errors of [`Grid::replace`].
    pub fn insert_boxed(
        &mut self,
        coord: Coord,
        value: Option<Box<dyn Any>>,
    ) -> GridResult<Option<T>> {
        let value = match value {
            Some(boxed) => Some(*boxed.downcast::<T>().map_err(|_| GridError::TypeMismatch {
                expected: type_name::<T>(),
                found: "dyn Any",
            })?),
            None => None,
        };
        self.inner.replace(coord, value)
    }

    /// Consume the wrapper and return the plain grid.
    #[must_use]
    pub fn into_inner(self) -> Grid<T> {
        self.inner
    }
}

impl<T: Clone + 'static> TypedGrid<T> {
    /// Produce an independent, thawed deep copy.
    ///
    /// Every occupied cell is cloned; nothing is shared with the source.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut inner = self.inner.clone();
        inner.thaw();
        Self { inner }
    }
}

impl<T> Deref for TypedGrid<T> {
    type Target = Grid<T>;

    fn deref(&self) -> &Grid<T> {
        &self.inner
    }
}

impl<T> DerefMut for TypedGrid<T> {
    fn deref_mut(&mut self) -> &mut Grid<T> {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_grid_accepts_declared_kind() {
        let mut grid: TypedGrid<u32> = TypedGrid::new(2, 2).unwrap();
        grid.insert_value(Coord::new(0, 0), 5u32).unwrap();
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), Some(&5));
        assert_eq!(grid.kind(), "u32");
    }

    #[test]
    fn test_typed_grid_rejects_wrong_kind() {
        let mut grid: TypedGrid<u32> = TypedGrid::new(2, 2).unwrap();
        let err = grid.insert_value(Coord::new(0, 0), "five").unwrap_err();
        assert_eq!(
            err,
            GridError::TypeMismatch {
                expected: "u32",
                found: "&str"
            }
        );
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), None);

        let boxed: Box<dyn Any> = Box::new(1.5f64);
        assert!(matches!(
            grid.insert_boxed(Coord::new(1, 1), Some(boxed)),
            Err(GridError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_typed_grid_empty_always_accepted() {
        let mut grid: TypedGrid<u32> = TypedGrid::new(1, 1).unwrap();
        grid.set(Coord::new(0, 0), 3).unwrap();
        assert_eq!(grid.insert_boxed(Coord::new(0, 0), None).unwrap(), Some(3));
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), None);
    }

    #[test]
    fn test_typed_grid_bounds_checked() {
        let mut grid: TypedGrid<u32> = TypedGrid::new(1, 1).unwrap();
        let err = grid.insert_value(Coord::new(3, 0), 1u32).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut grid: TypedGrid<Vec<u8>> = TypedGrid::new(1, 2).unwrap();
        grid.set(Coord::new(0, 0), vec![1, 2]).unwrap();
        grid.freeze();

        let mut copy = grid.duplicate();
        assert!(!copy.is_frozen());
        copy.get_mut(Coord::new(0, 0)).unwrap().unwrap().push(3);

        assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), Some(&vec![1, 2]));
        assert_eq!(copy.get(Coord::new(0, 0)).unwrap(), Some(&vec![1, 2, 3]));

        let plain = copy.into_inner();
        assert_eq!(plain.occupied_count(), 1);
    }
}
