//! Cell and world coordinate types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in world coordinates.
pub type WorldPoint = nalgebra::Point2<f32>;

/// Represents a cell address in grid coordinates.
///
/// Components are signed so that world positions left of or below the grid
/// still map to a well-defined (invalid) index instead of wrapping.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridIndex {
    /// The column (x) index in the grid.
    pub column: i32,
    /// The row (y) index in the grid.
    pub row: i32,
}

impl GridIndex {
    /// Creates a new `GridIndex`.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Returns the index shifted by `(d_column, d_row)`.
    #[must_use]
    pub const fn offset(self, d_column: i32, d_row: i32) -> Self {
        Self {
            column: self.column + d_column,
            row: self.row + d_row,
        }
    }
}

impl From<(i32, i32)> for GridIndex {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

impl From<[i32; 2]> for GridIndex {
    fn from([column, row]: [i32; 2]) -> Self {
        Self::new(column, row)
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}
