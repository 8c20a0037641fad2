//! This module defines the error types used by the `gridpath-navigation` crate.

#![warn(missing_docs)]

use crate::map::point_types::WorldPoint;

/// Error type for grid and pathfinding operations.
///
/// Construction errors (`InvalidDimensions`, `InvalidCellSize`) are fatal and
/// surface from [`crate::Pathfinder::new`] / [`crate::Grid::new`]. The remaining
/// variants are local, typed outcomes handed back to the immediate caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    /// Column or row count is zero, or their product overflows.
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(&'static str),
    /// Cell size is not a positive, finite number.
    #[error("Invalid cell size: {0}")]
    InvalidCellSize(&'static str),
    /// A search endpoint maps outside the grid. The search is not attempted.
    #[error("Search endpoint ({x}, {y}) lies outside the grid")]
    InvalidEndpoint {
        /// World x of the rejected position.
        x: f32,
        /// World y of the rejected position.
        y: f32,
    },
    /// A cell access or mutation was addressed outside the grid.
    #[error("Grid access out of bounds: ({column}, {row})")]
    BoundaryViolation {
        /// Requested column.
        column: i32,
        /// Requested row.
        row: i32,
    },
    /// The open set was exhausted without discovering the target.
    #[error("No path found after exploring {nodes_explored} cells")]
    NoPathFound {
        /// Number of cells closed before giving up.
        nodes_explored: usize,
    },
}

impl NavigationError {
    /// Builds an [`NavigationError::InvalidEndpoint`] for a world position.
    pub fn invalid_endpoint(position: WorldPoint) -> Self {
        NavigationError::InvalidEndpoint {
            x: position.x,
            y: position.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = NavigationError::BoundaryViolation { column: -1, row: 7 };
        assert_eq!(err.to_string(), "Grid access out of bounds: (-1, 7)");

        let err = NavigationError::invalid_endpoint(WorldPoint::new(12.5, -3.0));
        assert_eq!(
            err.to_string(),
            "Search endpoint (12.5, -3) lies outside the grid"
        );

        let err = NavigationError::NoPathFound { nodes_explored: 4 };
        assert!(err.to_string().contains("4 cells"));
    }
}
