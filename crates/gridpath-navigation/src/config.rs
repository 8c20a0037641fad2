//! Engine configuration.

#![warn(missing_docs)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::map::grid::validate_dimensions;
use crate::map::point_types::WorldPoint;

/// Grid shape and movement rules for a [`Pathfinder`](crate::Pathfinder).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// Number of columns.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
    /// World units per cell.
    pub cell_size: f32,
    /// World position of the grid's center.
    pub origin: WorldPoint,
    /// Expand 8 neighbors instead of 4.
    pub diagonal_movement: bool,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
            cell_size: 1.0,
            origin: WorldPoint::origin(),
            diagonal_movement: true,
        }
    }
}

impl PathfinderConfig {
    /// Creates a configuration for a `columns x rows` grid with default cell size,
    /// origin and diagonal movement.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Sets the cell size.
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the world origin.
    #[must_use]
    pub fn with_origin(mut self, origin: WorldPoint) -> Self {
        self.origin = origin;
        self
    }

    /// Enables or disables diagonal movement.
    #[must_use]
    pub fn with_diagonal_movement(mut self, diagonal_movement: bool) -> Self {
        self.diagonal_movement = diagonal_movement;
        self
    }

    /// Checks the parameters a grid would reject.
    pub fn validate(&self) -> Result<(), NavigationError> {
        validate_dimensions(self.columns, self.rows, self.cell_size).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = PathfinderConfig::new(5, 7)
            .with_cell_size(0.5)
            .with_origin(WorldPoint::new(1.0, -1.0))
            .with_diagonal_movement(false);
        assert_eq!(config.columns, 5);
        assert_eq!(config.rows, 7);
        assert_eq!(config.cell_size, 0.5);
        assert_eq!(config.origin, WorldPoint::new(1.0, -1.0));
        assert!(!config.diagonal_movement);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            PathfinderConfig::new(0, 3).validate(),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            PathfinderConfig::new(3, 3).with_cell_size(-1.0).validate(),
            Err(NavigationError::InvalidCellSize(_))
        ));
        assert!(matches!(
            PathfinderConfig::new(3, i32::MAX as usize + 1).validate(),
            Err(NavigationError::InvalidDimensions(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_defaults() {
        let config: PathfinderConfig =
            serde_json::from_str(r#"{ "columns": 4, "origin": [2.0, 3.0] }"#).unwrap();
        assert_eq!(config.columns, 4);
        assert_eq!(config.rows, 10);
        assert_eq!(config.origin, WorldPoint::new(2.0, 3.0));
        assert!(config.diagonal_movement);
    }
}
