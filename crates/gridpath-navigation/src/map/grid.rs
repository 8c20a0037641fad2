//! Fixed-size 2D grid container with world-coordinate mapping.
//!
//! The grid is centered on its origin: the world origin falls on the middle of
//! the grid rather than on the corner of cell `(0, 0)`. Cells are stored in a
//! flat, row-major vector and are only mutated in place through the grid.

#![warn(missing_docs)]

use std::collections::HashSet;
use std::fmt;

use nalgebra::Vector2;
use tracing::warn;

use crate::error::NavigationError;
use crate::map::path_node::{GridCell, PathNode};
use crate::map::point_types::{GridIndex, WorldPoint};

/// Checks grid shape parameters and returns the total cell count.
///
/// Dimensions must be non-zero and fit a signed 32-bit index, the cell count must
/// not overflow, and the cell size must be positive and finite.
pub(crate) fn validate_dimensions(
    columns: usize,
    rows: usize,
    cell_size: f32,
) -> Result<usize, NavigationError> {
    if columns == 0 || rows == 0 {
        return Err(NavigationError::InvalidDimensions(
            "Columns and rows must be non-zero",
        ));
    }
    if i32::try_from(columns).is_err() || i32::try_from(rows).is_err() {
        return Err(NavigationError::InvalidDimensions(
            "Columns and rows must fit in a signed 32-bit index",
        ));
    }
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(NavigationError::InvalidCellSize(
            "Cell size must be positive and finite",
        ));
    }
    columns
        .checked_mul(rows)
        .ok_or(NavigationError::InvalidDimensions(
            "Grid dimensions too large, would cause overflow",
        ))
}

/// Generic 2D grid of cell records.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    /// Number of columns (x extent).
    columns: usize,
    /// Number of rows (y extent).
    rows: usize,
    /// World units per cell along both axes.
    cell_size: f32,
    /// World-space offset of the grid's center.
    origin: WorldPoint,
    /// Row-major cell storage, `columns * rows` long.
    data: Vec<T>,
    /// Returned by reads that fall outside the grid.
    neutral: T,
}

impl<T: GridCell + Clone + Default> Grid<T> {
    /// Creates a new grid, filling every slot with a copy of `template`.
    ///
    /// # Arguments
    /// * `columns` - Number of columns, must be non-zero
    /// * `rows` - Number of rows, must be non-zero
    /// * `cell_size` - World units per cell, must be positive and finite
    /// * `origin` - World position of the grid's center
    /// * `template` - Value copied into each slot (its index is overwritten)
    ///
    /// # Returns
    /// * `Result<Self, NavigationError>` - The grid or an error if parameters are invalid
    pub fn new(
        columns: usize,
        rows: usize,
        cell_size: f32,
        origin: WorldPoint,
        template: T,
    ) -> Result<Self, NavigationError> {
        let total_cells = validate_dimensions(columns, rows, cell_size)?;

        let mut grid = Grid {
            columns,
            rows,
            cell_size,
            origin,
            data: vec![template.clone(); total_cells],
            neutral: T::default(),
        };
        grid.clear_all(template);
        Ok(grid)
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// World units per cell.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of the grid's center.
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Total number of cells.
    pub fn total_cells(&self) -> usize {
        self.data.len()
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major view of every cell. Index fields must stay untouched.
    pub(crate) fn cells_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Flat storage offset for an in-bounds index.
    fn offset(&self, column: i32, row: i32) -> Option<usize> {
        if self.is_valid(column, row) {
            Some(row as usize * self.columns + column as usize)
        } else {
            None
        }
    }

    /// Pure bounds predicate.
    pub fn is_valid(&self, column: i32, row: i32) -> bool {
        column >= 0 && (column as usize) < self.columns && row >= 0 && (row as usize) < self.rows
    }

    /// Bounds predicate on a [`GridIndex`].
    pub fn contains(&self, index: GridIndex) -> bool {
        self.is_valid(index.column, index.row)
    }

    /// Bounds predicate on a world position. Non-finite positions are never valid.
    pub fn is_valid_world(&self, position: &WorldPoint) -> bool {
        position.x.is_finite() && position.y.is_finite() && self.contains(self.world_to_grid(position))
    }

    /// Converts a world position to the index of the cell containing it.
    ///
    /// The result is not bounds-checked; positions off the grid yield indices
    /// outside `[0, columns) x [0, rows)`. Non-finite positions map to
    /// `(i32::MIN, i32::MIN)`.
    pub fn world_to_grid(&self, position: &WorldPoint) -> GridIndex {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return GridIndex::new(i32::MIN, i32::MIN);
        }
        let normalized: Vector2<f32> = (*position - self.origin) / self.cell_size;
        let column = (normalized.x + self.columns as f32 * 0.5).floor();
        let row = (normalized.y + self.rows as f32 * 0.5).floor();
        GridIndex::new(column as i32, row as i32)
    }

    /// Converts a cell index to the world position of the cell's center.
    ///
    /// Returns the zero position, and logs a boundary violation, when the
    /// index is outside the grid.
    pub fn grid_to_world(&self, column: i32, row: i32) -> WorldPoint {
        if !self.check_bounds(column, row) {
            return WorldPoint::origin();
        }
        let half_extent = Vector2::new(
            (self.columns - 1) as f32 * self.cell_size * 0.5,
            (self.rows - 1) as f32 * self.cell_size * 0.5,
        );
        let scaled = Vector2::new(column as f32, row as f32) * self.cell_size;
        WorldPoint::from(scaled - half_extent) + self.origin.coords
    }

    /// Returns the cell at `(column, row)`, or the neutral record when out of bounds.
    pub fn get_cell(&self, column: i32, row: i32) -> &T {
        match self.try_get_cell(column, row) {
            Ok(cell) => cell,
            Err(e) => {
                warn!(column, row, "{}", e);
                &self.neutral
            }
        }
    }

    /// Returns the cell containing a world position, or the neutral record.
    pub fn get_cell_at_world(&self, position: &WorldPoint) -> &T {
        let index = self.world_to_grid(position);
        self.get_cell(index.column, index.row)
    }

    /// Fallible read that reports out-of-bounds access as an error.
    pub fn try_get_cell(&self, column: i32, row: i32) -> Result<&T, NavigationError> {
        self.offset(column, row)
            .map(|i| &self.data[i])
            .ok_or(NavigationError::BoundaryViolation { column, row })
    }

    /// Mutable access to an in-bounds cell.
    pub fn cell_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        let i = self.offset(index.column, index.row)?;
        Some(&mut self.data[i])
    }

    /// Overwrites the slot at `(column, row)`. Out-of-bounds writes are logged and ignored.
    pub fn set_cell(&mut self, column: i32, row: i32, value: T) {
        if let Err(e) = self.try_set_cell(column, row, value) {
            warn!(column, row, "{}", e);
        }
    }

    /// Overwrites the slot containing a world position.
    pub fn set_cell_at_world(&mut self, position: &WorldPoint, value: T) {
        let index = self.world_to_grid(position);
        self.set_cell(index.column, index.row, value);
    }

    /// Fallible write. The stored value's index is forced to the slot coordinate.
    pub fn try_set_cell(&mut self, column: i32, row: i32, mut value: T) -> Result<(), NavigationError> {
        let i = self
            .offset(column, row)
            .ok_or(NavigationError::BoundaryViolation { column, row })?;
        value.set_index(GridIndex::new(column, row));
        self.data[i] = value;
        Ok(())
    }

    /// Reassigns every slot to a copy of `value`, with indices fixed to slot coordinates.
    pub fn clear_all(&mut self, value: T) {
        let columns = self.columns;
        for (i, slot) in self.data.iter_mut().enumerate() {
            let mut cell = value.clone();
            cell.set_index(GridIndex::new((i % columns) as i32, (i / columns) as i32));
            *slot = cell;
        }
    }

    /// Like [`Grid::is_valid`], but logs the violation.
    fn check_bounds(&self, column: i32, row: i32) -> bool {
        let in_bounds = self.is_valid(column, row);
        if !in_bounds {
            warn!(
                column,
                row, "Position ({}, {}) is outside of the grid boundaries", column, row
            );
        }
        in_bounds
    }
}

impl Grid<PathNode> {
    /// Renders the grid with a path overlay, top row first.
    ///
    /// `S` start, `T` target, `*` path cell, `#` unwalkable, `.` walkable.
    pub fn render_path(&self, path: &[GridIndex]) -> String {
        let on_path: HashSet<GridIndex> = path.iter().copied().collect();
        let mut out = String::with_capacity((self.columns * 2 + 1) * self.rows);
        for row in (0..self.rows as i32).rev() {
            for column in 0..self.columns as i32 {
                let index = GridIndex::new(column, row);
                let symbol = if path.first() == Some(&index) {
                    'S'
                } else if path.last() == Some(&index) {
                    'T'
                } else if on_path.contains(&index) {
                    '*'
                } else if self.get_cell(column, row).walkable {
                    '.'
                } else {
                    '#'
                };
                out.push(symbol);
                out.push(' ');
            }
            out.pop();
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid<PathNode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid ({}x{}, cell size: {:.3}, origin: ({:.3}, {:.3}))",
            self.columns, self.rows, self.cell_size, self.origin.x, self.origin.y
        )?;
        write!(f, "{}", self.render_path(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: usize, rows: usize, cell_size: f32, origin: WorldPoint) -> Grid<PathNode> {
        Grid::new(columns, rows, cell_size, origin, PathNode::new(true)).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let g = grid(10, 6, 0.5, WorldPoint::new(1.0, 2.0));
        assert_eq!(g.columns(), 10);
        assert_eq!(g.rows(), 6);
        assert_eq!(g.cell_size(), 0.5);
        assert_eq!(g.origin(), WorldPoint::new(1.0, 2.0));
        assert_eq!(g.total_cells(), 60);
    }

    #[test]
    fn test_invalid_creation() {
        let origin = WorldPoint::origin();
        assert!(matches!(
            Grid::new(0, 10, 1.0, origin, PathNode::new(true)),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::new(10, 0, 1.0, origin, PathNode::new(true)),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            Grid::new(10, 10, 0.0, origin, PathNode::new(true)),
            Err(NavigationError::InvalidCellSize(_))
        ));
        assert!(matches!(
            Grid::new(10, 10, f32::NAN, origin, PathNode::new(true)),
            Err(NavigationError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn test_dimensions_must_fit_index() {
        let too_wide = i32::MAX as usize + 1;
        assert!(matches!(
            Grid::new(too_wide, 1, 1.0, WorldPoint::origin(), PathNode::new(true)),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            validate_dimensions(1, too_wide, 1.0),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert_eq!(validate_dimensions(4, 3, 0.5), Ok(12));
    }

    #[test]
    fn test_non_finite_positions_are_off_grid() {
        let mut g = grid(5, 5, 1.0, WorldPoint::origin());
        for position in [
            WorldPoint::new(f32::NAN, f32::NAN),
            WorldPoint::new(f32::NAN, 0.0),
            WorldPoint::new(0.0, f32::INFINITY),
            WorldPoint::new(f32::NEG_INFINITY, 0.0),
        ] {
            assert!(!g.is_valid_world(&position));
            assert!(!g.contains(g.world_to_grid(&position)));
            assert!(!g.get_cell_at_world(&position).walkable);
        }

        g.set_cell_at_world(&WorldPoint::new(f32::NAN, f32::NAN), PathNode::new(false));
        assert!(g.cells().iter().all(|c| c.walkable));
    }

    #[test]
    fn test_render_long_path() {
        let g = grid(6, 1, 1.0, WorldPoint::origin());
        let path: Vec<GridIndex> = (0..6).map(|c| GridIndex::new(c, 0)).collect();
        assert_eq!(g.render_path(&path), "S * * * * T\n");
    }

    #[test]
    fn test_indices_match_slots() {
        let g = grid(4, 3, 1.0, WorldPoint::origin());
        for row in 0..3 {
            for column in 0..4 {
                assert_eq!(g.get_cell(column, row).index(), GridIndex::new(column, row));
            }
        }
    }

    #[test]
    fn test_centered_mapping() {
        // 5x5 cells of size 1 centered on (0, 0): cell (2, 2) straddles the origin.
        let g = grid(5, 5, 1.0, WorldPoint::origin());
        assert_eq!(g.world_to_grid(&WorldPoint::new(0.0, 0.0)), GridIndex::new(2, 2));
        assert_eq!(g.grid_to_world(2, 2), WorldPoint::new(0.0, 0.0));
        assert_eq!(g.grid_to_world(0, 0), WorldPoint::new(-2.0, -2.0));
        assert_eq!(g.grid_to_world(4, 0), WorldPoint::new(2.0, -2.0));
        assert_eq!(g.world_to_grid(&WorldPoint::new(-2.4, 2.4)), GridIndex::new(0, 4));

        // Just outside the left edge maps to column -1, not 0.
        assert_eq!(g.world_to_grid(&WorldPoint::new(-2.6, 0.0)).column, -1);
        assert!(!g.is_valid_world(&WorldPoint::new(-2.6, 0.0)));
        assert!(!g.is_valid_world(&WorldPoint::new(0.0, 2.5)));
        assert!(g.is_valid_world(&WorldPoint::new(0.0, 2.49)));
    }

    #[test]
    fn test_inverse_mapping() {
        let configs = [
            (5, 5, 1.0, WorldPoint::origin()),
            (8, 3, 0.25, WorldPoint::new(-3.0, 7.5)),
            (7, 12, 2.5, WorldPoint::new(100.0, -40.0)),
        ];
        for (columns, rows, cell_size, origin) in configs {
            let g = grid(columns, rows, cell_size, origin);
            for row in 0..rows as i32 {
                for column in 0..columns as i32 {
                    let world = g.grid_to_world(column, row);
                    assert_eq!(
                        g.world_to_grid(&world),
                        GridIndex::new(column, row),
                        "round trip failed for ({column}, {row}) on {columns}x{rows}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_non_fatal() {
        let mut g = grid(3, 3, 1.0, WorldPoint::origin());

        let neutral = g.get_cell(3, 0);
        assert!(!neutral.walkable);
        assert_eq!(g.grid_to_world(-1, 0), WorldPoint::origin());

        g.set_cell(0, 5, PathNode::new(false));
        assert!(g.cells().iter().all(|c| c.walkable), "out-of-bounds write must be a no-op");

        assert_eq!(
            g.try_get_cell(-1, 2),
            Err(NavigationError::BoundaryViolation { column: -1, row: 2 })
        );
        assert_eq!(
            g.try_set_cell(1, 3, PathNode::new(false)),
            Err(NavigationError::BoundaryViolation { column: 1, row: 3 })
        );
    }

    #[test]
    fn test_set_cell_fixes_index() {
        let mut g = grid(3, 3, 1.0, WorldPoint::origin());
        let mut node = PathNode::new(false);
        node.set_index(GridIndex::new(9, 9));
        g.set_cell(1, 2, node);

        let stored = g.get_cell(1, 2);
        assert!(!stored.walkable);
        assert_eq!(stored.index(), GridIndex::new(1, 2));

        g.set_cell_at_world(&WorldPoint::new(-1.0, -1.0), PathNode::new(false));
        assert!(!g.get_cell(0, 0).walkable);
        assert!(!g.get_cell_at_world(&WorldPoint::new(-1.2, -0.8)).walkable);
    }

    #[test]
    fn test_clear_all() {
        let mut g = grid(4, 4, 1.0, WorldPoint::origin());
        g.set_cell(1, 1, PathNode::new(false));
        g.clear_all(PathNode::new(true));
        assert!(g.cells().iter().all(|c| c.walkable));
        assert_eq!(g.get_cell(3, 2).index(), GridIndex::new(3, 2));
    }

    #[test]
    fn test_display() {
        let mut g = grid(3, 2, 1.0, WorldPoint::origin());
        g.set_cell(1, 0, PathNode::new(false));

        let display_str = format!("{}", g);
        assert!(display_str.contains("Grid (3x2"));
        // Top row first.
        assert!(display_str.ends_with(". . .\n. # .\n"));

        let path = [GridIndex::new(0, 0), GridIndex::new(1, 1), GridIndex::new(2, 0)];
        assert_eq!(g.render_path(&path), ". * .\nS # T\n");
    }
}
