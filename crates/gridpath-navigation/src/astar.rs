/*

A* = f(n) = g(n) + h(n)

Where:
    n = a cell in the grid
    g(n) = actual cost from start cell to n
    h(n) = octile estimate from n to the target
    f(n) = total estimated cost of the cheapest route through n

Initialize:
    - reset every cell: g = h = inf, no predecessor, unvisited
    - start cell: g = 0, h = h(start), open

Loop while the open set is non-empty:
    - pop the open cell with lowest f (then lowest h, then earliest inserted)
    - close it
    - if the target is one of its neighbors, link it and stop
    - for each walkable, non-closed neighbor:
        - tentative g = g(current) + step cost
        - if lower than the neighbor's g: update g, h, predecessor and (re)open it

Reconstruct:
    - follow predecessor links from the target back to the start, then reverse

*/

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::PathfinderConfig;
use crate::error::NavigationError;
use crate::map::grid::Grid;
use crate::map::path_node::{GridCell, NodeStatus, PathNode};
use crate::map::point_types::{GridIndex, WorldPoint};

/// Cost of an orthogonal step.
pub const STRAIGHT_COST: u32 = 10;
/// Cost of a diagonal step (10 * sqrt(2), rounded).
pub const DIAGONAL_COST: u32 = 14;

/// Neighbor offsets in expansion order, flagged when diagonal.
const NEIGHBOR_OFFSETS: [(i32, i32, bool); 8] = [
    (1, 0, false),
    (1, 1, true),
    (1, -1, true),
    (-1, 0, false),
    (-1, 1, true),
    (-1, -1, true),
    (0, 1, false),
    (0, -1, false),
];

/// Scaled octile distance between two cells.
///
/// Serves both as the heuristic and as the step cost between adjacent cells.
pub fn octile_distance(a: GridIndex, b: GridIndex) -> u32 {
    let dx = a.column.abs_diff(b.column);
    let dy = a.row.abs_diff(b.row);
    let straight_steps = dx.abs_diff(dy);
    let diagonal_steps = dx.min(dy);
    straight_steps * STRAIGHT_COST + diagonal_steps * DIAGONAL_COST
}

/// Sums the step costs along a sequence of cells.
pub fn path_cost(cells: &[GridIndex]) -> u32 {
    cells
        .windows(2)
        .map(|pair| octile_distance(pair[0], pair[1]))
        .sum()
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    /// World-space cell centers from start to target, both included.
    pub waypoints: Vec<WorldPoint>,
    /// Cell indices matching `waypoints`.
    pub cells: Vec<GridIndex>,
    /// Sum of step costs along the path.
    pub total_cost: u32,
    /// Number of cells closed during the search.
    pub nodes_explored: usize,
}

impl PathResult {
    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false for a result produced by a search.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Returns the waypoints.
    pub fn into_waypoints(self) -> Vec<WorldPoint> {
        self.waypoints
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PathResult {{ path_length: {}, total_cost: {}, nodes_explored: {} }}",
            self.len(),
            self.total_cost,
            self.nodes_explored
        )
    }
}

/// Open-set entry. Entries go stale when their cell is re-opened with a lower
/// cost or closed; stale entries are skipped on pop.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct OpenEntry {
    f_cost: u32,
    h_cost: u32,
    sequence: u64,
    index: GridIndex,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* engine owning its grid of [`PathNode`]s.
///
/// Searches use the grid's cells as scratch space, so a `Pathfinder` runs one
/// search at a time; `&mut self` on every search enforces that.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    grid: Grid<PathNode>,
    diagonal_movement: bool,
    open: BinaryHeap<OpenEntry>,
    neighbors: Vec<GridIndex>,
}

impl Pathfinder {
    /// Builds an engine with every cell walkable.
    ///
    /// # Arguments
    /// * `config` - Grid shape and movement rules.
    ///
    /// # Returns
    /// * `Result<Self, NavigationError>` - The engine, or an error for non-positive dimensions or cell size.
    pub fn new(config: &PathfinderConfig) -> Result<Self, NavigationError> {
        config.validate()?;
        let grid = Grid::new(
            config.columns,
            config.rows,
            config.cell_size,
            config.origin,
            PathNode::new(true),
        )?;
        info!(
            columns = config.columns,
            rows = config.rows,
            cell_size = config.cell_size,
            diagonal_movement = config.diagonal_movement,
            "Pathfinder initialized"
        );
        Ok(Pathfinder {
            grid,
            diagonal_movement: config.diagonal_movement,
            open: BinaryHeap::new(),
            neighbors: Vec::with_capacity(NEIGHBOR_OFFSETS.len()),
        })
    }

    /// Read-only view of the grid and its per-cell search state.
    pub fn grid(&self) -> &Grid<PathNode> {
        &self.grid
    }

    /// Whether diagonal steps are expanded.
    pub fn diagonal_movement(&self) -> bool {
        self.diagonal_movement
    }

    /// Finds the cheapest route between two world positions.
    ///
    /// # Returns
    /// * `Ok(waypoints)` - Cell centers from start to target, never empty.
    /// * `Err(NavigationError::InvalidEndpoint)` - An endpoint is outside the grid.
    /// * `Err(NavigationError::NoPathFound)` - The target cannot be reached.
    pub fn find_path(
        &mut self,
        start: WorldPoint,
        target: WorldPoint,
    ) -> Result<Vec<WorldPoint>, NavigationError> {
        self.find_path_detailed(start, target)
            .map(PathResult::into_waypoints)
    }

    /// Like [`Pathfinder::find_path`], also reporting cells, cost and search effort.
    pub fn find_path_detailed(
        &mut self,
        start: WorldPoint,
        target: WorldPoint,
    ) -> Result<PathResult, NavigationError> {
        for position in [start, target] {
            if !self.grid.is_valid_world(&position) {
                warn!(x = position.x, y = position.y, "Rejecting search endpoint outside the grid");
                return Err(NavigationError::invalid_endpoint(position));
            }
        }
        let start_index = self.grid.world_to_grid(&start);
        let target_index = self.grid.world_to_grid(&target);
        self.search(start_index, target_index)
    }

    /// Finds the cheapest route between two cells.
    ///
    /// Out-of-range indices are reported as [`NavigationError::BoundaryViolation`].
    pub fn find_path_between(
        &mut self,
        start: GridIndex,
        target: GridIndex,
    ) -> Result<PathResult, NavigationError> {
        for index in [start, target] {
            self.grid.try_get_cell(index.column, index.row)?;
        }
        self.search(start, target)
    }

    /// Sets the walkable flag of the cell containing `position`.
    ///
    /// Returns `false`, leaving the grid untouched, when the position is outside
    /// the grid. Takes effect on the next search.
    pub fn set_walkable(&mut self, position: WorldPoint, walkable: bool) -> bool {
        let index = self.grid.world_to_grid(&position);
        self.set_walkable_at(index, walkable)
    }

    /// Sets the walkable flag of the cell at `index`.
    pub fn set_walkable_at(&mut self, index: GridIndex, walkable: bool) -> bool {
        match self.grid.cell_mut(index) {
            Some(node) => {
                node.walkable = walkable;
                true
            }
            None => {
                warn!(column = index.column, row = index.row, "Ignoring walkability edit outside the grid");
                false
            }
        }
    }

    /// Whether the cell containing `position` exists and is walkable.
    pub fn is_walkable(&self, position: WorldPoint) -> bool {
        let index = self.grid.world_to_grid(&position);
        self.grid
            .try_get_cell(index.column, index.row)
            .map(|node| node.walkable)
            .unwrap_or(false)
    }

    /// Makes every cell walkable again and drops all search state.
    pub fn clear_obstacles(&mut self) {
        self.grid.clear_all(PathNode::new(true));
    }

    fn search(&mut self, start: GridIndex, target: GridIndex) -> Result<PathResult, NavigationError> {
        debug!(%start, %target, "Starting A* search");
        self.reset_search_state();

        let start_h = octile_distance(start, target);
        if let Some(node) = self.grid.cell_mut(start) {
            node.set_costs(0, start_h);
            node.set_status(NodeStatus::Open);
        }

        if start == target {
            return Ok(self.build_result(vec![start], 0));
        }

        let mut open = std::mem::take(&mut self.open);
        let mut neighbors = std::mem::take(&mut self.neighbors);
        open.clear();

        let mut sequence: u64 = 0;
        open.push(OpenEntry {
            f_cost: start_h,
            h_cost: start_h,
            sequence,
            index: start,
        });

        let mut nodes_explored = 0;
        let mut found = false;

        while let Some(entry) = open.pop() {
            let current = entry.index;
            let current_node = self.grid.get_cell(current.column, current.row);
            if current_node.status() != NodeStatus::Open || current_node.f_cost() != entry.f_cost {
                continue;
            }
            let current_g = current_node.g_cost();

            if let Some(node) = self.grid.cell_mut(current) {
                node.set_status(NodeStatus::Closed);
            }
            nodes_explored += 1;
            trace!(%current, g = current_g, f = entry.f_cost, "Expanding cell");

            self.collect_neighbors(current, &mut neighbors);

            if neighbors.contains(&target) {
                let target_g = current_g + octile_distance(current, target);
                if let Some(node) = self.grid.cell_mut(target) {
                    node.set_costs(target_g, 0);
                    node.set_previous(Some(current));
                }
                found = true;
                break;
            }

            for &neighbor in &neighbors {
                let Some(node) = self.grid.cell_mut(neighbor) else {
                    continue;
                };
                if node.status() == NodeStatus::Closed || !node.walkable {
                    continue;
                }

                let tentative_g = current_g + octile_distance(current, neighbor);
                if tentative_g < node.g_cost() {
                    let h = octile_distance(neighbor, target);
                    node.set_costs(tentative_g, h);
                    node.set_previous(Some(current));
                    node.set_status(NodeStatus::Open);

                    sequence += 1;
                    open.push(OpenEntry {
                        f_cost: node.f_cost(),
                        h_cost: h,
                        sequence,
                        index: neighbor,
                    });
                }
            }
        }

        open.clear();
        self.open = open;
        self.neighbors = neighbors;

        if !found {
            debug!(%start, %target, nodes_explored, "No path found");
            return Err(NavigationError::NoPathFound { nodes_explored });
        }

        let cells = self
            .reconstruct_path(start, target)
            .ok_or(NavigationError::NoPathFound { nodes_explored })?;
        let result = self.build_result(cells, nodes_explored);
        debug!(
            %start,
            %target,
            total_cost = result.total_cost,
            path_length = result.len(),
            nodes_explored,
            "Path found"
        );
        Ok(result)
    }

    /// Full-grid reset of costs, predecessors and membership.
    fn reset_search_state(&mut self) {
        for node in self.grid.cells_mut() {
            node.reset_search_state();
        }
    }

    /// In-bounds neighbors of `index`, in expansion order.
    fn collect_neighbors(&self, index: GridIndex, out: &mut Vec<GridIndex>) {
        out.clear();
        for &(d_column, d_row, diagonal) in &NEIGHBOR_OFFSETS {
            if diagonal && !self.diagonal_movement {
                continue;
            }
            let neighbor = index.offset(d_column, d_row);
            if self.grid.contains(neighbor) {
                out.push(neighbor);
            }
        }
    }

    /// Follows predecessor links from `target` back to `start`.
    ///
    /// Returns `None` if the chain breaks or loops, which a finished search never produces.
    fn reconstruct_path(&self, start: GridIndex, target: GridIndex) -> Option<Vec<GridIndex>> {
        let mut cells = vec![target];
        let mut current = target;
        while current != start {
            if cells.len() > self.grid.total_cells() {
                return None;
            }
            current = self.grid.get_cell(current.column, current.row).previous()?;
            cells.push(current);
        }
        cells.reverse();
        Some(cells)
    }

    fn build_result(&self, cells: Vec<GridIndex>, nodes_explored: usize) -> PathResult {
        let waypoints = cells
            .iter()
            .map(|c| self.grid.grid_to_world(c.column, c.row))
            .collect();
        let total_cost = cells
            .last()
            .map(|c| self.grid.get_cell(c.column, c.row).g_cost())
            .unwrap_or(0);
        debug_assert!(cells.iter().all(|c| self.grid.get_cell(c.column, c.row).index() == *c));
        PathResult {
            waypoints,
            cells,
            total_cost,
            nodes_explored,
        }
    }
}
