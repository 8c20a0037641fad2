//! Per-cell records stored in a [`Grid`](crate::map::grid::Grid).

#![warn(missing_docs)]

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::map::point_types::GridIndex;

/// Sentinel cost for cells the current search has not reached.
pub const INFINITE_COST: u32 = u32::MAX;

/// A value that can live in a grid slot.
///
/// The grid overwrites the index whenever it places a value in a slot, so the
/// stored index always matches the slot's coordinate.
pub trait GridCell {
    /// The coordinate of the slot holding this value.
    fn index(&self) -> GridIndex;
    /// Records the coordinate of the slot holding this value.
    fn set_index(&mut self, index: GridIndex);
}

/// Open/closed membership of a cell within the running search.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeStatus {
    /// Not discovered by the current search.
    #[default]
    Unvisited,
    /// Discovered, waiting to be expanded.
    Open,
    /// Expanded; its cost from the start is final.
    Closed,
}

/// Search bookkeeping for one grid cell.
///
/// `f_cost` is derived: every setter that touches `g_cost` or `h_cost`
/// recomputes it before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathNode {
    index: GridIndex,
    /// Whether the search may traverse this cell.
    pub walkable: bool,
    g_cost: u32,
    h_cost: u32,
    f_cost: u32,
    previous: Option<GridIndex>,
    status: NodeStatus,
}

impl PathNode {
    /// Creates a node with infinite costs and no predecessor.
    pub const fn new(walkable: bool) -> Self {
        PathNode {
            index: GridIndex::new(0, 0),
            walkable,
            g_cost: INFINITE_COST,
            h_cost: INFINITE_COST,
            f_cost: INFINITE_COST,
            previous: None,
            status: NodeStatus::Unvisited,
        }
    }

    /// Cost of the best known route from the start.
    pub fn g_cost(&self) -> u32 {
        self.g_cost
    }

    /// Heuristic estimate to the target.
    pub fn h_cost(&self) -> u32 {
        self.h_cost
    }

    /// `g_cost + h_cost`, saturating at [`INFINITE_COST`].
    pub fn f_cost(&self) -> u32 {
        self.f_cost
    }

    /// The neighbor this cell was reached from, if any.
    pub fn previous(&self) -> Option<GridIndex> {
        self.previous
    }

    /// Membership in the current search.
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Sets both costs and recomputes `f_cost`.
    pub fn set_costs(&mut self, g_cost: u32, h_cost: u32) {
        self.g_cost = g_cost;
        self.h_cost = h_cost;
        self.f_cost = g_cost.saturating_add(h_cost);
    }

    /// Records the predecessor link.
    pub fn set_previous(&mut self, previous: Option<GridIndex>) {
        self.previous = previous;
    }

    /// Updates search membership.
    pub fn set_status(&mut self, status: NodeStatus) {
        self.status = status;
    }

    /// Clears all search state, keeping the index and walkable flag.
    pub fn reset_search_state(&mut self) {
        self.set_costs(INFINITE_COST, INFINITE_COST);
        self.previous = None;
        self.status = NodeStatus::Unvisited;
    }
}

impl Default for PathNode {
    /// The neutral record: unwalkable, unreached.
    fn default() -> Self {
        PathNode::new(false)
    }
}

impl GridCell for PathNode {
    fn index(&self) -> GridIndex {
        self.index
    }

    fn set_index(&mut self, index: GridIndex) {
        self.index = index;
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = |c: u32| {
            if c == INFINITE_COST {
                "inf".to_string()
            } else {
                c.to_string()
            }
        };
        write!(
            f,
            "{} g={} h={} f={}{}",
            self.index,
            cost(self.g_cost),
            cost(self.h_cost),
            cost(self.f_cost),
            if self.walkable { "" } else { " blocked" }
        )
    }
}
