//! Grid-related functionality for navigation.
//!
//! This module provides the generic grid container, the per-cell search record
//! stored in it, and the point types used to address cells and world positions.

pub mod grid;
pub mod path_node;
pub mod point_types;

pub use grid::Grid;
pub use path_node::{GridCell, INFINITE_COST, NodeStatus, PathNode};
pub use point_types::{GridIndex, WorldPoint};
