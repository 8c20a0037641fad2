#![warn(missing_docs)]
//! Grid pathfinding: a 2D grid container mapping between world coordinates and
//! cell indices, and an A* engine that searches it for the cheapest walkable route.
//!
//! ```
//! use gridpath_navigation::{Pathfinder, PathfinderConfig, WorldPoint};
//!
//! let mut pathfinder = Pathfinder::new(&PathfinderConfig::new(5, 5)).unwrap();
//! pathfinder.set_walkable(WorldPoint::new(0.0, 0.0), false);
//!
//! let path = pathfinder
//!     .find_path(WorldPoint::new(-2.0, 0.0), WorldPoint::new(2.0, 0.0))
//!     .unwrap();
//! assert_eq!(path.first(), Some(&WorldPoint::new(-2.0, 0.0)));
//! assert_eq!(path.last(), Some(&WorldPoint::new(2.0, 0.0)));
//! ```

pub mod astar;
pub mod config;
pub mod error;
pub mod map;

pub use astar::{DIAGONAL_COST, PathResult, Pathfinder, STRAIGHT_COST, octile_distance, path_cost};
pub use config::PathfinderConfig;
pub use error::NavigationError;
pub use map::{Grid, GridCell, GridIndex, NodeStatus, PathNode, WorldPoint};
