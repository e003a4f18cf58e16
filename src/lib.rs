//! # grid_astar
//!
//! Weighted [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a grid.
//! Cells carry a non-negative weight where `0` marks a wall and any other value scales the cost
//! of entering the cell. Diagonal steps, if enabled, cost [DIAGONAL_COST_FACTOR] times as much.
//!
//! A [Graph] is built once per map and reused across queries: each search only resets the nodes
//! the previous search touched. The open set is a [PriorityQueue] which repositions nodes in
//! place when a cheaper route to them is found. Pre-computed
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) let
//! unreachable goals be rejected without flood-filling the grid.
//!
//! ```
//! use grid_astar::{Pathfinder, SearchOptions};
//! use grid_util::point::Point;
//!
//! let mut pathfinder = Pathfinder::with_graph(&[
//!     [1.0, 1.0, 1.0, 1.0],
//!     [0.0, 1.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0, 1.0],
//! ])
//! .unwrap();
//! let path = pathfinder
//!     .search(Point::new(0, 0), Point::new(1, 2), &SearchOptions::default())
//!     .unwrap();
//! assert_eq!(path.last().map(|step| step.point), Some(Point::new(1, 2)));
//! assert_eq!(grid_astar::path_cost(&path), 3.0);
//! ```
mod astar;
pub mod binary_heap;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod node;
pub mod pathfinder;

pub use binary_heap::PriorityQueue;
pub use error::PathError;
pub use graph::Graph;
pub use heuristic::{diagonal, manhattan, HeuristicFn};
pub use node::GridNode;
pub use pathfinder::{is_complete, path_cost, PathStep, Pathfinder, SearchOptions};

/// Cost multiplier of a diagonal step relative to a cardinal one.
pub const DIAGONAL_COST_FACTOR: f64 = std::f64::consts::SQRT_2;
/// Scale applied to the heuristic unless configured otherwise. Values above one give
/// weighted A*, which expands fewer nodes at the price of optimality.
pub const DEFAULT_HEURISTIC_FACTOR: f64 = 1.0;
/// Inline capacity for neighbourhoods, enough for a full Moore neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;
