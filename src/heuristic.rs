//! Estimates of the remaining cost between two grid positions.
use grid_util::point::Point;

use crate::DIAGONAL_COST_FACTOR;

/// Signature of a heuristic: estimated cost from the first point to the second.
pub type HeuristicFn = fn(&Point, &Point) -> f64;

/// Cost of a cardinal (straight) step on a uniform grid.
const D: f64 = 1.0;
/// Cost of a diagonal step on a uniform grid.
const D2: f64 = DIAGONAL_COST_FACTOR;

/// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry). Admissible for
/// 4-connected grids.
pub fn manhattan(p1: &Point, p2: &Point) -> f64 {
    p1.manhattan_distance(p2) as f64
}

/// The octile distance: take as many diagonal steps as possible, then go straight. Admissible
/// for 8-connected grids where diagonal steps cost [DIAGONAL_COST_FACTOR].
pub fn diagonal(p1: &Point, p2: &Point) -> f64 {
    let delta_x = (p2.x - p1.x).abs() as f64;
    let delta_y = (p2.y - p1.y).abs() as f64;
    D * (delta_x + delta_y) + (D2 - 2.0 * D) * delta_x.min(delta_y)
}
