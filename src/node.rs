use grid_util::point::Point;

use crate::DIAGONAL_COST_FACTOR;

/// A single weighted cell of a [Graph](crate::Graph) together with the scratch state of the
/// search currently running on it.
///
/// The weight is fixed at construction. A weight of `0` makes the cell a wall, any positive
/// value is the cost multiplier for entering the cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridNode {
    pub point: Point,
    pub weight: f64,
    /// Best known cost from the start.
    pub g: f64,
    /// Cached heuristic estimate to the goal.
    pub h: f64,
    pub f: f64,
    pub closed: bool,
    pub visited: bool,
    /// Predecessor on the best known path.
    pub parent: Option<Point>,
}

/// Fill value for a freshly allocated grid: a wall at the origin.
impl Default for GridNode {
    fn default() -> GridNode {
        GridNode::new(Point::new(0, 0), 0.0)
    }
}

impl GridNode {
    pub fn new(point: Point, weight: f64) -> GridNode {
        GridNode {
            point,
            weight,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            closed: false,
            visited: false,
            parent: None,
        }
    }

    /// Cost of stepping onto this node from `from`. Diagonal steps are scaled by
    /// [DIAGONAL_COST_FACTOR].
    pub fn cost(&self, from: &Point) -> f64 {
        if from.x != self.point.x && from.y != self.point.y {
            self.weight * DIAGONAL_COST_FACTOR
        } else {
            self.weight
        }
    }

    pub fn is_wall(&self) -> bool {
        self.weight == 0.0
    }

    /// Clears all search state, leaving position and weight untouched.
    pub fn reset(&mut self) {
        self.g = 0.0;
        self.h = 0.0;
        self.f = 0.0;
        self.closed = false;
        self.visited = false;
        self.parent = None;
    }
}
