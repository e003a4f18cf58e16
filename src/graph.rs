use core::fmt;
use fxhash::FxBuildHasher;
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use indexmap::IndexSet;
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::PathError;
use crate::node::GridNode;
use crate::N_SMALLVEC_SIZE;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Neighbour offsets: West, East, South, North, then Southwest, Southeast, Northwest, Northeast.
/// A 4-connected graph only uses the first half.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// [Graph] owns every [GridNode] of a weight grid along with the list of nodes touched by the
/// last search, so that reusing the graph only has to reset those. It also maintains the
/// [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) of the
/// passable cells in a [UnionFind] to detect unreachable goals without flood-filling.
///
/// Weights are indexed as `weights[x][y]`: the outer dimension is the width.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: SimpleValueGrid<GridNode>,
    diagonal: bool,
    dirty: FxIndexSet<Point>,
    components: UnionFind<usize>,
}

impl Graph {
    /// Builds the graph from a rectangular grid of non-negative weights where `0` marks a wall.
    /// If `diagonal` is set, every cell is also connected to its four diagonal neighbours.
    pub fn new<R: AsRef<[f64]>>(weights: &[R], diagonal: bool) -> Result<Graph, PathError> {
        let width = weights.len();
        let height = weights.first().map_or(0, |row| row.as_ref().len());
        let mut nodes = SimpleValueGrid::new(width, height, GridNode::default());
        for (x, row) in weights.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != height {
                return Err(PathError::RaggedGrid {
                    row: x,
                    expected: height,
                    found: row.len(),
                });
            }
            for (y, &weight) in row.iter().enumerate() {
                let point = Point::new(x as i32, y as i32);
                if !weight.is_finite() || weight < 0.0 {
                    return Err(PathError::InvalidWeight { point, weight });
                }
                nodes.set_point(point, GridNode::new(point, weight));
            }
        }
        let mut graph = Graph {
            nodes,
            diagonal,
            dirty: FxIndexSet::default(),
            components: UnionFind::new(width * height),
        };
        graph.generate_components();
        Ok(graph)
    }

    pub fn width(&self) -> usize {
        self.nodes.width()
    }

    pub fn height(&self) -> usize {
        self.nodes.height()
    }

    pub fn is_diagonal(&self) -> bool {
        self.diagonal
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        self.nodes.point_in_bounds(*point)
    }

    pub fn check_bounds(&self, point: &Point) -> Result<(), PathError> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(PathError::OutOfBounds {
                point: *point,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    pub fn node(&self, point: &Point) -> Result<GridNode, PathError> {
        self.check_bounds(point)?;
        Ok(self.nodes.get_point(*point))
    }

    /// All nodes, column by column.
    pub fn nodes(&self) -> impl Iterator<Item = GridNode> + '_ {
        (0..self.width() as i32)
            .cartesian_product(0..self.height() as i32)
            .map(move |(x, y)| self.nodes.get(x, y))
    }

    /// Node at a point already known to be in bounds.
    pub(crate) fn node_at(&self, point: &Point) -> GridNode {
        self.nodes.get_point(*point)
    }

    /// Stores `node` back at its own position.
    pub(crate) fn set_node(&mut self, node: GridNode) {
        self.nodes.set_point(node.point, node);
    }

    /// In-bounds neighbours of `point`, walls included: West, East, South, North and then, on a
    /// diagonal graph, Southwest, Southeast, Northwest, Northeast.
    pub fn neighbours(
        &self,
        point: &Point,
    ) -> Result<SmallVec<[Point; N_SMALLVEC_SIZE]>, PathError> {
        self.check_bounds(point)?;
        Ok(self.neighbour_points(point))
    }

    pub(crate) fn neighbour_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let n_offsets = if self.diagonal { 8 } else { 4 };
        NEIGHBOUR_OFFSETS[..n_offsets]
            .iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|n| self.in_bounds(n))
            .collect()
    }

    /// Records that the search state of the node at `point` was touched, so the next
    /// [clean_dirty](Self::clean_dirty) resets it. Marking a node twice is harmless.
    pub fn mark_dirty(&mut self, point: &Point) -> Result<(), PathError> {
        self.check_bounds(point)?;
        self.dirty.insert(*point);
        Ok(())
    }

    pub(crate) fn mark_dirty_unchecked(&mut self, point: Point) {
        self.dirty.insert(point);
    }

    /// Number of nodes that will be reset by the next [clean_dirty](Self::clean_dirty).
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Resets every node touched since the last clean.
    pub fn clean_dirty(&mut self) {
        for point in self.dirty.drain(..) {
            let mut node = self.nodes.get_point(point);
            node.reset();
            self.nodes.set_point(point, node);
        }
    }

    /// Resets every node and forgets the dirty list.
    pub fn init(&mut self) {
        self.dirty.clear();
        for x in 0..self.width() as i32 {
            for y in 0..self.height() as i32 {
                let mut node = self.nodes.get(x, y);
                node.reset();
                self.nodes.set(x, y, node);
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Result<usize, PathError> {
        self.check_bounds(point)?;
        Ok(self.components.find(self.nodes.get_ix_point(point)))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Points outside the grid are
    /// unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            !self.components.equiv(
                self.nodes.get_ix_point(start),
                self.nodes.get_ix_point(goal),
            )
        } else {
            true
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components. Only the forward half of the neighbourhood is visited since the neighbour
    /// relation is symmetric.
    fn generate_components(&mut self) {
        let forward: &[(i32, i32)] = if self.diagonal {
            &[(1, 0), (0, 1), (1, -1), (1, 1)]
        } else {
            &[(1, 0), (0, 1)]
        };
        let mut components = UnionFind::new(self.width() * self.height());
        for node in self.nodes().filter(|node| !node.is_wall()) {
            let parent_ix = self.nodes.get_ix_point(&node.point);
            for (dx, dy) in forward {
                let p = Point::new(node.point.x + dx, node.point.y + dy);
                if self.in_bounds(&p) && !self.nodes.get_point(p).is_wall() {
                    components.union(parent_ix, self.nodes.get_ix_point(&p));
                }
            }
        }
        self.components = components;
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = (0..self.width() as i32)
            .map(|x| {
                (0..self.height() as i32)
                    .map(|y| self.nodes.get(x, y).weight)
                    .join(" ")
            })
            .join("\n");
        write!(f, "{}", rows)
    }
}
