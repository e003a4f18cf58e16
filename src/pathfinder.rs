use grid_util::point::Point;

use crate::astar::astar_search;
use crate::error::PathError;
use crate::graph::Graph;
use crate::heuristic::{manhattan, HeuristicFn};
use crate::DEFAULT_HEURISTIC_FACTOR;

/// Per-query settings of [Pathfinder::search].
#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    /// Estimate of the remaining cost, [manhattan] unless set. Pick
    /// [diagonal](crate::heuristic::diagonal) for 8-connected graphs to get a tighter bound.
    pub heuristic: HeuristicFn,
    /// Return the path to the node closest to the goal (by heuristic, then by cost) if the goal
    /// cannot be reached.
    pub closest: bool,
    /// Multiplies every heuristic value. Factors above one give weighted A*. Must be finite and
    /// non-negative, otherwise [Pathfinder::search] fails with
    /// [PathError::InvalidHeuristicFactor].
    pub heuristic_factor: f64,
    /// Maximum number of nodes to expand before giving up with
    /// [PathError::SearchExhausted]. Unlimited if [None].
    pub max_expansions: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> SearchOptions {
        SearchOptions {
            heuristic: manhattan,
            closest: false,
            heuristic_factor: DEFAULT_HEURISTIC_FACTOR,
            max_expansions: None,
        }
    }
}

impl SearchOptions {
    pub fn new() -> SearchOptions {
        SearchOptions::default()
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicFn) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_closest(mut self, closest: bool) -> Self {
        self.closest = closest;
        self
    }

    pub fn with_heuristic_factor(mut self, heuristic_factor: f64) -> Self {
        self.heuristic_factor = heuristic_factor;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }
}

/// One step of a found path: the position and the accumulated cost from the start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStep {
    pub point: Point,
    pub cost: f64,
}

/// Total cost of a path returned by [Pathfinder::search].
pub fn path_cost(path: &[PathStep]) -> f64 {
    path.last().map_or(0.0, |step| step.cost)
}

/// Tells a path that reaches `goal` apart from a partial path returned in closest mode.
pub fn is_complete(path: &[PathStep], start: &Point, goal: &Point) -> bool {
    match path.last() {
        Some(step) => step.point == *goal,
        None => start == goal,
    }
}

/// Runs searches on a [Graph] it owns. Searching takes `&mut self` because the node scratch
/// state is shared by all queries; wrap the pathfinder in a lock (or clone it) to query from
/// several threads.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    graph: Graph,
}

impl Pathfinder {
    pub fn new(graph: Graph) -> Pathfinder {
        Pathfinder { graph }
    }

    /// Builds a 4-connected graph from the weights.
    pub fn with_graph<R: AsRef<[f64]>>(weights: &[R]) -> Result<Pathfinder, PathError> {
        Graph::new(weights, false).map(Pathfinder::new)
    }

    /// Builds an 8-connected graph from the weights.
    pub fn with_diagonal_graph<R: AsRef<[f64]>>(weights: &[R]) -> Result<Pathfinder, PathError> {
        Graph::new(weights, true).map(Pathfinder::new)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Computes a path from `start` to `goal`. The returned steps exclude the start and end at the
    /// goal; the last step's cost is the cost of the whole path.
    ///
    /// An unreachable goal gives an empty path, or with [SearchOptions::closest] the path to the
    /// node nearest to the goal. Only start or goal outside the grid, an invalid
    /// [SearchOptions::heuristic_factor] or running into [SearchOptions::max_expansions] are
    /// errors.
    pub fn search(
        &mut self,
        start: Point,
        goal: Point,
        options: &SearchOptions,
    ) -> Result<Vec<PathStep>, PathError> {
        astar_search(&mut self.graph, start, goal, options)
    }

    /// Like [search](Self::search) but returns the positions of the path including `start`, or
    /// [None] if nothing beyond the start could be reached.
    pub fn get_path(
        &mut self,
        start: Point,
        goal: Point,
        options: &SearchOptions,
    ) -> Result<Option<Vec<Point>>, PathError> {
        let steps = self.search(start, goal, options)?;
        if steps.is_empty() && start != goal {
            return Ok(None);
        }
        let path = std::iter::once(start)
            .chain(steps.into_iter().map(|step| step.point))
            .collect();
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::diagonal;
    use std::f64::consts::SQRT_2;

    fn points(path: &[PathStep]) -> Vec<Point> {
        path.iter().map(|step| step.point).collect()
    }

    #[test]
    fn walls_are_avoided() {
        let mut pathfinder = Pathfinder::with_graph(&[
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
        ])
        .unwrap();
        let goal = Point::new(1, 2);
        let path = pathfinder
            .search(Point::new(0, 0), goal, &SearchOptions::default())
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last().unwrap().point, goal);
        assert_eq!(path_cost(&path), 3.0);
        for wall in [Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)] {
            assert!(!points(&path).contains(&wall));
        }
    }

    #[test]
    fn single_diagonal_step() {
        let mut pathfinder = Pathfinder::with_diagonal_graph(&[[1.0, 1.0], [1.0, 1.0]]).unwrap();
        let options = SearchOptions::new().with_heuristic(diagonal);
        let path = pathfinder
            .search(Point::new(0, 0), Point::new(1, 1), &options)
            .unwrap();
        assert_eq!(points(&path), vec![Point::new(1, 1)]);
        assert!((path[0].cost - SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn blocked_diagonal_is_unreachable() {
        let weights = [[1.0, 0.0], [0.0, 1.0]];
        let (start, goal) = (Point::new(0, 0), Point::new(1, 1));
        let mut pathfinder = Pathfinder::with_graph(&weights).unwrap();
        let path = pathfinder.search(start, goal, &SearchOptions::default()).unwrap();
        assert!(path.is_empty());
        assert!(!is_complete(&path, &start, &goal));
        // Nothing but the start is reachable, so the closest node is the start itself.
        let closest = SearchOptions::new().with_closest(true);
        assert!(pathfinder.search(start, goal, &closest).unwrap().is_empty());

        let mut diagonal_pathfinder = Pathfinder::with_diagonal_graph(&weights).unwrap();
        let path = diagonal_pathfinder.search(start, goal, &SearchOptions::default()).unwrap();
        assert_eq!(points(&path), vec![goal]);
    }

    #[test]
    fn start_equals_goal() {
        let mut pathfinder = Pathfinder::with_graph(&[[1.0]]).unwrap();
        let p = Point::new(0, 0);
        let path = pathfinder.search(p, p, &SearchOptions::default()).unwrap();
        assert!(path.is_empty());
        assert!(is_complete(&path, &p, &p));
        assert_eq!(
            pathfinder.get_path(p, p, &SearchOptions::default()).unwrap(),
            Some(vec![p])
        );
    }

    #[test]
    fn out_of_bounds_fails_before_searching() {
        let mut pathfinder = Pathfinder::with_graph(&[[1.0, 1.0], [1.0, 1.0]]).unwrap();
        pathfinder
            .search(Point::new(0, 0), Point::new(1, 1), &SearchOptions::default())
            .unwrap();
        let dirty = pathfinder.graph().dirty_count();
        let err = pathfinder
            .search(Point::new(0, 0), Point::new(2, 0), &SearchOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            PathError::OutOfBounds {
                point: Point::new(2, 0),
                width: 2,
                height: 2
            }
        );
        assert!(pathfinder
            .search(Point::new(0, -1), Point::new(1, 1), &SearchOptions::default())
            .is_err());
        assert_eq!(pathfinder.graph().dirty_count(), dirty);
    }

    #[test]
    fn weights_are_routed_around() {
        // The direct row through x = 1 is expensive, going around costs less.
        let mut pathfinder = Pathfinder::with_graph(&[
            [1.0, 1.0, 1.0],
            [9.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ])
        .unwrap();
        let path = pathfinder
            .search(Point::new(0, 0), Point::new(2, 0), &SearchOptions::default())
            .unwrap();
        assert_eq!(path_cost(&path), 4.0);
        assert!(!points(&path).contains(&Point::new(1, 0)));
    }

    /// Lures the search into reaching (1, 1) over the expensive cell (1, 0) first.
    fn lure(point: &Point, _goal: &Point) -> f64 {
        match (point.x, point.y) {
            (0, 1) => 40.0,
            (1, 1) => 50.0,
            _ => 0.0,
        }
    }

    #[test]
    fn rescored_node_keeps_shorter_route() {
        let mut pathfinder = Pathfinder::with_graph(&[[1.0, 1.0], [10.0, 1.0]]).unwrap();
        let options = SearchOptions::new().with_heuristic(lure);
        let goal = Point::new(1, 1);
        let path = pathfinder.search(Point::new(0, 0), goal, &options).unwrap();
        assert_eq!(points(&path), vec![Point::new(0, 1), goal]);
        assert_eq!(path_cost(&path), 2.0);
        let node = pathfinder.graph().node(&goal).unwrap();
        assert_eq!(node.g, 2.0);
        assert_eq!(node.parent, Some(Point::new(0, 1)));
    }

    #[test]
    fn closest_node_is_returned_for_unreachable_goal() {
        let mut pathfinder = Pathfinder::with_graph(&[[1.0], [1.0], [0.0], [1.0]]).unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(3, 0));
        let options = SearchOptions::new().with_closest(true);
        let path = pathfinder.search(start, goal, &options).unwrap();
        assert_eq!(points(&path), vec![Point::new(1, 0)]);
        assert!(!is_complete(&path, &start, &goal));
        assert!(pathfinder
            .search(start, goal, &SearchOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn closest_tie_prefers_cheaper_node() {
        // The goal (2, 0) is walled in. The start and (1, 1) are equally far from it, the start is
        // cheaper and stays the closest node.
        let mut pathfinder =
            Pathfinder::with_graph(&[[1.0, 1.0], [0.0, 1.0], [1.0, 0.0]]).unwrap();
        let options = SearchOptions::new().with_closest(true);
        let path = pathfinder
            .search(Point::new(0, 0), Point::new(2, 0), &options)
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn closest_tie_switches_to_cheaper_node() {
        // The goal (2, 2) is walled in. (2, 0) is found first behind the heavy cell, then (1, 1)
        // ties with it on the heuristic at a lower cost and takes over as the closest node.
        let mut pathfinder = Pathfinder::with_graph(&[
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 0.0],
            [5.0, 0.0, 1.0],
        ])
        .unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(2, 2));
        let options = SearchOptions::new().with_closest(true);
        let path = pathfinder.search(start, goal, &options).unwrap();
        assert_eq!(points(&path), vec![Point::new(1, 0), Point::new(1, 1)]);
        assert_eq!(path_cost(&path), 2.0);
        assert!(!is_complete(&path, &start, &goal));
    }

    #[test]
    fn invalid_heuristic_factor_is_rejected() {
        let mut pathfinder = Pathfinder::with_graph(&[[1.0, 1.0], [1.0, 1.0]]).unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(1, 1));
        pathfinder
            .search(start, goal, &SearchOptions::default())
            .unwrap();
        let dirty = pathfinder.graph().dirty_count();
        for factor in [-1.0, f64::NAN, f64::INFINITY] {
            let options = SearchOptions::new().with_heuristic_factor(factor);
            assert!(matches!(
                pathfinder.search(start, goal, &options),
                Err(PathError::InvalidHeuristicFactor { .. })
            ));
        }
        assert_eq!(pathfinder.graph().dirty_count(), dirty);
        let dijkstra = SearchOptions::new().with_heuristic_factor(0.0);
        let path = pathfinder.search(start, goal, &dijkstra).unwrap();
        assert_eq!(path_cost(&path), 2.0);
    }

    #[test]
    fn repeated_searches_agree() {
        let weights = [
            [1.0, 2.0, 1.0, 1.0],
            [1.0, 0.0, 3.0, 1.0],
            [1.0, 1.0, 1.0, 0.0],
            [4.0, 0.0, 1.0, 1.0],
        ];
        let mut pathfinder = Pathfinder::with_diagonal_graph(&weights).unwrap();
        let options = SearchOptions::new().with_heuristic(diagonal);
        let (start, goal) = (Point::new(0, 0), Point::new(3, 3));
        let first = pathfinder.search(start, goal, &options).unwrap();
        pathfinder
            .search(Point::new(3, 3), Point::new(0, 3), &options)
            .unwrap();
        let second = pathfinder.search(start, goal, &options).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn clean_dirty_restores_defaults() {
        let mut pathfinder = Pathfinder::with_graph(&vec![vec![1.0; 6]; 6]).unwrap();
        for (start, goal) in [((0, 0), (5, 5)), ((5, 0), (0, 5)), ((2, 3), (4, 1))] {
            pathfinder
                .search(
                    Point::new(start.0, start.1),
                    Point::new(goal.0, goal.1),
                    &SearchOptions::default(),
                )
                .unwrap();
        }
        let graph = pathfinder.graph_mut();
        assert!(graph.dirty_count() > 0);
        graph.clean_dirty();
        for node in graph.nodes() {
            assert_eq!((node.g, node.h, node.f), (0.0, 0.0, 0.0));
            assert!(!node.closed && !node.visited);
            assert_eq!(node.parent, None);
        }
    }

    #[test]
    fn expansion_limit_is_enforced() {
        let mut pathfinder = Pathfinder::with_graph(&vec![vec![1.0; 10]; 10]).unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(9, 9));
        let limited = SearchOptions::new().with_max_expansions(3);
        assert_eq!(
            pathfinder.search(start, goal, &limited),
            Err(PathError::SearchExhausted { expanded: 3 })
        );
        let path = pathfinder
            .search(start, goal, &SearchOptions::default())
            .unwrap();
        assert_eq!(path_cost(&path), 18.0);
    }

    #[test]
    fn get_path_prepends_start() {
        let mut pathfinder = Pathfinder::with_graph(&[[1.0, 1.0, 1.0]]).unwrap();
        let path = pathfinder
            .get_path(Point::new(0, 0), Point::new(0, 2), &SearchOptions::default())
            .unwrap();
        assert_eq!(
            path,
            Some(vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)])
        );
        let mut walled = Pathfinder::with_graph(&[[1.0, 0.0, 1.0]]).unwrap();
        assert_eq!(
            walled
                .get_path(Point::new(0, 0), Point::new(0, 2), &SearchOptions::default())
                .unwrap(),
            None
        );
    }
}
