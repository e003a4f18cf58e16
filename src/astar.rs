//! The A* loop. Node state lives on the [Graph] itself, the open set is a [PriorityQueue] of grid
//! positions keyed by `f`, in which every node appears at most once.
use grid_util::point::Point;
use log::{debug, trace, warn};

use crate::binary_heap::PriorityQueue;
use crate::error::PathError;
use crate::graph::Graph;
use crate::pathfinder::{PathStep, SearchOptions};

/// Walks the parent links back from `end`. The start node has no parent and is left out.
fn reconstruct_path(graph: &Graph, end: Point) -> Vec<PathStep> {
    let mut path: Vec<PathStep> = std::iter::successors(Some(end), |p| graph.node_at(p).parent)
        .map(|p| graph.node_at(&p))
        .take_while(|node| node.parent.is_some())
        .map(|node| PathStep {
            point: node.point,
            cost: node.g,
        })
        .collect();
    path.reverse();
    path
}

pub(crate) fn astar_search(
    graph: &mut Graph,
    start: Point,
    goal: Point,
    options: &SearchOptions,
) -> Result<Vec<PathStep>, PathError> {
    graph.check_bounds(&start)?;
    graph.check_bounds(&goal)?;
    let factor = options.heuristic_factor;
    if !factor.is_finite() || factor < 0.0 {
        return Err(PathError::InvalidHeuristicFactor { factor });
    }
    graph.clean_dirty();

    // A start on a wall can still step off it, so the components only decide for passable starts.
    if !options.closest
        && start != goal
        && !graph.node_at(&start).is_wall()
        && graph.unreachable(&start, &goal)
    {
        debug!("{} is not reachable from {}", goal, start);
        return Ok(Vec::new());
    }

    let heuristic = |point: &Point| (options.heuristic)(point, &goal) * factor;

    let mut open: PriorityQueue<Point, f64> = PriorityQueue::new();
    let mut closest = start;
    let mut start_node = graph.node_at(&start);
    start_node.h = heuristic(&start);
    start_node.f = start_node.h;
    graph.set_node(start_node);
    graph.mark_dirty_unchecked(start);
    open.push(start, start_node.f);

    let mut expanded = 0;
    while let Some(current) = open.pop_min() {
        if current == goal {
            debug!("Found path from {} to {} after expanding {} nodes", start, goal, expanded);
            return Ok(reconstruct_path(graph, current));
        }
        if let Some(limit) = options.max_expansions {
            if expanded >= limit {
                warn!("Search from {} to {} hit the expansion limit of {}", start, goal, limit);
                return Err(PathError::SearchExhausted { expanded });
            }
        }
        expanded += 1;

        let mut current_node = graph.node_at(&current);
        current_node.closed = true;
        graph.set_node(current_node);

        for n in graph.neighbour_points(&current) {
            let mut neighbour = graph.node_at(&n);
            if neighbour.closed || neighbour.is_wall() {
                continue;
            }
            let g_score = current_node.g + neighbour.cost(&current);
            let been_visited = neighbour.visited;
            if been_visited && g_score >= neighbour.g {
                continue;
            }
            if !been_visited {
                neighbour.h = heuristic(&n);
            }
            let h = neighbour.h;

            neighbour.visited = true;
            neighbour.parent = Some(current);
            neighbour.g = g_score;
            neighbour.f = g_score + h;
            graph.set_node(neighbour);
            graph.mark_dirty_unchecked(n);

            if options.closest {
                let best = graph.node_at(&closest);
                if h < best.h || (h == best.h && g_score < best.g) {
                    trace!("New closest node {} (h = {}, g = {})", n, h, g_score);
                    closest = n;
                }
            }

            if been_visited {
                open.rescore(&n, neighbour.f);
            } else {
                open.push(n, neighbour.f);
            }
        }
    }

    if options.closest {
        debug!(
            "{} is not reachable from {}, returning path to closest node {}",
            goal, start, closest
        );
        Ok(reconstruct_path(graph, closest))
    } else {
        debug!("{} is not reachable from {}", goal, start);
        Ok(Vec::new())
    }
}
