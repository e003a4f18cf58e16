use grid_astar::{diagonal, path_cost, Pathfinder, SearchOptions};
use grid_util::point::Point;

// Weights scale the cost of entering a cell, 0 is a wall. With diagonal moves enabled the
// octile heuristic is the tighter choice. The heuristic_factor can be raised to turn the search
// into weighted A*, which expands fewer nodes but may return a costlier path.

fn main() {
    let weights = [
        [1.0, 1.0, 2.0, 30.0],
        [0.0, 4.0, 1.3, 0.0],
        [0.0, 0.0, 5.0, 1.0],
    ];
    let mut pathfinder = Pathfinder::with_diagonal_graph(&weights).unwrap();
    println!("{}", pathfinder.graph());
    let start = Point::new(0, 0);
    let end = Point::new(2, 3);
    for factor in [1.0, 2.0] {
        let options = SearchOptions::new()
            .with_heuristic(diagonal)
            .with_heuristic_factor(factor);
        let path = pathfinder.search(start, end, &options).unwrap();
        println!("Heuristic factor {factor}, cost {:.3}:", path_cost(&path));
        for step in path {
            println!("{} (g = {:.3})", step.point, step.cost);
        }
    }
}
