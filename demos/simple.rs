use grid_astar::{Pathfinder, SearchOptions};
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut pathfinder =
        Pathfinder::with_graph(&[[1.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0]]).unwrap();
    println!("{}", pathfinder.graph());
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = pathfinder
        .get_path(start, end, &SearchOptions::default())
        .unwrap()
        .unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
