use grid_astar::{is_complete, Pathfinder, SearchOptions};
use grid_util::point::Point;

// The end is walled in. A plain search finds nothing, in closest mode the path leads to the
// reachable cell nearest to the end.
//  _____
// |S  # |
// |   #E|
//  _____

fn main() {
    let mut pathfinder = Pathfinder::with_graph(&[
        [1.0, 1.0],
        [1.0, 1.0],
        [1.0, 1.0],
        [0.0, 0.0],
        [1.0, 1.0],
    ])
    .unwrap();
    let start = Point::new(0, 0);
    let end = Point::new(4, 1);
    let exact = pathfinder
        .search(start, end, &SearchOptions::default())
        .unwrap();
    println!("Exact search found {} steps", exact.len());

    let path = pathfinder
        .search(start, end, &SearchOptions::new().with_closest(true))
        .unwrap();
    println!("Complete: {}", is_complete(&path, &start, &end));
    for step in path {
        println!("{}", step.point);
    }
}
