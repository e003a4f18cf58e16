use grid_util::point::Point;

/// Failures that abort a query or a graph construction. Not finding a path is not one of them:
/// that is reported as an empty (or partial) path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("{point} is outside of the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("weight {weight} at {point} is not a finite non-negative number")]
    InvalidWeight { point: Point, weight: f64 },
    #[error("heuristic factor {factor} is not a finite non-negative number")]
    InvalidHeuristicFactor { factor: f64 },
    #[error("search gave up after expanding {expanded} nodes")]
    SearchExhausted { expanded: usize },
}
