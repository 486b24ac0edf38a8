//! Path measurements for comparing solvers. Distances use the same straight-line function the
//! searches use as heuristic; the conversion to physical units takes the grid extent and travel
//! speed from a [MetricsConfig].

use itertools::Itertools;

use crate::cell::Cell;
use crate::maze_grid::MazeGrid;

/// Metres in a statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

pub fn euclidean_distance(a: &Cell, b: &Cell) -> f64 {
    a.euclidean_distance(b)
}

/// Total straight-line length of the steps along `path`.
pub fn path_length(path: &[Cell]) -> f64 {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| euclidean_distance(a, b))
        .sum()
}

/// True when the path is non-empty, stays on traversable cells and only moves between
/// neighbouring cells.
pub fn is_valid_path(grid: &MazeGrid, path: &[Cell]) -> bool {
    !path.is_empty()
        && path.iter().all(|c| grid.can_move_to(c))
        && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsConfig {
    /// Side length in metres covered by the whole grid.
    pub grid_extent_m: f64,
    pub speed_mph: f64,
}

impl Default for MetricsConfig {
    fn default() -> MetricsConfig {
        MetricsConfig {
            grid_extent_m: 1000.0,
            speed_mph: 100.0,
        }
    }
}

impl MetricsConfig {
    pub fn speed_mps(&self) -> f64 {
        self.speed_mph * METERS_PER_MILE / 3600.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathMetrics {
    /// Path length in cells.
    pub length: f64,
    pub distance_m: f64,
    pub traversal_time_s: f64,
}

impl PathMetrics {
    /// Measures `path` on a `maze_size` x `maze_size` grid spanning `config.grid_extent_m`.
    pub fn compute(path: &[Cell], maze_size: usize, config: &MetricsConfig) -> PathMetrics {
        let length = path_length(path);
        let cell_size_m = config.grid_extent_m / maze_size as f64;
        let distance_m = length * cell_size_m;
        PathMetrics {
            length,
            distance_m,
            traversal_time_s: distance_m / config.speed_mps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::CellState;

    use super::*;

    #[test]
    fn length_of_straight_and_bent_paths() {
        let path = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)];
        assert_eq!(path_length(&path), 2.0);
        assert_eq!(path_length(&path[..1]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }

    #[test]
    fn physical_units() {
        let path = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)];
        let config = MetricsConfig {
            grid_extent_m: 100.0,
            speed_mph: 3600.0 / METERS_PER_MILE,
        };
        let metrics = PathMetrics::compute(&path, 10, &config);
        assert_eq!(metrics.length, 2.0);
        assert!((metrics.distance_m - 20.0).abs() < 1e-9);
        assert!((metrics.traversal_time_s - 20.0).abs() < 1e-9);
    }

    #[test]
    fn validity() {
        let grid = MazeGrid::from_rows(&[[0u8, 0], [1, 0]]).unwrap();
        assert!(is_valid_path(&grid, &[Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]));
        assert!(!is_valid_path(&grid, &[Cell::new(0, 0), Cell::new(1, 1)]));
        assert!(!is_valid_path(&grid, &[Cell::new(0, 0), Cell::new(1, 0)]));
        assert!(!is_valid_path(&grid, &[]));
        assert!(is_valid_path(&MazeGrid::new(1, CellState::Open), &[Cell::new(0, 0)]));
    }
}
