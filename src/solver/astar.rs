use log::debug;
use smallvec::SmallVec;

use crate::astar_core::astar_lazy;
use crate::{cell::Cell, maze_grid::MazeGrid, solver::MazeSolver, Path};

/// Unidirectional A* with unit move costs and the straight-line distance as heuristic. The
/// heuristic is consistent on a 4-grid, so returned paths are shortest paths.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl MazeSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "astar"
    }

    /// Euclidean distance.
    fn heuristic(&self, from: &Cell, to: &Cell) -> f64 {
        from.euclidean_distance(to)
    }

    fn find_path(&self, grid: &MazeGrid, start: Cell, goal: Cell) -> Option<Path> {
        let result = astar_lazy(
            &start,
            |cell| {
                grid.neighborhood(cell)
                    .into_iter()
                    .map(|n| (n, 1.0))
                    .collect::<SmallVec<[(Cell, f64); 4]>>()
            },
            |cell| self.heuristic(cell, &goal),
            |cell| *cell == goal,
        );
        if result.is_none() {
            debug!("A*: no path from {} to {}", start, goal);
        }
        result.map(|(path, _cost)| path)
    }
}
