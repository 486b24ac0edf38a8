use log::debug;
use smallvec::SmallVec;

use crate::astar_core::astar_lazy;
use crate::cell::{Cell, CellState};
use crate::error::{MazeError, Result};
use crate::{maze_grid::MazeGrid, solver::MazeSolver, Path};

pub const TRAP_COST: f64 = 5.0;
pub const REWARD_COST: f64 = -3.0;

/// A* over per-cell entry costs: traps are expensive, rewards lower the running cost. Accepts
/// any cell of a goal set, while the heuristic is measured towards the first goal only.
///
/// Reward costs are negative, so the usual A* guarantees do not hold. On a perfect maze every
/// cell has a single route from the start and the returned cost is that route's cost. Each cell
/// is expanded at most once, which keeps the search finite on grids with cycles as well.
#[derive(Clone, Debug)]
pub struct WeightedSolver {
    pub trap_cost: f64,
    pub reward_cost: f64,
}

impl Default for WeightedSolver {
    fn default() -> WeightedSolver {
        WeightedSolver::new()
    }
}

impl WeightedSolver {
    pub fn new() -> WeightedSolver {
        WeightedSolver {
            trap_cost: TRAP_COST,
            reward_cost: REWARD_COST,
        }
    }

    /// Computes a path from the start to one of the given goals. The selected goal is the last
    /// cell of the path.
    pub fn find_path_multiple_goals(
        &self,
        grid: &MazeGrid,
        start: Cell,
        goals: &[Cell],
    ) -> Result<Option<Path>> {
        let Some(target) = goals.first() else {
            return Err(MazeError::InvalidConfiguration(
                "goal set is empty".to_owned(),
            ));
        };
        Ok(self.search(grid, start, target, goals))
    }

    /// Weighted search with the heuristic aimed at `target`, ending on any cell of `goals`.
    fn search(&self, grid: &MazeGrid, start: Cell, target: &Cell, goals: &[Cell]) -> Option<Path> {
        let result = astar_lazy(
            &start,
            |cell| {
                grid.neighborhood(cell)
                    .into_iter()
                    .map(|n| (n, self.step_cost(grid, &n)))
                    .collect::<SmallVec<[(Cell, f64); 4]>>()
            },
            |cell| self.heuristic(cell, target),
            |cell| goals.contains(cell),
        );
        match result {
            Some((path, cost)) => {
                debug!("Weighted A*: reached {:?} with cost {}", path.last(), cost);
                Some(path)
            }
            None => {
                debug!("Weighted A*: none of {} goals reachable from {}", goals.len(), start);
                None
            }
        }
    }
}

impl MazeSolver for WeightedSolver {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn heuristic(&self, from: &Cell, to: &Cell) -> f64 {
        from.euclidean_distance(to)
    }

    fn step_cost(&self, grid: &MazeGrid, cell: &Cell) -> f64 {
        match grid.get(cell) {
            Some(CellState::Trap) => self.trap_cost,
            Some(CellState::Reward) => self.reward_cost,
            _ => 1.0,
        }
    }

    fn find_path(&self, grid: &MazeGrid, start: Cell, goal: Cell) -> Option<Path> {
        self.search(grid, start, &goal, &[goal])
    }
}
