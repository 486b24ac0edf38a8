use core::fmt;
use core::str::FromStr;

use crate::cell::Cell;
use crate::error::MazeError;
use crate::maze_grid::MazeGrid;
use crate::Path;

pub mod astar;
pub mod biased;
pub mod bidirectional;
pub mod weighted;

use astar::AstarSolver;
use biased::BiasedSolver;
use bidirectional::BidirectionalSolver;
use weighted::WeightedSolver;

/// A search strategy over a [MazeGrid]. Every call builds and drops its own search state, so a
/// solver can be reused across grids and calls.
pub trait MazeSolver {
    /// Short name used in logs and benchmark labels.
    fn name(&self) -> &'static str;

    /// Estimated remaining cost from `from` to `to`.
    fn heuristic(&self, from: &Cell, to: &Cell) -> f64;

    /// Cost of entering `cell`. Unit cost unless a solver weighs cell types.
    fn step_cost(&self, _grid: &MazeGrid, _cell: &Cell) -> f64 {
        1.0
    }

    /// Computes a path from start to goal, both included. Returns [None] when the frontier is
    /// exhausted without reaching the goal.
    fn find_path(&self, grid: &MazeGrid, start: Cell, goal: Cell) -> Option<Path>;

    /// Sum of the entry costs of every cell after the first.
    fn path_cost(&self, grid: &MazeGrid, path: &[Cell]) -> f64 {
        path.iter().skip(1).map(|c| self.step_cost(grid, c)).sum()
    }
}

/// Selects one of the available strategies, e.g. from a benchmark or demo argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverKind {
    Astar,
    Biased,
    Weighted,
    Bidirectional,
}

impl SolverKind {
    pub const ALL: [SolverKind; 4] = [
        SolverKind::Astar,
        SolverKind::Biased,
        SolverKind::Weighted,
        SolverKind::Bidirectional,
    ];

    pub fn solver(self) -> Box<dyn MazeSolver> {
        match self {
            SolverKind::Astar => Box::new(AstarSolver::new()),
            SolverKind::Biased => Box::new(BiasedSolver::new()),
            SolverKind::Weighted => Box::new(WeightedSolver::new()),
            SolverKind::Bidirectional => Box::new(BidirectionalSolver::new()),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SolverKind::Astar => "astar",
            SolverKind::Biased => "biased",
            SolverKind::Weighted => "weighted",
            SolverKind::Bidirectional => "bidirectional",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<SolverKind, MazeError> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MazeError::InvalidConfiguration(format!("unknown solver '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_kind_round_trips_through_its_name() {
        for kind in SolverKind::ALL {
            assert_eq!(kind.to_string().parse::<SolverKind>(), Ok(kind));
            assert_eq!(kind.solver().name(), kind.as_str());
        }
        assert!("dijkstra".parse::<SolverKind>().is_err());
    }
}
