use fxhash::FxHashSet;
use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;
use std::collections::BinaryHeap;

use crate::astar_core::{reverse_path, FrontierEntry, FxIndexMap, NO_PARENT};
use crate::{cell::Cell, maze_grid::MazeGrid, solver::MazeSolver, Path};

/// Weight of the directional term added to the Manhattan distance.
pub const BIAS_FACTOR: f64 = 0.5;

/// A* steered by a Manhattan heuristic with a directional bias. The heuristic can overestimate,
/// so paths are not guaranteed to be shortest.
///
/// Unlike [AstarSolver](super::astar::AstarSolver), a cell is only pushed onto the frontier
/// when it is not already on it. A cheaper route found while the cell waits updates its
/// predecessor and cost but leaves the queued priority as it was.
#[derive(Clone, Debug)]
pub struct BiasedSolver {
    pub bias_factor: f64,
}

impl Default for BiasedSolver {
    fn default() -> BiasedSolver {
        BiasedSolver::new()
    }
}

impl BiasedSolver {
    pub fn new() -> BiasedSolver {
        BiasedSolver {
            bias_factor: BIAS_FACTOR,
        }
    }
}

impl MazeSolver for BiasedSolver {
    fn name(&self) -> &'static str {
        "biased"
    }

    /// `(dx + dy) + (dx - dy) * bias` with dx, dy the absolute row and column deltas.
    fn heuristic(&self, from: &Cell, to: &Cell) -> f64 {
        let dx = (to.row - from.row).abs() as f64;
        let dy = (to.col - from.col).abs() as f64;
        (dx + dy) + (dx - dy) * self.bias_factor
    }

    fn find_path(&self, grid: &MazeGrid, start: Cell, goal: Cell) -> Option<Path> {
        let mut open_list = BinaryHeap::new();
        open_list.push(FrontierEntry {
            estimated_cost: self.heuristic(&start, &goal),
            cost: 0.0,
            cell: start,
            index: 0,
        });
        let mut open_set: FxHashSet<Cell> = FxHashSet::default();
        open_set.insert(start);
        let mut parents: FxIndexMap<Cell, (usize, f64)> = FxIndexMap::default();
        parents.insert(start, (NO_PARENT, 0.0));

        while let Some(FrontierEntry { cell, index, .. }) = open_list.pop() {
            if cell == goal {
                return Some(reverse_path(&parents, |&(p, _)| p, index));
            }
            open_set.remove(&cell);
            let cost = parents[index].1;
            for neighbor in grid.neighborhood(&cell) {
                let new_cost = cost + 1.0;
                let n = match parents.entry(neighbor) {
                    Vacant(e) => {
                        let n = e.index();
                        e.insert((index, new_cost));
                        n
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().1 {
                            e.insert((index, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };
                if open_set.insert(neighbor) {
                    open_list.push(FrontierEntry {
                        estimated_cost: new_cost + self.heuristic(&neighbor, &goal),
                        cost: new_cost,
                        cell: neighbor,
                        index: n,
                    });
                }
            }
        }
        debug!("Biased A*: no path from {} to {}", start, goal);
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::astar_core::astar_lazy;
    use crate::cell::CellState;
    use crate::metrics::is_valid_path;
    use crate::solver::astar::AstarSolver;

    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn heuristic_leans_on_row_delta() {
        let solver = BiasedSolver::new();
        let origin = Cell::new(0, 0);
        assert_eq!(solver.heuristic(&origin, &Cell::new(3, 1)), 5.0);
        assert_eq!(solver.heuristic(&origin, &Cell::new(1, 3)), 3.0);
        assert_eq!(solver.heuristic(&origin, &origin), 0.0);
    }

    #[test]
    fn equal_start_goal() {
        let grid = MazeGrid::new(3, CellState::Open);
        let start = Cell::new(2, 0);
        let path = BiasedSolver::new().find_path(&grid, start, start).unwrap();
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn finds_connected_path_on_open_grid() {
        let grid = MazeGrid::new(6, CellState::Open);
        let start = Cell::new(0, 0);
        let goal = Cell::new(5, 4);
        let path = BiasedSolver::new().find_path(&grid, start, goal).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(is_valid_path(&grid, &path));
        assert!(path.len() >= 10);
    }

    #[test]
    fn walled_off_goal_has_no_path() {
        let grid = MazeGrid::from_rows(&[[2u8, 0, 1], [0, 0, 1], [1, 1, 3]]).unwrap();
        assert!(BiasedSolver::new()
            .find_path(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .is_none());
    }

    /// The heuristic weighs the row delta three times the column delta, so the search heads down
    /// the left side and ends up two steps longer than the route along the top and right border.
    #[test]
    fn overestimating_heuristic_takes_longer_route() {
        // |S . . . . . .|
        // |. . . . # # .|
        // |# . . . . # .|
        // |. # . # . # .|
        // |. . . # # . .|
        // |. . # . . # .|
        // |. . . . . . G|
        let grid = MazeGrid::from_rows(&[
            [2u8, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 1, 0],
            [1, 0, 0, 0, 0, 1, 0],
            [0, 1, 0, 1, 0, 1, 0],
            [0, 0, 0, 1, 1, 0, 0],
            [0, 0, 1, 0, 0, 1, 0],
            [0, 0, 0, 0, 0, 0, 3],
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(6, 6);
        let shortest = AstarSolver::new().find_path(&grid, start, goal).unwrap();
        assert_eq!(
            shortest,
            cells(&[
                (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6),
                (1, 6), (2, 6), (3, 6), (4, 6), (5, 6), (6, 6),
            ])
        );
        let solver = BiasedSolver::new();
        let path = solver.find_path(&grid, start, goal).unwrap();
        assert_eq!(
            path,
            cells(&[
                (0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (3, 2), (4, 2), (4, 1),
                (5, 1), (6, 1), (6, 2), (6, 3), (6, 4), (6, 5), (6, 6),
            ])
        );
        assert!(is_valid_path(&grid, &path));
        assert_eq!(solver.path_cost(&grid, &path), 14.0);
        assert_eq!(solver.path_cost(&grid, &shortest), 12.0);
    }

    /// A queued cell keeps its first priority even after a cheaper predecessor is found, so the
    /// open-set search breaks this tie differently from a search that re-queues improved cells.
    #[test]
    fn queued_cells_keep_their_priority() {
        let grid = MazeGrid::from_rows(&[
            [2u8, 0, 0, 0, 0],
            [0, 0, 0, 0, 1],
            [0, 1, 0, 0, 0],
            [0, 0, 0, 1, 0],
            [0, 0, 1, 1, 3],
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(4, 4);
        let solver = BiasedSolver::new();
        let path = solver.find_path(&grid, start, goal).unwrap();
        assert_eq!(
            path,
            cells(&[(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (2, 3), (2, 4), (3, 4), (4, 4)])
        );
        let (requeued, _) = astar_lazy(
            &start,
            |cell| {
                grid.neighborhood(cell)
                    .into_iter()
                    .map(|n| (n, 1.0))
                    .collect::<Vec<_>>()
            },
            |cell| solver.heuristic(cell, &goal),
            |cell| *cell == goal,
        )
        .unwrap();
        assert_eq!(
            requeued,
            cells(&[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2), (2, 3), (2, 4), (3, 4), (4, 4)])
        );
    }
}
