use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;
use std::collections::BinaryHeap;

use crate::astar_core::{reverse_path, FrontierEntry, FxIndexMap, NO_PARENT};
use crate::{cell::Cell, maze_grid::MazeGrid, solver::MazeSolver, Path};

/// Bidirectional A*: a forward search from the start towards the goal and a backward search from
/// the goal towards the start take turns, one expansion each. The search ends at the first cell
/// popped by one side that the other side has already discovered.
///
/// The meeting cell is not checked for optimality, so the joined path can be longer than the
/// shortest path on grids with cycles. On a perfect maze it is the unique route.
#[derive(Clone, Debug, Default)]
pub struct BidirectionalSolver;

impl BidirectionalSolver {
    pub fn new() -> BidirectionalSolver {
        BidirectionalSolver
    }
}

/// Search state of one direction.
struct Side {
    to_see: BinaryHeap<FrontierEntry<f64>>,
    parents: FxIndexMap<Cell, (usize, f64)>,
    target: Cell,
}

impl Side {
    fn new(root: Cell, target: Cell) -> Side {
        let mut to_see = BinaryHeap::new();
        to_see.push(FrontierEntry {
            estimated_cost: root.euclidean_distance(&target),
            cost: 0.0,
            cell: root,
            index: 0,
        });
        let mut parents = FxIndexMap::default();
        parents.insert(root, (NO_PARENT, 0.0));
        Side {
            to_see,
            parents,
            target,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.to_see.is_empty()
    }

    fn pop(&mut self) -> Option<FrontierEntry<f64>> {
        self.to_see.pop()
    }

    fn has_discovered(&self, cell: &Cell) -> bool {
        self.parents.contains_key(cell)
    }

    fn expand(&mut self, grid: &MazeGrid, cell: &Cell, index: usize) {
        let cost = self.parents[index].1;
        for neighbor in grid.neighborhood(cell) {
            let new_cost = cost + 1.0;
            let n = match self.parents.entry(neighbor) {
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
            self.to_see.push(FrontierEntry {
                estimated_cost: new_cost + neighbor.euclidean_distance(&self.target),
                cost: new_cost,
                cell: neighbor,
                index: n,
            });
        }
    }

    /// Cells from the root to `cell`.
    fn chain(&self, cell: &Cell) -> Vec<Cell> {
        match self.parents.get_index_of(cell) {
            Some(index) => reverse_path(&self.parents, |&(p, _)| p, index),
            None => Vec::new(),
        }
    }
}

impl MazeSolver for BidirectionalSolver {
    fn name(&self) -> &'static str {
        "bidirectional"
    }

    fn heuristic(&self, from: &Cell, to: &Cell) -> f64 {
        from.euclidean_distance(to)
    }

    fn find_path(&self, grid: &MazeGrid, start: Cell, goal: Cell) -> Option<Path> {
        let mut forward = Side::new(start, goal);
        let mut backward = Side::new(goal, start);
        let mut meeting = None;

        while !forward.is_exhausted() || !backward.is_exhausted() {
            if let Some(FrontierEntry { cell, index, .. }) = forward.pop() {
                if backward.has_discovered(&cell) {
                    meeting = Some(cell);
                    break;
                }
                forward.expand(grid, &cell, index);
            }
            if let Some(FrontierEntry { cell, index, .. }) = backward.pop() {
                if forward.has_discovered(&cell) {
                    meeting = Some(cell);
                    break;
                }
                backward.expand(grid, &cell, index);
            }
        }

        let Some(meeting) = meeting else {
            debug!("Bidirectional A*: no path from {} to {}", start, goal);
            return None;
        };
        debug!("Bidirectional A*: searches met at {}", meeting);
        let mut path = forward.chain(&meeting);
        // The backward chain runs goal..meeting, the meeting cell is already in the path.
        let mut tail = backward.chain(&meeting);
        tail.pop();
        path.extend(tail.into_iter().rev());
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::CellState;
    use crate::metrics::is_valid_path;
    use crate::solver::astar::AstarSolver;

    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn equal_start_goal() {
        let grid = MazeGrid::new(3, CellState::Open);
        let start = Cell::new(1, 1);
        let path = BidirectionalSolver::new()
            .find_path(&grid, start, start)
            .unwrap();
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn adjacent_cells() {
        let grid = MazeGrid::new(3, CellState::Open);
        let path = BidirectionalSolver::new()
            .find_path(&grid, Cell::new(0, 0), Cell::new(0, 1))
            .unwrap();
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn corridor_is_walked_end_to_end() {
        // |2 0 0 0 0 0 3|
        let mut grid = MazeGrid::new(7, CellState::Wall);
        for col in 0..7 {
            grid.set(&Cell::new(3, col), CellState::Open);
        }
        let start = Cell::new(3, 0);
        let goal = Cell::new(3, 6);
        let path = BidirectionalSolver::new()
            .find_path(&grid, start, goal)
            .unwrap();
        let expected: Vec<Cell> = (0..7).map(|col| Cell::new(3, col)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn open_grid_path_is_connected() {
        let grid = MazeGrid::new(8, CellState::Open);
        let start = Cell::new(0, 0);
        let goal = Cell::new(7, 5);
        let path = BidirectionalSolver::new()
            .find_path(&grid, start, goal)
            .unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(is_valid_path(&grid, &path));
    }

    #[test]
    fn walled_off_goal_has_no_path() {
        let grid = MazeGrid::from_rows(&[[2u8, 0, 1], [0, 0, 1], [1, 1, 3]]).unwrap();
        assert!(BidirectionalSolver::new()
            .find_path(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .is_none());
    }

    /// The searches meet on the detour through the middle before either finds the border route.
    #[test]
    fn first_meeting_can_miss_the_shortest_path() {
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
        let path = BidirectionalSolver::new()
            .find_path(&grid, start, goal)
            .unwrap();
        assert_eq!(
            path,
            cells(&[
                (0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (3, 2), (4, 2), (4, 1),
                (5, 1), (6, 1), (6, 2), (6, 3), (6, 4), (6, 5), (6, 6),
            ])
        );
        assert!(is_valid_path(&grid, &path));
        assert_eq!(path.len(), shortest.len() + 2);
    }
}
