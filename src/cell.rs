use core::fmt;
use smallvec::{smallvec, SmallVec};

use crate::error::MazeError;

/// A grid position. Cells compare lexicographically by row and then column,
/// which is the tie-break order used by every search frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// The 4-neighborhood in the order right, down, left, up. Bounds are not
    /// checked here, see [MazeGrid::neighborhood](crate::MazeGrid::neighborhood).
    pub fn neumann_neighborhood(&self) -> SmallVec<[Cell; 4]> {
        smallvec![
            Cell::new(self.row, self.col + 1),
            Cell::new(self.row + 1, self.col),
            Cell::new(self.row, self.col - 1),
            Cell::new(self.row - 1, self.col),
        ]
    }

    /// Cells two steps away on the carving lattice, ordered down, up, right, left.
    pub fn lattice_neighborhood(&self) -> SmallVec<[Cell; 4]> {
        smallvec![
            Cell::new(self.row + 2, self.col),
            Cell::new(self.row - 2, self.col),
            Cell::new(self.row, self.col + 2),
            Cell::new(self.row, self.col - 2),
        ]
    }

    /// The cell exactly between two lattice cells.
    pub fn midpoint(&self, other: &Cell) -> Cell {
        Cell::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn euclidean_distance(&self, other: &Cell) -> f64 {
        let d_row = (other.row - self.row) as f64;
        let d_col = (other.col - self.col) as f64;
        (d_row * d_row + d_col * d_col).sqrt()
    }

    /// True when the two cells share an edge.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> (i32, i32) {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of a single grid cell. The discriminants are the external encoding
/// shared with anything that renders or serializes grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellState {
    Open = 0,
    #[default]
    Wall = 1,
    Start = 2,
    Goal = 3,
    Trap = 4,
    Reward = 5,
}

impl CellState {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Anything but a wall can be entered.
    pub fn is_traversable(self) -> bool {
        self != CellState::Wall
    }
}

impl TryFrom<u8> for CellState {
    type Error = MazeError;

    fn try_from(code: u8) -> Result<CellState, MazeError> {
        match code {
            0 => Ok(CellState::Open),
            1 => Ok(CellState::Wall),
            2 => Ok(CellState::Start),
            3 => Ok(CellState::Goal),
            4 => Ok(CellState::Trap),
            5 => Ok(CellState::Reward),
            other => Err(MazeError::UnknownCellCode(other)),
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CellState::Open => "open",
            CellState::Wall => "wall",
            CellState::Start => "start",
            CellState::Goal => "goal",
            CellState::Trap => "trap",
            CellState::Reward => "reward",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_order_is_right_down_left_up() {
        let n = Cell::new(3, 3).neumann_neighborhood();
        assert_eq!(
            n.as_slice(),
            &[
                Cell::new(3, 4),
                Cell::new(4, 3),
                Cell::new(3, 2),
                Cell::new(2, 3)
            ]
        );
    }

    #[test]
    fn cells_order_by_row_then_column() {
        let mut cells = vec![Cell::new(2, 0), Cell::new(1, 5), Cell::new(1, 2)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(1, 2), Cell::new(1, 5), Cell::new(2, 0)]);
    }

    #[test]
    fn distances() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, 4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(a.euclidean_distance(&b), 5.0);
        assert!(a.is_adjacent(&Cell::new(0, 1)));
        assert!(!a.is_adjacent(&Cell::new(1, 1)));
        assert_eq!(Cell::new(1, 1).midpoint(&Cell::new(1, 3)), Cell::new(1, 2));
    }

    #[test]
    fn cell_state_codes() {
        for code in 0..=5u8 {
            assert_eq!(CellState::try_from(code).unwrap().code(), code);
        }
        assert_eq!(CellState::try_from(6), Err(MazeError::UnknownCellCode(6)));
        assert!(!CellState::Wall.is_traversable());
        assert!(CellState::Trap.is_traversable());
    }
}
