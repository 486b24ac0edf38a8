use core::fmt;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::{Cell, CellState};
use crate::error::{MazeError, Result};

/// A square grid of [CellState]s. Generated once by the
/// [generator](crate::generator) and only read by the solvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    size: usize,
    cells: Vec<CellState>,
}

impl MazeGrid {
    /// Creates a `size` x `size` grid with every cell set to `fill`.
    pub fn new(size: usize, fill: CellState) -> MazeGrid {
        MazeGrid {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Builds a grid from rows of cell codes (0 open, 1 wall, 2 start, 3 goal,
    /// 4 trap, 5 reward).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<MazeGrid> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(MazeError::NotSquare {
                    row,
                    found: values.len(),
                    expected: size,
                });
            }
            for &code in values {
                cells.push(CellState::try_from(code)?);
            }
        }
        Ok(MazeGrid { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.size
            && (cell.col as usize) < self.size
    }

    fn get_ix(&self, cell: &Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.row as usize * self.size + cell.col as usize)
    }

    fn cell_at(&self, ix: usize) -> Cell {
        Cell::new((ix / self.size) as i32, (ix % self.size) as i32)
    }

    /// State of the cell, or [None] if it lies outside the grid.
    pub fn get(&self, cell: &Cell) -> Option<CellState> {
        self.get_ix(cell).map(|ix| self.cells[ix])
    }

    /// Sets the state of `cell`. Returns false, leaving the grid untouched, if the cell lies
    /// outside the grid.
    pub fn set(&mut self, cell: &Cell, state: CellState) -> bool {
        match self.get_ix(cell) {
            Some(ix) => {
                self.cells[ix] = state;
                true
            }
            None => false,
        }
    }

    pub fn can_move_to(&self, cell: &Cell) -> bool {
        self.get(cell).is_some_and(CellState::is_traversable)
    }

    /// In-bounds, non-wall neighbours of `cell` in the order right, down, left,
    /// up. Searches depend on this order to pick between equal-cost paths.
    pub fn neighborhood(&self, cell: &Cell) -> SmallVec<[Cell; 4]> {
        cell.neumann_neighborhood()
            .into_iter()
            .filter(|n| self.can_move_to(n))
            .collect()
    }

    /// All cells with their states in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(ix, &state)| (self.cell_at(ix), state))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// The first Start cell in row-major order.
    pub fn start(&self) -> Option<Cell> {
        self.cells()
            .find(|(_, state)| *state == CellState::Start)
            .map(|(cell, _)| cell)
    }

    /// Every Goal cell in row-major order.
    pub fn goals(&self) -> Vec<Cell> {
        self.cells()
            .filter(|(_, state)| *state == CellState::Goal)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Links every pair of adjacent traversable cells in a [UnionFind] indexed
    /// in row-major order.
    pub fn generate_components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cells.len());
        for (cell, state) in self.cells() {
            if !state.is_traversable() {
                continue;
            }
            let parent_ix = self.cell_index(&cell);
            // Right and down cover every edge exactly once.
            for n in [Cell::new(cell.row, cell.col + 1), Cell::new(cell.row + 1, cell.col)] {
                if self.can_move_to(&n) {
                    components.union(parent_ix, self.cell_index(&n));
                }
            }
        }
        components
    }

    fn cell_index(&self, cell: &Cell) -> usize {
        cell.row as usize * self.size + cell.col as usize
    }

    /// Checks if start and goal are traversable and on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        if !self.can_move_to(start) || !self.can_move_to(goal) {
            return false;
        }
        self.generate_components()
            .equiv(self.cell_index(start), self.cell_index(goal))
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row.iter().map(|s| char::from(b'0' + s.code())).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
