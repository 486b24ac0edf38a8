//! Perfect maze generation with a randomized backtracker.
//!
//! Carving works on the lattice of cells two steps apart, starting at (1, 1). The cell on top of
//! the stack is opened, one of its unvisited lattice neighbours is picked at random, the wall
//! between them is opened and the neighbour pushed. A cell without unvisited neighbours is
//! popped. Every carved cell is connected to the start by exactly one route.
//!
//! Afterwards the start is stamped at (1, 1), then either a single goal in the bottom-right corner
//! or randomly placed exits, and finally any requested traps and rewards on the remaining carved
//! cells.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::cell::{Cell, CellState};
use crate::error::{MazeError, Result};
use crate::maze_grid::MazeGrid;
use crate::{MIN_MAZE_SIZE, PLACEMENT_ATTEMPTS_PER_CELL};

/// Where goal cells go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitPlacement {
    /// One goal on the bottom-right lattice cell.
    BottomRight,
    /// The given number of exits on random open cells.
    Random(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    pub size: usize,
    pub traps: usize,
    pub rewards: usize,
    pub exits: ExitPlacement,
    /// Upper bound on random draws when placing exits, traps and rewards. Defaults to
    /// `PLACEMENT_ATTEMPTS_PER_CELL` draws per grid cell.
    pub max_placement_attempts: Option<usize>,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig::new(501)
    }
}

impl MazeConfig {
    pub fn new(size: usize) -> MazeConfig {
        MazeConfig {
            size,
            traps: 0,
            rewards: 0,
            exits: ExitPlacement::BottomRight,
            max_placement_attempts: None,
        }
    }

    pub fn with_traps(mut self, traps: usize) -> MazeConfig {
        self.traps = traps;
        self
    }

    pub fn with_rewards(mut self, rewards: usize) -> MazeConfig {
        self.rewards = rewards;
        self
    }

    pub fn with_random_exits(mut self, exits: usize) -> MazeConfig {
        self.exits = ExitPlacement::Random(exits);
        self
    }

    pub fn with_max_placement_attempts(mut self, attempts: usize) -> MazeConfig {
        self.max_placement_attempts = Some(attempts);
        self
    }

    fn placement_attempts(&self) -> usize {
        self.max_placement_attempts
            .unwrap_or(self.size * self.size * PLACEMENT_ATTEMPTS_PER_CELL)
    }

    /// The bottom-right interior cell on the carving lattice.
    pub fn bottom_right(&self) -> Cell {
        let last = self.size as i32 - 2;
        let last = if last % 2 == 1 { last } else { last - 1 };
        Cell::new(last, last)
    }

    fn validate(&self) -> Result<()> {
        if self.size < MIN_MAZE_SIZE {
            return Err(MazeError::InvalidConfiguration(format!(
                "maze size {} is below the minimum of {}",
                self.size, MIN_MAZE_SIZE
            )));
        }
        match self.exits {
            ExitPlacement::BottomRight if self.bottom_right() == START => {
                Err(MazeError::InvalidConfiguration(format!(
                    "maze size {} leaves no room for a goal apart from the start",
                    self.size
                )))
            }
            ExitPlacement::Random(0) => Err(MazeError::InvalidConfiguration(
                "at least one exit is required".to_owned(),
            )),
            _ => Ok(()),
        }
    }
}

/// Every maze starts in the top-left lattice cell.
pub const START: Cell = Cell::new(1, 1);

/// Generates a maze seeded from `seed`. The same config and seed always produce the same grid.
pub fn generate(config: &MazeConfig, seed: u64) -> Result<MazeGrid> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(config, &mut rng)
}

/// Generates a maze drawing from a caller-owned random source.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<MazeGrid> {
    config.validate()?;
    let mut grid = MazeGrid::new(config.size, CellState::Wall);
    carve(&mut grid, rng);
    grid.set(&START, CellState::Start);

    let exits = match config.exits {
        ExitPlacement::BottomRight => {
            grid.set(&config.bottom_right(), CellState::Goal);
            0
        }
        ExitPlacement::Random(exits) => exits,
    };
    place_special_cells(&mut grid, rng, config, exits)?;
    info!(
        "Generated {}x{} maze with {} open cells",
        config.size,
        config.size,
        config.size * config.size - grid.count(CellState::Wall)
    );
    Ok(grid)
}

/// Places random exits, then traps, then rewards on carved cells, all drawing from one budget.
fn place_special_cells<R: Rng + ?Sized>(
    grid: &mut MazeGrid,
    rng: &mut R,
    config: &MazeConfig,
    exits: usize,
) -> Result<()> {
    let requested = exits + config.traps + config.rewards;
    if requested == 0 {
        return Ok(());
    }
    let available = grid.count(CellState::Open);
    if requested > available {
        warn!(
            "Cannot place {} special cells on {} open cells",
            requested, available
        );
        return Err(MazeError::GenerationExhausted {
            requested,
            available,
        });
    }
    let mut attempts = config.placement_attempts();
    for (state, count) in [
        (CellState::Goal, exits),
        (CellState::Trap, config.traps),
        (CellState::Reward, config.rewards),
    ] {
        if !place(grid, rng, state, count, &mut attempts) {
            warn!(
                "Gave up placing {} cells after {} draws",
                state,
                config.placement_attempts()
            );
            return Err(MazeError::GenerationExhausted {
                requested,
                available,
            });
        }
    }
    Ok(())
}

fn carve<R: Rng + ?Sized>(grid: &mut MazeGrid, rng: &mut R) {
    let mut stack = vec![START];
    while let Some(&current) = stack.last() {
        grid.set(&current, CellState::Open);
        let unvisited = current
            .lattice_neighborhood()
            .into_iter()
            .filter(|n| grid.get(n) == Some(CellState::Wall))
            .collect::<SmallVec<[Cell; 4]>>();
        match unvisited.choose(rng) {
            Some(next) => {
                grid.set(&current.midpoint(next), CellState::Open);
                stack.push(*next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Stamps `count` random open cells with `state`, drawing row then column uniformly. Returns
/// false if the draw budget runs out first.
fn place<R: Rng + ?Sized>(
    grid: &mut MazeGrid,
    rng: &mut R,
    state: CellState,
    count: usize,
    attempts: &mut usize,
) -> bool {
    let size = grid.size() as i32;
    let mut placed = 0;
    while placed < count {
        if *attempts == 0 {
            return false;
        }
        *attempts -= 1;
        let cell = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if grid.get(&cell) == Some(CellState::Open) {
            grid.set(&cell, state);
            placed += 1;
        }
    }
    debug!("Placed {} {} cells", count, state);
    true
}
