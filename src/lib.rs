//! # maze_pathfinding
//!
//! Generates perfect mazes with a randomized backtracker and solves them with a family of
//! interchangeable grid searches, so their speed and path quality can be compared:
//!
//! - [AstarSolver](solver::astar::AstarSolver): A* with the admissible Euclidean heuristic.
//! - [BiasedSolver](solver::biased::BiasedSolver): A* with a directionally biased Manhattan
//!   heuristic and open-set deduplication.
//! - [WeightedSolver](solver::weighted::WeightedSolver): A* over trap and reward entry costs
//!   towards any of several goals.
//! - [BidirectionalSolver](solver::bidirectional::BidirectionalSolver): forward and backward A*
//!   meeting in the middle.
//!
//! All solvers move on the 4-neighbourhood given by [MazeGrid::neighborhood] and break ties
//! between equal priorities by the smaller cell, so results are reproducible.
mod astar_core;
pub mod cell;
pub mod error;
pub mod generator;
pub mod maze_grid;
pub mod metrics;
pub mod solver;

pub use cell::{Cell, CellState};
pub use error::{MazeError, Result};
pub use generator::{generate, generate_with_rng, ExitPlacement, MazeConfig};
pub use maze_grid::MazeGrid;
pub use solver::{MazeSolver, SolverKind};

/// Cells from start to goal, both included.
pub type Path = Vec<Cell>;

/// Smallest grid the generator accepts.
pub const MIN_MAZE_SIZE: usize = 3;
/// Random draws allowed per grid cell when placing exits, traps and rewards.
pub const PLACEMENT_ATTEMPTS_PER_CELL: usize = 64;
