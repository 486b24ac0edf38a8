//! Error types for maze generation and search setup.
//!
//! A search that exhausts its frontier is not an error: solvers return [None].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Generation exhausted: requested {requested} special cells but only {available} open cells are available")]
    GenerationExhausted { requested: usize, available: usize },

    #[error("Unknown cell code: {0}")]
    UnknownCellCode(u8),

    #[error("Grid is not square: row {row} has {found} cells, expected {expected}")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, MazeError>;
