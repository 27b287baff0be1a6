//! Puzzle variant: the 3x3 sliding-tile game with one blank slot.

mod board;
mod field;

pub use board::{Board, BoardError};
pub use field::{PuzzleField, PuzzleLevel, PuzzleSolution, PuzzleSolveRequest};
