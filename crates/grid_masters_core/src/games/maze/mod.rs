//! Maze variant: walk from the start cell to the goal cell.

mod field;
mod grid;
mod solution;

pub use field::{MazeField, MazeLevel, MazeStep};
pub use grid::{Cell, CellKind, CellState, Grid, Position};
pub use solution::{MazeSolution, MazeSolveRequest};
