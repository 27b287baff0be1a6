//! Game variants: maze navigation and the 8-puzzle.

pub mod maze;
pub mod puzzle;

use std::fmt;

use strum::{Display, EnumIter};

/// One of the four directional inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// Row and column offsets for one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Static level data supplied by the level repository.
///
/// Levels are immutable once loaded; a session only holds a copy of the one
/// it is playing.
pub trait Level: Clone + fmt::Debug + Send + Sync + 'static {
    /// Repository identifier.
    fn id(&self) -> u32;
    /// Human-readable name.
    fn name(&self) -> &str;
}
