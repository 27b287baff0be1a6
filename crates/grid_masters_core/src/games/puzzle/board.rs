//! 8-puzzle board: a permutation of 0..=8 with 0 as the blank.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::games::Direction;

const SIDE: usize = 3;
const TILES: usize = SIDE * SIDE;

/// Error building a board from raw tiles.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardError {
    /// The sequence does not have nine entries.
    #[display("Board needs 9 tiles, got {}", _0)]
    WrongLength(usize),

    /// Some value in 0..=8 is missing or repeated.
    #[display("Board tiles {:?} are not a permutation of 0..=8", _0)]
    NotPermutation(Vec<u8>),
}

impl std::error::Error for BoardError {}

/// Nine tiles in row-major order; always a valid permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board([u8; TILES]);

impl Board {
    /// The solved arrangement, blank in the bottom-right corner.
    pub const SOLVED: Board = Board([1, 2, 3, 4, 5, 6, 7, 8, 0]);

    /// Creates a board, checking the permutation invariant.
    pub fn new(tiles: [u8; TILES]) -> Result<Self, BoardError> {
        let mut seen = [false; TILES];
        for &tile in &tiles {
            match seen.get_mut(usize::from(tile)) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(BoardError::NotPermutation(tiles.to_vec())),
            }
        }
        Ok(Self(tiles))
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> &[u8; TILES] {
        &self.0
    }

    /// Index of the blank slot.
    pub fn blank(&self) -> usize {
        self.0.iter().position(|&t| t == 0).unwrap_or(TILES - 1)
    }

    /// Index-wise equality with [`Board::SOLVED`].
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Slot the blank would move into, or `None` at the edge of the 3x3 grid.
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        let blank = self.blank();
        let (dr, dc) = direction.delta();
        let row = (blank / SIDE).checked_add_signed(dr)?;
        let col = (blank % SIDE).checked_add_signed(dc)?;
        (row < SIDE && col < SIDE).then_some(row * SIDE + col)
    }

    /// Swaps the blank with the tile at `index`.
    ///
    /// Any swap of two slots keeps the permutation invariant.
    pub fn slide(&mut self, index: usize) {
        if index < TILES {
            let blank = self.blank();
            self.0.swap(blank, index);
        }
    }

    /// Rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.0.chunks(SIDE)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = BoardError;

    fn try_from(tiles: Vec<u8>) -> Result<Self, Self::Error> {
        let tiles: [u8; TILES] = tiles
            .try_into()
            .map_err(|rejected: Vec<u8>| BoardError::WrongLength(rejected.len()))?;
        Self::new(tiles)
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.0.to_vec()
    }
}
