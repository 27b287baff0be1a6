//! Puzzle playfield and the solver contract for the 8-puzzle.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::Board;
use crate::games::{Direction, Level};
use crate::session::{Frame, MovePlan, Playfield, Replay, Signal};
use crate::Algorithm;

const BOARD_FRAME: Duration = Duration::from_millis(300);

/// A puzzle level as served by the level repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleLevel {
    id: u32,
    name: String,
    /// Initial board.
    state: Board,
}

impl PuzzleLevel {
    /// Creates a puzzle level.
    pub fn new(id: u32, name: impl Into<String>, state: Board) -> Self {
        Self {
            id,
            name: name.into(),
            state,
        }
    }

    /// The initial board.
    pub fn state(&self) -> &Board {
        &self.state
    }
}

impl Level for PuzzleLevel {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /api/puzzle/solve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSolveRequest {
    /// Board to solve from.
    pub state: Board,
    /// Search strategy.
    pub algorithm: Algorithm,
}

/// Solver response for a puzzle board: full board snapshots from start to
/// solved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSolution {
    /// Whether the solved state was reached within the solver's limits.
    pub found: bool,
    /// Successive boards.
    #[serde(default)]
    pub path: Vec<Board>,
}

/// Live puzzle state for one loaded level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleField {
    level: PuzzleLevel,
    board: Board,
}

impl PuzzleField {
    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Playfield for PuzzleField {
    type Level = PuzzleLevel;
    type Cursor = usize;
    type Step = Board;
    type Request = PuzzleSolveRequest;
    type Solution = PuzzleSolution;

    #[instrument(skip(level), fields(level_id = level.id))]
    fn from_level(level: PuzzleLevel) -> Self {
        Self {
            board: level.state,
            level,
        }
    }

    fn level(&self) -> &PuzzleLevel {
        &self.level
    }

    fn plan(&self, direction: Direction) -> MovePlan<usize> {
        match self.board.neighbor(direction) {
            Some(index) => MovePlan::Accept(index),
            None => MovePlan::OutOfBounds,
        }
    }

    fn commit(&mut self, to: usize) -> bool {
        self.board.slide(to);
        self.board.is_solved()
    }

    fn rewind(&mut self) {
        self.board = self.level.state;
    }

    fn solve_request(&self, algorithm: Algorithm) -> PuzzleSolveRequest {
        PuzzleSolveRequest {
            state: self.board,
            algorithm,
        }
    }

    fn replay(solution: PuzzleSolution) -> Option<Replay<Board>> {
        solution.found.then(|| {
            let frames = solution
                .path
                .into_iter()
                .map(|board| Frame::new(BOARD_FRAME, board))
                .collect();
            Replay::new(frames, None)
        })
    }

    fn apply_step(&mut self, board: Board) -> Option<Signal> {
        self.board = board;
        Some(Signal::Move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_away() -> PuzzleField {
        let board = Board::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        PuzzleField::from_level(PuzzleLevel::new(1, "Beginner", board))
    }

    #[test]
    fn only_blank_adjacent_moves_are_planned() {
        let field = one_away();
        assert_eq!(field.plan(Direction::Down), MovePlan::OutOfBounds);
        assert_eq!(field.plan(Direction::Right), MovePlan::Accept(8));
        assert_eq!(field.plan(Direction::Up), MovePlan::Accept(4));
    }

    #[test]
    fn commit_detects_solved_board() {
        let mut field = one_away();
        assert!(field.commit(8));
        assert_eq!(*field.board(), Board::SOLVED);
    }

    #[test]
    fn solve_request_carries_current_board() {
        let mut field = one_away();
        field.commit(4);
        field.rewind();
        let request = field.solve_request(Algorithm::Dfs);
        assert_eq!(request.state, *field.level().state());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"state": [1, 2, 3, 4, 5, 6, 7, 0, 8], "algorithm": "DFS"})
        );
    }

    #[test]
    fn replay_uses_fixed_cadence_and_signals_moves() {
        let solution = PuzzleSolution {
            found: true,
            path: vec![Board::SOLVED],
        };
        let replay = PuzzleField::replay(solution).unwrap();
        assert_eq!(replay.frames().len(), 1);
        assert_eq!(replay.frames()[0].delay, BOARD_FRAME);

        let mut field = one_away();
        assert_eq!(field.apply_step(Board::SOLVED), Some(Signal::Move));
        assert!(field.board().is_solved());
    }
}
