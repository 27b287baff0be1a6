//! Grid Masters core - the session engine behind maze and 8-puzzle play.
//!
//! This crate owns everything that decides *what the game state is*:
//!
//! - **Games**: the maze [`Grid`] with its visited/path overlay and the
//!   8-puzzle [`Board`], each wrapped in a [`Playfield`].
//! - **Session**: the [`SessionController`] state machine that reconciles
//!   manual moves, the elapsed-time [`TimerService`] and solver replay
//!   through the [`AnimationPlayer`].
//!
//! Nothing here touches the terminal or the network. Time is passed in as
//! [`tokio::time::Instant`] values and side effects leave through the
//! [`SignalSink`] seam, so every transition can be driven from a test.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use grid_masters_core::{Direction, MazeField, MazeLevel, Position, SessionController, SessionStatus, SignalLog};
//! use tokio::time::Instant;
//!
//! let level = MazeLevel::new(1, "Open field", vec![vec![0, 0], vec![0, 0]], Position::new(0, 0), Position::new(1, 1));
//! let mut session = SessionController::<MazeField>::new(Arc::new(SignalLog::default()));
//! session.load(level);
//!
//! let now = Instant::now();
//! session.step(Direction::Right, now);
//! session.step(Direction::Down, now);
//! assert_eq!(session.status(), SessionStatus::Finished);
//! assert_eq!(*session.stats().moves(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod algorithm;
mod games;
mod session;

pub use algorithm::Algorithm;

pub use games::{Direction, Level};
pub use games::maze::{
    Cell, CellKind, CellState, Grid, MazeField, MazeLevel, MazeSolution, MazeSolveRequest,
    MazeStep, Position,
};
pub use games::puzzle::{Board, BoardError, PuzzleField, PuzzleLevel, PuzzleSolution, PuzzleSolveRequest};

pub use session::{
    AnimationPlayer, Frame, MoveOutcome, MovePlan, Notice, Playfield, Replay, SessionController,
    SessionSnapshot, SessionStats, SessionStatus, Signal, SignalLog, SignalSink, Silent,
    SolveOutcome, SolveTicket, SolverStats, Tick, Ticker, TimerService,
};
