//! The seam between the session engine and a game variant.

use std::fmt;
use std::time::Duration;

use crate::games::{Direction, Level};
use crate::session::Signal;
use crate::Algorithm;

/// What a directional input would do against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlan<C> {
    /// Legal move to the given cursor (cell or blank slot).
    Accept(C),
    /// Destination is a wall: no state change, distinct signal.
    Blocked,
    /// Destination is off the grid: silent no-op.
    OutOfBounds,
}

/// Search statistics reported alongside a found solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStats {
    /// Search iterations.
    pub steps: u64,
    /// Distinct states visited.
    pub visited: u64,
}

impl SolverStats {
    /// Creates solver statistics.
    pub fn new(steps: u64, visited: u64) -> Self {
        Self { steps, visited }
    }
}

/// One scheduled replay mutation and the delay before it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<S> {
    /// Wait after the previous frame (or after replay start for the first).
    pub delay: Duration,
    /// Mutation to apply.
    pub step: S,
}

impl<S> Frame<S> {
    /// Creates a frame.
    pub fn new(delay: Duration, step: S) -> Self {
        Self { delay, step }
    }
}

/// A found solution turned into an ordered, timed sequence of mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay<S> {
    frames: Vec<Frame<S>>,
    stats: Option<SolverStats>,
}

impl<S> Replay<S> {
    /// Creates a replay.
    pub fn new(frames: Vec<Frame<S>>, stats: Option<SolverStats>) -> Self {
        Self { frames, stats }
    }

    /// Frames in application order.
    pub fn frames(&self) -> &[Frame<S>] {
        &self.frames
    }

    /// Solver statistics, when the variant reports them.
    pub fn stats(&self) -> Option<SolverStats> {
        self.stats
    }

    /// Splits the replay into its frames and statistics.
    pub fn into_parts(self) -> (Vec<Frame<S>>, Option<SolverStats>) {
        (self.frames, self.stats)
    }
}

/// Live state of one game variant for one loaded level.
///
/// The session controller drives every transition through this trait; a
/// variant only answers "what would this input do", applies committed moves
/// and replay steps, and turns solver responses into a [`Replay`].
pub trait Playfield: Clone + fmt::Debug + Send + Sync + 'static {
    /// Static level data.
    type Level: Level;
    /// Where an accepted move lands.
    type Cursor: Copy + PartialEq + fmt::Debug + Send;
    /// One replay mutation.
    type Step: Clone + fmt::Debug + Send;
    /// Solve request body.
    type Request: fmt::Debug + Send + 'static;
    /// Solver response body.
    type Solution: fmt::Debug + Send + 'static;

    /// Initializes play state from a level.
    fn from_level(level: Self::Level) -> Self;

    /// The level this field was built from.
    fn level(&self) -> &Self::Level;

    /// Decides what `direction` would do. Must not mutate.
    fn plan(&self, direction: Direction) -> MovePlan<Self::Cursor>;

    /// Applies an accepted move; returns true when the goal/solved state is
    /// reached.
    fn commit(&mut self, to: Self::Cursor) -> bool;

    /// Clears overlay state and returns to the level's start.
    fn rewind(&mut self);

    /// Builds the solve request for the current state.
    fn solve_request(&self, algorithm: Algorithm) -> Self::Request;

    /// Converts a solver response into a replay; `None` when nothing was
    /// found.
    fn replay(solution: Self::Solution) -> Option<Replay<Self::Step>>;

    /// Applies one replay step, optionally asking for a side-effect signal.
    fn apply_step(&mut self, step: Self::Step) -> Option<Signal>;
}
