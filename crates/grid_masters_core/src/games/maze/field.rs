//! Maze playfield: level, grid overlay and player position.

use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{CellState, Grid, MazeSolution, MazeSolveRequest, Position};
use crate::games::{Direction, Level};
use crate::session::{Frame, MovePlan, Playfield, Replay, Signal, SolverStats};
use crate::Algorithm;

/// Replays longer than this are compressed to the fast cadence.
const LONG_HISTORY: usize = 50;
const FAST_VISIT: Duration = Duration::from_millis(10);
const SLOW_VISIT: Duration = Duration::from_millis(30);
const PATH_TRACE: Duration = Duration::from_millis(30);

/// A maze level as served by the level repository.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MazeLevel {
    #[getter(skip)]
    id: u32,
    #[getter(skip)]
    name: String,
    /// Row-major layout, `1` for walls and `0` for floor.
    layout: Vec<Vec<u8>>,
    /// Player start cell.
    start: Position,
    /// Goal cell.
    goal: Position,
}

impl MazeLevel {
    /// Creates a maze level.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        layout: Vec<Vec<u8>>,
        start: Position,
        goal: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            layout,
            start,
            goal,
        }
    }
}

impl Level for MazeLevel {
    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One replay mutation for the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeStep {
    /// Mark a cell explored.
    Visit(Position),
    /// Mark a cell as part of the solution path.
    Trace(Position),
}

/// Live maze state for one loaded level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeField {
    level: MazeLevel,
    grid: Grid,
    player: Position,
}

impl MazeField {
    /// The cell grid with its overlay.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current player position.
    pub fn player(&self) -> Position {
        self.player
    }

    /// True when the player stands on the goal.
    pub fn at_goal(&self) -> bool {
        self.player == self.level.goal
    }
}

impl Playfield for MazeField {
    type Level = MazeLevel;
    type Cursor = Position;
    type Step = MazeStep;
    type Request = MazeSolveRequest;
    type Solution = MazeSolution;

    #[instrument(skip(level), fields(level_id = level.id))]
    fn from_level(level: MazeLevel) -> Self {
        let grid = Grid::from_layout(&level.layout);
        debug!(rows = grid.rows(), cols = grid.cols(), "Built maze grid");
        Self {
            player: level.start,
            grid,
            level,
        }
    }

    fn level(&self) -> &MazeLevel {
        &self.level
    }

    fn plan(&self, direction: Direction) -> MovePlan<Position> {
        let Some(to) = self.player.step(direction) else {
            return MovePlan::OutOfBounds;
        };
        match self.grid.get(to) {
            None => MovePlan::OutOfBounds,
            Some(cell) if cell.is_wall() => MovePlan::Blocked,
            Some(_) => MovePlan::Accept(to),
        }
    }

    fn commit(&mut self, to: Position) -> bool {
        self.player = to;
        self.at_goal()
    }

    fn rewind(&mut self) {
        self.grid.clear_overlay();
        self.player = self.level.start;
    }

    fn solve_request(&self, algorithm: Algorithm) -> MazeSolveRequest {
        MazeSolveRequest {
            level_id: self.level.id,
            algorithm,
        }
    }

    fn replay(solution: MazeSolution) -> Option<Replay<MazeStep>> {
        if !solution.found {
            return None;
        }
        let visit = if solution.history.len() > LONG_HISTORY {
            FAST_VISIT
        } else {
            SLOW_VISIT
        };
        let frames = solution
            .history
            .into_iter()
            .map(|pos| Frame::new(visit, MazeStep::Visit(pos)))
            .chain(
                solution
                    .path
                    .into_iter()
                    .map(|pos| Frame::new(PATH_TRACE, MazeStep::Trace(pos))),
            )
            .collect();
        Some(Replay::new(
            frames,
            Some(SolverStats::new(solution.steps, solution.visited_count)),
        ))
    }

    fn apply_step(&mut self, step: MazeStep) -> Option<Signal> {
        let (pos, state) = match step {
            MazeStep::Visit(pos) => (pos, CellState::Visited),
            MazeStep::Trace(pos) => (pos, CellState::Path),
        };
        if !self.grid.mark(pos, state) {
            debug!(?pos, "Replay step outside grid ignored");
        }
        None
    }
}
