//! Remote level repository and solver.
//!
//! The server exposes four endpoints:
//!
//! | Method | Path                 | Body                  | Response            |
//! |--------|----------------------|-----------------------|---------------------|
//! | GET    | `/api/levels/maze`   |                       | `[MazeLevel]`       |
//! | GET    | `/api/levels/puzzle` |                       | `[PuzzleLevel]`     |
//! | POST   | `/api/maze/solve`    | `{levelId, algorithm}`| `MazeSolution`      |
//! | POST   | `/api/puzzle/solve`  | `{state, algorithm}`  | `PuzzleSolution`    |

mod error;
mod http;

pub use error::ClientError;
pub use http::HttpGameClient;

use async_trait::async_trait;
use grid_masters_core::{
    MazeField, MazeLevel, MazeSolution, MazeSolveRequest, Playfield, PuzzleField, PuzzleLevel,
    PuzzleSolution, PuzzleSolveRequest,
};

use crate::cli::Variant;

/// Source of level definitions.
#[async_trait]
pub trait LevelRepository: Send + Sync {
    /// Maze levels in display order.
    async fn maze_levels(&self) -> Result<Vec<MazeLevel>, ClientError>;

    /// 8-puzzle levels in display order.
    async fn puzzle_levels(&self) -> Result<Vec<PuzzleLevel>, ClientError>;
}

/// Remote search over maze and puzzle states.
#[async_trait]
pub trait SolverClient: Send + Sync {
    /// Solves a maze level.
    async fn solve_maze(&self, request: MazeSolveRequest) -> Result<MazeSolution, ClientError>;

    /// Solves an 8-puzzle board.
    async fn solve_puzzle(
        &self,
        request: PuzzleSolveRequest,
    ) -> Result<PuzzleSolution, ClientError>;
}

/// Everything a game screen needs from the server.
pub trait GameBackend: LevelRepository + SolverClient + 'static {}

impl<T: LevelRepository + SolverClient + 'static> GameBackend for T {}

/// Binds a playfield to the endpoints that serve it.
#[async_trait]
pub trait RemoteField: Playfield {
    /// Which variant this field plays.
    const VARIANT: Variant;

    /// Fetches this variant's levels.
    async fn fetch_levels(backend: &dyn GameBackend) -> Result<Vec<Self::Level>, ClientError>;

    /// Sends a solve request.
    async fn solve(
        backend: &dyn GameBackend,
        request: Self::Request,
    ) -> Result<Self::Solution, ClientError>;
}

#[async_trait]
impl RemoteField for MazeField {
    const VARIANT: Variant = Variant::Maze;

    async fn fetch_levels(backend: &dyn GameBackend) -> Result<Vec<MazeLevel>, ClientError> {
        backend.maze_levels().await
    }

    async fn solve(
        backend: &dyn GameBackend,
        request: MazeSolveRequest,
    ) -> Result<MazeSolution, ClientError> {
        backend.solve_maze(request).await
    }
}

#[async_trait]
impl RemoteField for PuzzleField {
    const VARIANT: Variant = Variant::Puzzle;

    async fn fetch_levels(backend: &dyn GameBackend) -> Result<Vec<PuzzleLevel>, ClientError> {
        backend.puzzle_levels().await
    }

    async fn solve(
        backend: &dyn GameBackend,
        request: PuzzleSolveRequest,
    ) -> Result<PuzzleSolution, ClientError> {
        backend.solve_puzzle(request).await
    }
}
