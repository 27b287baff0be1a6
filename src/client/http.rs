//! reqwest implementation of the level repository and solver.

use std::time::Duration;

use async_trait::async_trait;
use grid_masters_core::{
    MazeLevel, MazeSolution, MazeSolveRequest, PuzzleLevel, PuzzleSolution, PuzzleSolveRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{ClientError, LevelRepository, SolverClient};
use crate::ClientConfig;

/// JSON-over-HTTP client for the level and solver endpoints.
#[derive(Debug, Clone)]
pub struct HttpGameClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameClient {
    /// Creates a client for `base_url`, optionally bounding every request.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref(), ?timeout))]
    pub fn new(base_url: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        info!("HTTP client ready");
        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.server_url(), config.request_timeout())
    }

    /// Server base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!("GET");
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, body))]
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(body = %serde_json::to_string(body)?, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%status, body = %body, "Server returned an error status");
            return Err(ClientError::new(format!("HTTP {}: {}", status, body)));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl LevelRepository for HttpGameClient {
    #[instrument(skip(self))]
    async fn maze_levels(&self) -> Result<Vec<MazeLevel>, ClientError> {
        let levels: Vec<MazeLevel> = self.get_json("/api/levels/maze").await?;
        info!(count = levels.len(), "Fetched maze levels");
        Ok(levels)
    }

    #[instrument(skip(self))]
    async fn puzzle_levels(&self) -> Result<Vec<PuzzleLevel>, ClientError> {
        let levels: Vec<PuzzleLevel> = self.get_json("/api/levels/puzzle").await?;
        info!(count = levels.len(), "Fetched puzzle levels");
        Ok(levels)
    }
}

#[async_trait]
impl SolverClient for HttpGameClient {
    #[instrument(skip(self), fields(level_id = request.level_id, algorithm = %request.algorithm))]
    async fn solve_maze(&self, request: MazeSolveRequest) -> Result<MazeSolution, ClientError> {
        let solution: MazeSolution = self.post_json("/api/maze/solve", &request).await?;
        info!(
            found = solution.found,
            path = solution.path.len(),
            history = solution.history.len(),
            "Maze solved"
        );
        Ok(solution)
    }

    #[instrument(skip(self), fields(algorithm = %request.algorithm))]
    async fn solve_puzzle(
        &self,
        request: PuzzleSolveRequest,
    ) -> Result<PuzzleSolution, ClientError> {
        let solution: PuzzleSolution = self.post_json("/api/puzzle/solve", &request).await?;
        info!(found = solution.found, path = solution.path.len(), "Puzzle solved");
        Ok(solution)
    }
}
