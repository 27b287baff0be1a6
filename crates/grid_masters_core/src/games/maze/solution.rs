//! Solve request and response exchanged with the remote maze solver.

use serde::{Deserialize, Serialize};

use super::Position;
use crate::Algorithm;

/// Body of `POST /api/maze/solve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeSolveRequest {
    /// Level the solver should load.
    pub level_id: u32,
    /// Search strategy.
    pub algorithm: Algorithm,
}

/// Solver response for a maze level.
///
/// `history` is the exploration order and exists for visualization only;
/// `path` is the answer, start to goal inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSolution {
    /// Whether the goal was reached.
    pub found: bool,
    /// Solution path, start to goal.
    #[serde(default)]
    pub path: Vec<Position>,
    /// Cells in the order the search visited them.
    #[serde(default)]
    pub history: Vec<Position>,
    /// Search iterations reported by the solver.
    #[serde(default)]
    pub steps: u64,
    /// Distinct cells the search touched.
    #[serde(default)]
    pub visited_count: u64,
}
