//! Search algorithm selection forwarded to the remote solver.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Search strategy the remote solver should run.
///
/// Serialized exactly as the solver expects: `"BFS"`, `"DFS"`, `"A*"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    /// Breadth-first search.
    #[default]
    #[serde(rename = "BFS")]
    #[strum(to_string = "BFS")]
    Bfs,
    /// Depth-first search.
    #[serde(rename = "DFS")]
    #[strum(to_string = "DFS")]
    Dfs,
    /// A* with a Manhattan-distance heuristic.
    #[serde(rename = "A*")]
    #[strum(to_string = "A*", serialize = "astar")]
    AStar,
}

impl Algorithm {
    /// Returns the next algorithm in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Bfs => Self::Dfs,
            Self::Dfs => Self::AStar,
            Self::AStar => Self::Bfs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_solver_contract() {
        assert_eq!(serde_json::to_string(&Algorithm::Bfs).unwrap(), "\"BFS\"");
        assert_eq!(serde_json::to_string(&Algorithm::AStar).unwrap(), "\"A*\"");
        let parsed: Algorithm = serde_json::from_str("\"DFS\"").unwrap();
        assert_eq!(parsed, Algorithm::Dfs);
    }

    #[test]
    fn parses_display_names_and_aliases() {
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("astar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("bfs".parse::<Algorithm>().unwrap(), Algorithm::Bfs);
        assert_eq!(Algorithm::AStar.to_string(), "A*");
    }

    #[test]
    fn next_cycles_through_all() {
        let start = Algorithm::Bfs;
        assert_eq!(start.next().next().next(), start);
    }
}
