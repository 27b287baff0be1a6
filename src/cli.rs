//! Command-line interface for grid_masters.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use grid_masters_core::Algorithm;
use strum::Display;

use crate::config::SERVER_URL_ENV;

/// Grid Masters - maze runner and 8-puzzle with remote solver replay
#[derive(Parser, Debug)]
#[command(name = "grid_masters")]
#[command(about = "Play mazes and 8-puzzles in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults to grid_masters.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Level/solver server URL
    #[arg(long, global = true, env = SERVER_URL_ENV)]
    pub server_url: Option<String>,

    /// Initial solver algorithm (BFS, DFS or A*)
    #[arg(long, global = true)]
    pub algorithm: Option<Algorithm>,

    /// Disable sound cues
    #[arg(long, global = true)]
    pub mute: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI
    Play {
        /// Skip the home screen and open this game
        #[arg(value_enum)]
        variant: Option<Variant>,
    },

    /// Print the level list of one game
    Levels {
        /// Game whose levels to list
        #[arg(value_enum)]
        variant: Variant,
    },
}

/// Game variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Display)]
pub enum Variant {
    /// Grid maze walked from start to goal.
    #[strum(to_string = "Maze Runner")]
    Maze,
    /// 3x3 sliding tile puzzle.
    #[strum(to_string = "8-Puzzle")]
    Puzzle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_with_variant() {
        let cli = Cli::try_parse_from(["grid_masters", "play", "puzzle"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Play {
                variant: Some(Variant::Puzzle)
            }
        ));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "grid_masters",
            "levels",
            "maze",
            "--algorithm",
            "a*",
            "--mute",
        ])
        .unwrap();
        assert_eq!(cli.algorithm, Some(Algorithm::AStar));
        assert!(cli.mute);
    }
}
