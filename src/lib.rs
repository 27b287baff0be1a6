//! Grid Masters - terminal maze runner and 8-puzzle client.
//!
//! The session engine lives in [`grid_masters_core`]; this crate connects it
//! to the outside world:
//!
//! - **Client**: [`HttpGameClient`] fetches levels and asks the remote
//!   solver for paths through the [`LevelRepository`] and [`SolverClient`]
//!   seams.
//! - **TUI**: ratatui screens, the [`InputRouter`] that plans arrow keys
//!   against the live session snapshot, and the event loop that drives the
//!   session's timer and replay deadlines.
//! - **Audio**: [`TerminalBell`] renders move, wall and win cues through a
//!   process-wide [`AudioContext`].
//! - **Config**: [`ClientConfig`] from TOML, environment and CLI flags.
//!
//! # Example
//!
//! ```no_run
//! use grid_masters::{ClientConfig, HttpGameClient, LevelRepository};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default().with_server_url("http://127.0.0.1:5000");
//! let client = HttpGameClient::from_config(&config)?;
//! for level in client.maze_levels().await? {
//!     println!("{:?}", level);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audio;
mod cli;
mod client;
mod config;
mod tui;

pub use audio::{AudioContext, AudioState, TerminalBell};
pub use cli::{Cli, Command, Variant};
pub use client::{
    ClientError, GameBackend, HttpGameClient, LevelRepository, RemoteField, SolverClient,
};
pub use config::{ClientConfig, ConfigError, DEFAULT_CONFIG_FILE, SERVER_URL_ENV};
pub use tui::{
    App, BoardView, GameScreen, HomeScreen, InputRouter, KeyRoute, ScreenTransition, SolveReply,
    run_tui,
};
