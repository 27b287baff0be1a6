//! Session status, play statistics and user-facing notices.

use derive_getters::Getters;
use derive_more::Display;
use strum::Display as StrumDisplay;
use tokio::time::Instant;

/// The single active state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    /// Loaded, nothing happened yet (or a replay just ended).
    #[default]
    Idle,
    /// Manual play in progress; the timer runs.
    Playing,
    /// Goal reached by the player; only retry/next have an effect.
    Finished,
    /// Waiting for the remote solver.
    Computing,
    /// Replaying a solver result.
    Animating,
}

impl SessionStatus {
    /// True when manual moves may be applied.
    pub fn accepts_moves(self) -> bool {
        matches!(self, Self::Idle | Self::Playing)
    }
}

/// Move count and elapsed time for the current playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters)]
pub struct SessionStats {
    /// Accepted manual moves.
    moves: u32,
    /// Milliseconds since the timer started, sampled at the last tick.
    elapsed_ms: u64,
    /// When the timer last started.
    started_at: Option<Instant>,
}

impl SessionStats {
    pub(crate) fn record_move(&mut self) {
        self.moves += 1;
    }

    pub(crate) fn record_elapsed(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = elapsed_ms;
    }

    pub(crate) fn record_start(&mut self, at: Instant) {
        self.started_at = Some(at);
    }

    /// Elapsed time in seconds, one decimal, as shown to the player.
    pub fn elapsed_label(&self) -> String {
        format!("{:.1}s", self.elapsed_ms as f64 / 1000.0)
    }
}

/// Blocking message shown until the player dismisses it.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notice {
    /// The solver answered `found = false`.
    #[display("No path/solution found")]
    NoSolution,

    /// The solve request failed before an answer arrived.
    #[display("Solver unavailable: {}", _0)]
    SolverUnavailable(String),
}
