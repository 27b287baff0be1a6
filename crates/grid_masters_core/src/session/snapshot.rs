//! The always-current session view shared with input handling and rendering.

use std::sync::Arc;

use super::{Notice, Playfield, SessionStats, SessionStatus, SolverStats};
use crate::Algorithm;

/// Everything a reader needs to decide on input or draw a frame.
///
/// Published by the session controller after every state change. The
/// playfield is shared, not copied: the controller clones it on its next
/// write only while a reader still holds this snapshot.
#[derive(Debug, Clone)]
pub struct SessionSnapshot<F> {
    /// Loaded playfield, `None` before the first level arrives.
    pub field: Option<Arc<F>>,
    /// Current status.
    pub status: SessionStatus,
    /// Moves and elapsed time.
    pub stats: SessionStats,
    /// Statistics of the last found solution.
    pub solver_stats: Option<SolverStats>,
    /// Algorithm the next solve request will use.
    pub algorithm: Algorithm,
    /// Blocking notice awaiting dismissal.
    pub notice: Option<Notice>,
}

impl<F> Default for SessionSnapshot<F> {
    fn default() -> Self {
        Self {
            field: None,
            status: SessionStatus::default(),
            stats: SessionStats::default(),
            solver_stats: None,
            algorithm: Algorithm::default(),
            notice: None,
        }
    }
}

impl<F: Playfield> SessionSnapshot<F> {
    /// True when a directional input could have any effect right now.
    pub fn accepts_input(&self) -> bool {
        self.field.is_some() && self.notice.is_none() && self.status.accepts_moves()
    }
}
