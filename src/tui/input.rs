//! Directional key routing against the live session snapshot.

use crossterm::event::{KeyCode, KeyEvent};
use grid_masters_core::{Direction, MovePlan, Playfield, SessionSnapshot};
use tokio::sync::watch;
use tracing::debug;

/// Where a key event goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRoute<C> {
    /// Directional key with the move it would make right now.
    Move(MovePlan<C>),
    /// Directional key swallowed without effect.
    Consumed,
    /// Any other key, for the screen's own bindings.
    PassThrough(KeyEvent),
}

/// Maps arrow keys to moves for one mounted game.
///
/// Created once per mount. Every event is planned against the snapshot the
/// session published last, never against state captured at creation.
#[derive(Debug, Clone)]
pub struct InputRouter<F> {
    snapshot: watch::Receiver<SessionSnapshot<F>>,
}

impl<F: Playfield> InputRouter<F> {
    /// Creates a router reading `snapshot`.
    pub fn new(snapshot: watch::Receiver<SessionSnapshot<F>>) -> Self {
        Self { snapshot }
    }

    /// Direction bound to `key`, if any.
    pub fn direction(key: &KeyEvent) -> Option<Direction> {
        match key.code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Routes one key event.
    ///
    /// Directional keys never pass through, whether or not they move.
    pub fn route(&self, key: KeyEvent) -> KeyRoute<F::Cursor> {
        let Some(direction) = Self::direction(&key) else {
            return KeyRoute::PassThrough(key);
        };
        let snapshot = self.snapshot.borrow();
        match &snapshot.field {
            Some(field) if snapshot.accepts_input() => {
                let plan = field.plan(direction);
                debug!(%direction, ?plan, "Directional key planned");
                KeyRoute::Move(plan)
            }
            _ => {
                debug!(%direction, status = %snapshot.status, "Directional key consumed");
                KeyRoute::Consumed
            }
        }
    }
}
