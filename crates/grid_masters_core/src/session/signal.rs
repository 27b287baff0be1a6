//! Fire-and-forget side-effect signals (sound cues).

use std::sync::Mutex;

use strum::Display;

/// Side effect requested by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Signal {
    /// A move was applied (manual or replayed).
    Move,
    /// A move ran into a wall.
    Blocked,
    /// The goal or solved state was reached by the player.
    Win,
}

/// Receiver for session signals.
///
/// Implementations must not block; the session emits from inside its
/// state transitions.
pub trait SignalSink: Send + Sync {
    /// Handles one signal.
    fn emit(&self, signal: Signal);
}

/// Sink that drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SignalSink for Silent {
    fn emit(&self, _signal: Signal) {}
}

/// Sink that records signals in order.
#[derive(Debug, Default)]
pub struct SignalLog {
    signals: Mutex<Vec<Signal>>,
}

impl SignalLog {
    /// Returns and clears the recorded signals.
    pub fn take(&self) -> Vec<Signal> {
        match self.signals.lock() {
            Ok(mut signals) => std::mem::take(&mut *signals),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl SignalSink for SignalLog {
    fn emit(&self, signal: Signal) {
        match self.signals.lock() {
            Ok(mut signals) => signals.push(signal),
            Err(poisoned) => poisoned.into_inner().push(signal),
        }
    }
}
