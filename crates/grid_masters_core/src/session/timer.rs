//! Cancellable scheduled ticks and the elapsed-time timer built on them.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, instrument};

/// Cadence of elapsed-time updates.
const CADENCE: Duration = Duration::from_millis(100);

/// A single cancellable deadline.
///
/// The owner polls it with the current time; once due it fires exactly once
/// and must be re-armed for the next tick. Cancelling simply forgets the
/// deadline, so nothing scheduled before the cancel can fire after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ticker {
    deadline: Option<Instant>,
}

impl Ticker {
    /// Arms the ticker for `at`, replacing any previous deadline.
    pub fn schedule(&mut self, at: Instant) {
        self.deadline = Some(at);
    }

    /// Disarms the ticker. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// The pending deadline, if armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True while a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires when `now` has reached the deadline, returning the deadline and
    /// disarming.
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                Some(at)
            }
            _ => None,
        }
    }
}

/// Elapsed-time source for a playthrough.
///
/// Elapsed time is always `now - start` at sampling time. Stopping forgets
/// the start, so a later start begins again from zero.
#[derive(Debug, Clone, Default)]
pub struct TimerService {
    started_at: Option<Instant>,
    ticker: Ticker,
}

impl TimerService {
    /// Creates a stopped timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the timer. Returns false (and changes nothing) when already
    /// running.
    #[instrument(skip(self, now))]
    pub fn start(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        debug!("Timer started");
        self.started_at = Some(now);
        self.ticker.schedule(now + CADENCE);
        true
    }

    /// Stops the timer. Idempotent; returns whether it was running.
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> bool {
        self.ticker.cancel();
        let was_running = self.started_at.take().is_some();
        if was_running {
            debug!("Timer stopped");
        }
        was_running
    }

    /// True between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// When the running timer started.
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Elapsed milliseconds at `now`, if running.
    pub fn elapsed_ms(&self, now: Instant) -> Option<u64> {
        self.started_at
            .map(|start| u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX))
    }

    /// Next emission deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Emits an elapsed sample when a tick is due and schedules the next one.
    ///
    /// Missed ticks are not replayed: the next deadline is one cadence after
    /// `now`.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        self.ticker.take_due(now)?;
        self.ticker.schedule(now + CADENCE);
        self.elapsed_ms(now)
    }
}
