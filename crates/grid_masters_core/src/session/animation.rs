//! Solver replay as a sequence cursor driven by one cancellable ticker.

use std::collections::VecDeque;

use tokio::time::Instant;
use tracing::{debug, instrument};

use super::{Frame, Ticker};

/// A frame handed out by [`AnimationPlayer::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick<S> {
    /// Mutation to apply now.
    pub step: S,
    /// Frames still queued after this one.
    pub remaining: usize,
}

/// Replays a sequence of frames, one per tick.
///
/// Each frame's deadline is the previous frame's deadline plus its delay, so
/// late polling never drops or repeats a frame.
#[derive(Debug, Clone)]
pub struct AnimationPlayer<S> {
    frames: VecDeque<Frame<S>>,
    ticker: Ticker,
    applied: usize,
}

impl<S> Default for AnimationPlayer<S> {
    fn default() -> Self {
        Self {
            frames: VecDeque::new(),
            ticker: Ticker::default(),
            applied: 0,
        }
    }
}

impl<S> AnimationPlayer<S> {
    /// Creates an idle player.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts replaying `frames`, discarding anything still queued.
    #[instrument(skip_all, fields(frames = frames.len()))]
    pub fn start(&mut self, frames: Vec<Frame<S>>, now: Instant) {
        self.cancel();
        self.applied = 0;
        self.frames = frames.into();
        if let Some(first) = self.frames.front() {
            self.ticker.schedule(now + first.delay);
        }
        debug!("Replay started");
    }

    /// Discards every pending frame. Returns how many were dropped.
    pub fn cancel(&mut self) -> usize {
        self.ticker.cancel();
        let dropped = self.frames.len();
        self.frames.clear();
        if dropped > 0 {
            debug!(dropped, "Replay cancelled");
        }
        dropped
    }

    /// True while frames remain.
    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Frames applied since the last start.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Frames still queued.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Deadline of the next frame.
    pub fn deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Hands out the next frame if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Tick<S>> {
        let due = self.ticker.take_due(now)?;
        let frame = self.frames.pop_front()?;
        self.applied += 1;
        if let Some(next) = self.frames.front() {
            self.ticker.schedule(due + next.delay);
        }
        Some(Tick {
            step: frame.step,
            remaining: self.frames.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn frames(delays: &[u64]) -> Vec<Frame<usize>> {
        delays
            .iter()
            .enumerate()
            .map(|(i, ms)| Frame::new(Duration::from_millis(*ms), i))
            .collect()
    }

    #[test]
    fn frames_fire_in_order_at_their_cadence() {
        let t0 = Instant::now();
        let mut player = AnimationPlayer::new();
        player.start(frames(&[10, 10, 30]), t0);

        assert!(player.poll(t0 + Duration::from_millis(9)).is_none());
        assert_eq!(player.poll(t0 + Duration::from_millis(10)).unwrap().step, 0);
        assert_eq!(player.deadline(), Some(t0 + Duration::from_millis(20)));
        assert_eq!(player.poll(t0 + Duration::from_millis(20)).unwrap().step, 1);
        let last = player.poll(t0 + Duration::from_millis(50)).unwrap();
        assert_eq!((last.step, last.remaining), (2, 0));
        assert!(!player.is_active());
        assert_eq!(player.deadline(), None);
    }

    #[test]
    fn late_polling_neither_skips_nor_repeats() {
        let t0 = Instant::now();
        let mut player = AnimationPlayer::new();
        player.start(frames(&[10; 5]), t0);
        let late = t0 + Duration::from_secs(1);
        let mut seen = Vec::new();
        while let Some(tick) = player.poll(late) {
            seen.push(tick.step);
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(player.applied(), 5);
    }

    #[test]
    fn cancel_drops_pending_frames() {
        let t0 = Instant::now();
        let mut player = AnimationPlayer::new();
        player.start(frames(&[10, 10, 10]), t0);
        player.poll(t0 + Duration::from_millis(10));
        assert_eq!(player.cancel(), 2);
        assert!(player.poll(t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn empty_sequence_is_never_active() {
        let mut player: AnimationPlayer<usize> = AnimationPlayer::new();
        player.start(Vec::new(), Instant::now());
        assert!(!player.is_active());
        assert_eq!(player.deadline(), None);
    }
}
