//! Sound cues rendered as terminal bells.
//!
//! A single audio context exists per process. It is created on the first
//! cue, resumed whenever a cue finds it suspended, and never torn down.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

use grid_masters_core::{Signal, SignalSink};
use strum::Display;
use tracing::{debug, info, warn};

const BELL: &[u8] = b"\x07";

static CONTEXT: OnceLock<AudioContext> = OnceLock::new();

/// Playback state of the audio context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AudioState {
    /// Created but not producing output.
    Suspended,
    /// Producing output.
    Running,
}

/// Process-wide output for sound cues.
pub struct AudioContext {
    state: Mutex<AudioState>,
    output: Mutex<Box<dyn Write + Send>>,
    played: AtomicU64,
}

impl std::fmt::Debug for AudioContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioContext")
            .field("state", &self.state())
            .field("played", &self.played())
            .finish_non_exhaustive()
    }
}

impl AudioContext {
    fn new(output: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(AudioState::Suspended),
            output: Mutex::new(output),
            played: AtomicU64::new(0),
        }
    }

    /// Returns the process-wide context, creating it on first use.
    pub fn shared() -> &'static AudioContext {
        CONTEXT.get_or_init(|| {
            info!("Audio context created");
            Self::new(Box::new(io::stderr()))
        })
    }

    /// Current playback state.
    pub fn state(&self) -> AudioState {
        match self.state.lock() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Cues played so far.
    pub fn played(&self) -> u64 {
        self.played.load(Ordering::Relaxed)
    }

    /// Resumes output. Returns whether the context was suspended.
    pub fn resume(&self) -> bool {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        let was_suspended = *state == AudioState::Suspended;
        if was_suspended {
            debug!("Audio context resumed");
        }
        *state = AudioState::Running;
        was_suspended
    }

    /// Suspends output until the next cue.
    pub fn suspend(&self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        *state = AudioState::Suspended;
    }

    /// Plays the cue for `signal`.
    ///
    /// Output errors are logged and otherwise ignored.
    pub fn play(&self, signal: Signal) {
        self.resume();
        let mut output = match self.output.lock() {
            Ok(output) => output,
            Err(poisoned) => poisoned.into_inner(),
        };
        let written = (0..bells(signal))
            .try_for_each(|_| output.write_all(BELL))
            .and_then(|()| output.flush());
        match written {
            Ok(()) => {
                self.played.fetch_add(1, Ordering::Relaxed);
                debug!(%signal, "Cue played");
            }
            Err(e) => warn!(error = %e, %signal, "Failed to play cue"),
        }
    }
}

/// Bells per cue: one for a move, two against a wall, three for a win.
fn bells(signal: Signal) -> usize {
    match signal {
        Signal::Move => 1,
        Signal::Blocked => 2,
        Signal::Win => 3,
    }
}

/// Signal sink backed by the shared audio context.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    /// Creates a sink; a disabled sink never touches the audio context.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl SignalSink for TerminalBell {
    fn emit(&self, signal: Signal) {
        if self.enabled {
            AudioContext::shared().play(signal);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn cue_resumes_suspended_context() {
        let buffer = Shared::default();
        let context = AudioContext::new(Box::new(buffer.clone()));
        assert_eq!(context.state(), AudioState::Suspended);

        context.play(Signal::Win);
        assert_eq!(context.state(), AudioState::Running);
        assert_eq!(buffer.0.lock().unwrap().len(), 3);

        context.suspend();
        context.play(Signal::Blocked);
        assert_eq!(context.state(), AudioState::Running);
        assert_eq!(context.played(), 2);
        assert_eq!(buffer.0.lock().unwrap().as_slice(), b"\x07\x07\x07\x07\x07");
    }

    #[test]
    fn shared_context_is_created_once() {
        let first = AudioContext::shared() as *const AudioContext;
        let second = AudioContext::shared() as *const AudioContext;
        assert_eq!(first, second);
    }
}
