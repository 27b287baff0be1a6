//! Session engine: state machine, timer, replay and side-effect signals.

mod animation;
mod controller;
mod playfield;
mod signal;
mod snapshot;
mod status;
mod timer;

pub use animation::{AnimationPlayer, Tick};
pub use controller::{MoveOutcome, SessionController, SolveOutcome, SolveTicket};
pub use playfield::{Frame, MovePlan, Playfield, Replay, SolverStats};
pub use signal::{Signal, SignalLog, SignalSink, Silent};
pub use snapshot::SessionSnapshot;
pub use status::{Notice, SessionStats, SessionStatus};
pub use timer::{Ticker, TimerService};
