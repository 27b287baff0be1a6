//! Session controller - the state machine behind one mounted game.
//!
//! ```text
//! idle ──move──▶ playing ──goal──▶ finished
//!  │               │
//!  └────solve──────┴──▶ computing ──found──▶ animating ──exhausted──▶ idle
//!                          └──not found / failed──▶ idle
//! any ──load / retry──▶ idle
//! ```
//!
//! Every exit from `playing`, `computing` or `animating` cancels the timer,
//! the replay cursor and any in-flight solve request before state is reset.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::{
    AnimationPlayer, MovePlan, Notice, Playfield, SessionSnapshot, SessionStats, SessionStatus,
    Signal, SignalSink, SolverStats, TimerService,
};
use crate::games::{Direction, Level};
use crate::Algorithm;

/// Result of a directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not accepted in the current state (or no level loaded).
    Ignored,
    /// Destination off the grid.
    OutOfBounds,
    /// Destination is a wall.
    Blocked,
    /// Move applied.
    Moved,
    /// Move applied and the goal/solved state reached.
    Won,
}

/// Result of delivering a solver response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The response belongs to a request that was abandoned.
    Stale,
    /// The request failed; back to idle with a notice.
    Failed,
    /// The solver found nothing; back to idle with a notice.
    NoSolution,
    /// Replay started with this many frames (zero frames returns to idle
    /// immediately).
    Animating {
        /// Frames scheduled.
        frames: usize,
    },
}

/// A solve request handed to the caller for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveTicket<R> {
    /// Identifies the response that may complete this request.
    pub id: u64,
    /// Request body for the solver.
    pub request: R,
}

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    abort: Option<AbortHandle>,
}

/// Owns the state of one playthrough and all transitions between states.
///
/// The controller is the only writer of session state. After every change
/// it publishes a [`SessionSnapshot`] synchronously, so a reader subscribed
/// through [`SessionController::subscribe`] always sees the latest state
/// before the next input is processed.
pub struct SessionController<F: Playfield> {
    field: Option<Arc<F>>,
    status: SessionStatus,
    stats: SessionStats,
    solver_stats: Option<SolverStats>,
    algorithm: Algorithm,
    notice: Option<Notice>,
    timer: TimerService,
    player: AnimationPlayer<F::Step>,
    in_flight: Option<InFlight>,
    last_ticket: u64,
    signals: Arc<dyn SignalSink>,
    snapshot: watch::Sender<SessionSnapshot<F>>,
}

impl<F: Playfield> fmt::Debug for SessionController<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("level", &self.field.as_ref().map(|field| field.level().id()))
            .field("status", &self.status)
            .field("stats", &self.stats)
            .field("algorithm", &self.algorithm)
            .field("notice", &self.notice)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<F: Playfield> SessionController<F> {
    /// Creates a controller with no level loaded.
    pub fn new(signals: Arc<dyn SignalSink>) -> Self {
        let (snapshot, _) = watch::channel(SessionSnapshot::default());
        Self {
            field: None,
            status: SessionStatus::Idle,
            stats: SessionStats::default(),
            solver_stats: None,
            algorithm: Algorithm::default(),
            notice: None,
            timer: TimerService::new(),
            player: AnimationPlayer::new(),
            in_flight: None,
            last_ticket: 0,
            signals,
            snapshot,
        }
    }

    /// Subscribes to the published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot<F>> {
        self.snapshot.subscribe()
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Moves and elapsed time.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Loaded playfield.
    pub fn field(&self) -> Option<&F> {
        self.field.as_deref()
    }

    /// Statistics of the last found solution.
    pub fn solver_stats(&self) -> Option<SolverStats> {
        self.solver_stats
    }

    /// Algorithm for the next solve request.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Pending blocking notice.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// True while the timer is emitting.
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Replay frames applied since the current replay started.
    pub fn frames_applied(&self) -> usize {
        self.player.applied()
    }

    /// Builds a snapshot of the current state.
    pub fn snapshot(&self) -> SessionSnapshot<F> {
        SessionSnapshot {
            field: self.field.clone(),
            status: self.status,
            stats: self.stats,
            solver_stats: self.solver_stats,
            algorithm: self.algorithm,
            notice: self.notice.clone(),
        }
    }

    fn publish(&self) {
        self.snapshot.send_replace(self.snapshot());
    }

    /// Cancels timer, replay and any in-flight request.
    fn halt(&mut self) {
        self.timer.stop();
        self.player.cancel();
        if let Some(in_flight) = self.in_flight.take() {
            if let Some(abort) = in_flight.abort {
                abort.abort();
            }
            debug!(ticket = in_flight.ticket, "Abandoned solve request");
        }
    }

    /// Loads a level and resets the session to `idle`.
    #[instrument(skip(self, level), fields(level_id = level.id(), level = level.name()))]
    pub fn load(&mut self, level: F::Level) {
        self.halt();
        self.field = Some(Arc::new(F::from_level(level)));
        self.status = SessionStatus::Idle;
        self.stats = SessionStats::default();
        self.solver_stats = None;
        self.notice = None;
        info!("Level loaded");
        self.publish();
    }

    /// Reloads the current level. Returns false when nothing is loaded.
    pub fn retry(&mut self) -> bool {
        match self.field.as_ref().map(|field| field.level().clone()) {
            Some(level) => {
                self.load(level);
                true
            }
            None => false,
        }
    }

    /// Plans `direction` against the controller's own state and applies it.
    pub fn step(&mut self, direction: Direction, now: Instant) -> MoveOutcome {
        let Some(plan) = self.field.as_ref().map(|field| field.plan(direction)) else {
            return MoveOutcome::Ignored;
        };
        self.apply_move(plan, now)
    }

    /// Applies a move plan produced from the latest snapshot.
    #[instrument(skip(self, now), fields(status = %self.status))]
    pub fn apply_move(&mut self, plan: MovePlan<F::Cursor>, now: Instant) -> MoveOutcome {
        if !self.status.accepts_moves() || self.notice.is_some() {
            debug!("Move ignored");
            return MoveOutcome::Ignored;
        }
        let Some(field) = self.field.as_mut() else {
            return MoveOutcome::Ignored;
        };
        let to = match plan {
            MovePlan::OutOfBounds => return MoveOutcome::OutOfBounds,
            MovePlan::Blocked => {
                self.signals.emit(Signal::Blocked);
                return MoveOutcome::Blocked;
            }
            MovePlan::Accept(to) => to,
        };

        let reached = Arc::make_mut(field).commit(to);
        if self.status == SessionStatus::Idle {
            self.status = SessionStatus::Playing;
            if self.timer.start(now) {
                self.stats.record_start(now);
            }
            info!("Play started");
        }
        self.stats.record_move();
        self.signals.emit(Signal::Move);

        let outcome = if reached {
            if let Some(elapsed) = self.timer.elapsed_ms(now) {
                self.stats.record_elapsed(elapsed);
            }
            self.timer.stop();
            self.status = SessionStatus::Finished;
            self.signals.emit(Signal::Win);
            info!(
                moves = self.stats.moves(),
                elapsed_ms = self.stats.elapsed_ms(),
                "Level complete"
            );
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        };
        self.publish();
        outcome
    }

    /// Selects the solver algorithm. Refused while animating.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if self.status == SessionStatus::Animating {
            return false;
        }
        self.algorithm = algorithm;
        self.publish();
        true
    }

    /// Advances to the next algorithm. Refused while animating.
    pub fn cycle_algorithm(&mut self) -> bool {
        self.set_algorithm(self.algorithm.next())
    }

    /// Clears the blocking notice. Returns whether one was shown.
    pub fn dismiss_notice(&mut self) -> bool {
        let had = self.notice.take().is_some();
        if had {
            self.publish();
        }
        had
    }

    /// Enters `computing` and returns the request to dispatch.
    ///
    /// The timer stops and the playfield rewinds to the level start, so the
    /// replay always begins from the canonical start state. Move count and
    /// elapsed time are kept.
    #[instrument(skip(self), fields(status = %self.status, algorithm = %self.algorithm))]
    pub fn begin_solve(&mut self) -> Option<SolveTicket<F::Request>> {
        if !self.status.accepts_moves() {
            debug!("Solve refused");
            return None;
        }
        let field = self.field.as_mut()?;
        Arc::make_mut(field).rewind();
        let request = field.solve_request(self.algorithm);

        self.timer.stop();
        self.notice = None;
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.in_flight = Some(InFlight {
            ticket,
            abort: None,
        });
        self.status = SessionStatus::Computing;
        info!(ticket, "Solve requested");
        self.publish();
        Some(SolveTicket {
            id: ticket,
            request,
        })
    }

    /// Associates the task serving `ticket` so it can be aborted on reset.
    ///
    /// A handle for a ticket that is no longer wanted is aborted right away.
    pub fn attach_request(&mut self, ticket: u64, abort: AbortHandle) {
        match self.in_flight.as_mut() {
            Some(in_flight) if in_flight.ticket == ticket => in_flight.abort = Some(abort),
            _ => {
                debug!(ticket, "Aborting request for abandoned ticket");
                abort.abort();
            }
        }
    }

    /// Delivers the solver's answer for `ticket`.
    #[instrument(skip(self, result, now))]
    pub fn finish_solve<E: fmt::Display>(
        &mut self,
        ticket: u64,
        result: Result<F::Solution, E>,
        now: Instant,
    ) -> SolveOutcome {
        let current = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.ticket == ticket);
        if !current || self.status != SessionStatus::Computing {
            warn!("Discarding stale solver response");
            return SolveOutcome::Stale;
        }
        self.in_flight = None;

        let outcome = match result {
            Err(err) => {
                warn!(error = %err, "Solve request failed");
                self.status = SessionStatus::Idle;
                self.notice = Some(Notice::SolverUnavailable(err.to_string()));
                SolveOutcome::Failed
            }
            Ok(solution) => match F::replay(solution) {
                None => {
                    info!("Solver found no solution");
                    self.status = SessionStatus::Idle;
                    self.notice = Some(Notice::NoSolution);
                    SolveOutcome::NoSolution
                }
                Some(replay) => {
                    let (frames, stats) = replay.into_parts();
                    let count = frames.len();
                    self.solver_stats = stats;
                    self.player.start(frames, now);
                    self.status = if self.player.is_active() {
                        SessionStatus::Animating
                    } else {
                        SessionStatus::Idle
                    };
                    info!(frames = count, status = %self.status, "Replay scheduled");
                    SolveOutcome::Animating { frames: count }
                }
            },
        };
        self.publish();
        outcome
    }

    /// Earliest pending timer or replay deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.timer.deadline(), self.player.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Runs every timer and replay tick due at `now`. Returns whether state
    /// changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(elapsed) = self.timer.poll(now) {
            self.stats.record_elapsed(elapsed);
            changed = true;
        }
        while let Some(tick) = self.player.poll(now) {
            changed = true;
            if let Some(field) = self.field.as_mut() {
                if let Some(signal) = Arc::make_mut(field).apply_step(tick.step) {
                    self.signals.emit(signal);
                }
            }
            if tick.remaining == 0 {
                self.status = SessionStatus::Idle;
                info!(applied = self.player.applied(), "Replay finished");
            }
        }
        if changed {
            self.publish();
        }
        changed
    }
}

impl<F: Playfield> Drop for SessionController<F> {
    fn drop(&mut self) {
        self.halt();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{MazeField, MazeLevel, MazeSolution, Position, SignalLog};

    fn open_maze() -> MazeLevel {
        MazeLevel::new(
            1,
            "Open",
            vec![vec![0, 0, 0], vec![0, 1, 0]],
            Position::new(0, 0),
            Position::new(1, 2),
        )
    }

    fn controller() -> (SessionController<MazeField>, Arc<SignalLog>) {
        let log = Arc::new(SignalLog::default());
        let mut session = SessionController::new(log.clone());
        session.load(open_maze());
        (session, log)
    }

    #[test]
    fn blocked_move_signals_without_counting() {
        let (mut session, log) = controller();
        let now = Instant::now();
        assert_eq!(session.step(Direction::Right, now), MoveOutcome::Moved);
        assert_eq!(session.step(Direction::Down, now), MoveOutcome::Blocked);
        assert_eq!(*session.stats().moves(), 1);
        assert_eq!(log.take(), vec![Signal::Move, Signal::Blocked]);
    }

    #[test]
    fn retry_resets_to_idle() {
        let (mut session, _) = controller();
        let now = Instant::now();
        session.step(Direction::Down, now);
        assert_eq!(session.status(), SessionStatus::Playing);
        session.retry();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.timer_running());
        assert_eq!(*session.stats().moves(), 0);
    }

    #[test]
    fn rejected_first_input_keeps_session_idle() {
        let (mut session, _) = controller();
        assert_eq!(
            session.step(Direction::Up, Instant::now()),
            MoveOutcome::OutOfBounds
        );
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.timer_running());
    }

    #[test]
    fn algorithm_is_locked_while_animating() {
        let (mut session, _) = controller();
        let now = Instant::now();
        let ticket = session.begin_solve().unwrap();
        let solution = MazeSolution {
            found: true,
            path: vec![Position::new(0, 0)],
            ..MazeSolution::default()
        };
        session.finish_solve(ticket.id, Ok::<_, String>(solution), now);
        assert!(!session.cycle_algorithm());
        session.poll(now + Duration::from_millis(30));
        assert!(session.cycle_algorithm());
        assert_eq!(session.algorithm(), Algorithm::Dfs);
    }

    #[test]
    fn snapshot_is_published_synchronously() {
        let (mut session, _) = controller();
        let rx = session.subscribe();
        session.step(Direction::Right, Instant::now());
        let snap = rx.borrow();
        assert_eq!(snap.status, SessionStatus::Playing);
        assert_eq!(
            snap.field.as_ref().map(|f| f.player()),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn retry_without_level_is_noop() {
        let mut session: SessionController<MazeField> =
            SessionController::new(Arc::new(SignalLog::default()));
        assert!(!session.retry());
        assert!(session.begin_solve().is_none());
    }
}
