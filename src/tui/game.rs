//! A mounted game: session, input routing, solver dispatch and event loop.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_new::new;
use grid_masters_core::{
    Algorithm, Level, SessionController, SessionSnapshot, SignalSink, SolveOutcome, SolveTicket,
};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, instrument, warn};

use super::input::{InputRouter, KeyRoute};
use super::screen::ScreenTransition;
use super::ui::{self, BoardView};
use crate::client::{ClientError, GameBackend, RemoteField};

/// Solver answer tagged with the ticket it answers.
#[derive(Debug, new)]
pub struct SolveReply<S> {
    ticket: u64,
    result: Result<S, ClientError>,
}

/// One event the game loop reacts to.
#[derive(Debug)]
enum GameEvent<S> {
    Key(KeyEvent),
    Reply(SolveReply<S>),
    Due,
    InputClosed,
}

/// Everything that lives while a game is mounted.
///
/// Dropping the screen unmounts the game: the session's timer, replay and
/// in-flight solve request are cancelled with it.
pub struct GameScreen<F: RemoteField> {
    backend: Arc<dyn GameBackend>,
    session: SessionController<F>,
    router: InputRouter<F>,
    levels: Vec<F::Level>,
    current: usize,
    load_error: Option<String>,
    refetch: bool,
    replies_tx: mpsc::UnboundedSender<SolveReply<F::Solution>>,
    replies_rx: mpsc::UnboundedReceiver<SolveReply<F::Solution>>,
}

impl<F: RemoteField> std::fmt::Debug for GameScreen<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameScreen")
            .field("variant", &F::VARIANT)
            .field("session", &self.session)
            .field("levels", &self.levels.len())
            .field("current", &self.current)
            .field("load_error", &self.load_error)
            .finish_non_exhaustive()
    }
}

impl<F: RemoteField> GameScreen<F> {
    /// Mounts a game with no levels loaded yet.
    #[instrument(skip(backend, signals), fields(variant = %F::VARIANT))]
    pub fn mount(
        backend: Arc<dyn GameBackend>,
        signals: Arc<dyn SignalSink>,
        algorithm: Algorithm,
    ) -> Self {
        let mut session = SessionController::new(signals);
        session.set_algorithm(algorithm);
        let router = InputRouter::new(session.subscribe());
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        info!("Game mounted");
        Self {
            backend,
            session,
            router,
            levels: Vec::new(),
            current: 0,
            load_error: None,
            refetch: false,
            replies_tx,
            replies_rx,
        }
    }

    /// The session driving this game.
    pub fn session(&self) -> &SessionController<F> {
        &self.session
    }

    /// Latest published session state.
    pub fn snapshot(&self) -> SessionSnapshot<F> {
        self.session.snapshot()
    }

    /// Levels in repository order.
    pub fn levels(&self) -> &[F::Level] {
        &self.levels
    }

    /// Index of the loaded level.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Why the level list could not be fetched.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Fetches the level list and loads the first level.
    #[instrument(skip(self), fields(variant = %F::VARIANT))]
    pub async fn fetch_levels(&mut self) -> bool {
        match F::fetch_levels(self.backend.as_ref()).await {
            Ok(levels) => self.set_levels(levels),
            Err(e) => {
                error!(error = %e, "Failed to fetch levels");
                self.load_error = Some(e.message);
                false
            }
        }
    }

    /// Replaces the level list and loads the first level.
    pub fn set_levels(&mut self, levels: Vec<F::Level>) -> bool {
        if levels.is_empty() {
            warn!("Server returned no levels");
            self.load_error = Some("The server has no levels".to_string());
            return false;
        }
        self.levels = levels;
        self.load_error = None;
        self.load_index(0)
    }

    /// Loads the level at `index`. Out-of-range indices are ignored.
    pub fn load_index(&mut self, index: usize) -> bool {
        let Some(level) = self.levels.get(index).cloned() else {
            debug!(index, "No level at index");
            return false;
        };
        debug!(index, level_id = level.id(), "Loading level");
        self.current = index;
        self.session.load(level);
        true
    }

    /// Loads the following level, wrapping to the first after the last.
    pub fn next_level(&mut self) -> bool {
        if self.levels.is_empty() {
            return false;
        }
        self.load_index((self.current + 1) % self.levels.len())
    }

    /// Enters `computing` and dispatches the solve request.
    #[instrument(skip(self), fields(variant = %F::VARIANT))]
    pub fn solve(&mut self) -> bool {
        let Some(SolveTicket { id, request }) = self.session.begin_solve() else {
            return false;
        };
        let backend = Arc::clone(&self.backend);
        let replies = self.replies_tx.clone();
        let task = tokio::spawn(async move {
            let result = F::solve(backend.as_ref(), request).await;
            if replies.send(SolveReply::new(id, result)).is_err() {
                debug!(ticket = id, "Game unmounted before the solver answered");
            }
        });
        self.session.attach_request(id, task.abort_handle());
        true
    }

    /// Hands a solver answer to the session.
    pub fn on_reply(&mut self, reply: SolveReply<F::Solution>, now: Instant) -> SolveOutcome {
        self.session.finish_solve(reply.ticket, reply.result, now)
    }

    /// Runs timer and replay ticks due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.session.poll(now)
    }

    /// Waits for the next solver answer; used when no key loop is running.
    pub async fn next_reply(&mut self) -> Option<SolveReply<F::Solution>> {
        self.replies_rx.recv().await
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ScreenTransition {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return ScreenTransition::Quit;
        }
        match self.router.route(key) {
            KeyRoute::Move(plan) => {
                self.session.apply_move(plan, now);
                ScreenTransition::Stay
            }
            KeyRoute::Consumed => ScreenTransition::Stay,
            KeyRoute::PassThrough(key) => self.handle_command(key),
        }
    }

    #[instrument(skip(self, key), fields(code = ?key.code, status = %self.session.status()))]
    fn handle_command(&mut self, key: KeyEvent) -> ScreenTransition {
        if self.session.notice().is_some() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    self.session.dismiss_notice();
                    ScreenTransition::Stay
                }
                KeyCode::Char('q') => ScreenTransition::Quit,
                _ => ScreenTransition::Stay,
            };
        }
        if self.load_error.is_some() {
            return match key.code {
                KeyCode::Char('r') => {
                    self.refetch = true;
                    ScreenTransition::Stay
                }
                KeyCode::Esc | KeyCode::Backspace => ScreenTransition::GoHome,
                KeyCode::Char('q') => ScreenTransition::Quit,
                _ => ScreenTransition::Stay,
            };
        }
        match key.code {
            KeyCode::Char('q') => ScreenTransition::Quit,
            KeyCode::Esc | KeyCode::Backspace => ScreenTransition::GoHome,
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                self.solve();
                ScreenTransition::Stay
            }
            KeyCode::Char('a') | KeyCode::Tab => {
                if !self.session.cycle_algorithm() {
                    debug!("Algorithm locked during replay");
                }
                ScreenTransition::Stay
            }
            KeyCode::Char('r') => {
                self.session.retry();
                ScreenTransition::Stay
            }
            KeyCode::Char('n') => {
                self.next_level();
                ScreenTransition::Stay
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = usize::from(c as u8 - b'1');
                self.load_index(index);
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }

    async fn next_event(&mut self, keys: &mut mpsc::Receiver<KeyEvent>) -> GameEvent<F::Solution> {
        let deadline = self.session.next_deadline();
        tokio::select! {
            key = keys.recv() => match key {
                Some(key) => GameEvent::Key(key),
                None => GameEvent::InputClosed,
            },
            Some(reply) = self.replies_rx.recv() => GameEvent::Reply(reply),
            () = async {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending().await,
                }
            } => GameEvent::Due,
        }
    }
}

impl<F: RemoteField + BoardView> GameScreen<F> {
    /// Runs the game until the player leaves it.
    #[instrument(skip_all, fields(variant = %F::VARIANT))]
    pub async fn run<B>(
        &mut self,
        terminal: &mut Terminal<B>,
        keys: &mut mpsc::Receiver<KeyEvent>,
    ) -> anyhow::Result<ScreenTransition>
    where
        B: Backend,
        <B as Backend>::Error: Send + Sync + 'static,
    {
        if self.levels.is_empty() {
            terminal.draw(|frame| ui::render_game(frame, self))?;
            self.fetch_levels().await;
        }

        loop {
            terminal.draw(|frame| ui::render_game(frame, self))?;

            match self.next_event(keys).await {
                GameEvent::Key(key) => {
                    let transition = self.handle_key(key, Instant::now());
                    if transition != ScreenTransition::Stay {
                        info!(?transition, "Leaving game");
                        return Ok(transition);
                    }
                    if std::mem::take(&mut self.refetch) {
                        terminal.draw(|frame| ui::render_game(frame, self))?;
                        self.fetch_levels().await;
                    }
                }
                GameEvent::Reply(reply) => {
                    let outcome = self.on_reply(reply, Instant::now());
                    debug!(?outcome, "Solver reply handled");
                }
                GameEvent::Due => {
                    self.poll(Instant::now());
                }
                GameEvent::InputClosed => {
                    warn!("Keyboard input closed");
                    return Ok(ScreenTransition::Quit);
                }
            }
        }
    }
}
