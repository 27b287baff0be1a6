//! App controller - the state machine switching between home and games.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use grid_masters_core::{Algorithm, MazeField, PuzzleField, SignalSink};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::game::GameScreen;
use super::home::HomeScreen;
use super::screen::ScreenTransition;
use super::ui;
use crate::cli::Variant;
use crate::client::GameBackend;

/// Active screen in the app state machine.
#[derive(Debug)]
enum ActiveScreen {
    Home(HomeScreen),
    Maze(Box<GameScreen<MazeField>>),
    Puzzle(Box<GameScreen<PuzzleField>>),
}

/// Controller that drives the screen state machine.
pub struct App {
    backend: Arc<dyn GameBackend>,
    signals: Arc<dyn SignalSink>,
    algorithm: Algorithm,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates the controller.
    pub fn new(
        backend: Arc<dyn GameBackend>,
        signals: Arc<dyn SignalSink>,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            backend,
            signals,
            algorithm,
        }
    }

    fn mount(&self, variant: Variant) -> ActiveScreen {
        let backend = Arc::clone(&self.backend);
        let signals = Arc::clone(&self.signals);
        match variant {
            Variant::Maze => {
                ActiveScreen::Maze(Box::new(GameScreen::mount(backend, signals, self.algorithm)))
            }
            Variant::Puzzle => ActiveScreen::Puzzle(Box::new(GameScreen::mount(
                backend,
                signals,
                self.algorithm,
            ))),
        }
    }

    /// Runs until the user quits, starting on the home screen or in `start`.
    #[instrument(skip(self, terminal, keys))]
    pub async fn run<B>(
        &mut self,
        terminal: &mut Terminal<B>,
        keys: &mut mpsc::Receiver<KeyEvent>,
        start: Option<Variant>,
    ) -> anyhow::Result<()>
    where
        B: Backend,
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting app event loop");
        let mut screen = match start {
            Some(variant) => self.mount(variant),
            None => ActiveScreen::Home(HomeScreen::new()),
        };

        loop {
            let transition = match &mut screen {
                ActiveScreen::Home(home) => {
                    terminal.draw(|frame| ui::render_home(frame, home))?;
                    match keys.recv().await {
                        Some(key) => home.handle_key(key),
                        None => ScreenTransition::Quit,
                    }
                }
                ActiveScreen::Maze(game) => game.run(terminal, keys).await?,
                ActiveScreen::Puzzle(game) => game.run(terminal, keys).await?,
            };

            debug!(?transition, "Applying screen transition");
            match transition {
                ScreenTransition::Stay => {}
                ScreenTransition::GoHome => {
                    info!("Navigating to Home");
                    screen = ActiveScreen::Home(HomeScreen::new());
                }
                ScreenTransition::Open(variant) => {
                    info!(%variant, "Opening game");
                    screen = self.mount(variant);
                }
                ScreenTransition::Quit => {
                    info!("App quitting");
                    return Ok(());
                }
            }
        }
    }
}
