//! Terminal UI for Grid Masters.

mod app;
mod game;
mod home;
mod input;
mod screen;
mod ui;

pub use app::App;
pub use game::{GameScreen, SolveReply};
pub use home::HomeScreen;
pub use input::{InputRouter, KeyRoute};
pub use screen::ScreenTransition;
pub use ui::BoardView;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::audio::TerminalBell;
use crate::cli::Variant;
use crate::client::HttpGameClient;
use crate::config::ClientConfig;

/// Run the TUI client
#[instrument(skip(config), fields(server_url = %config.server_url()))]
pub async fn run_tui(config: &ClientConfig, start: Option<Variant>) -> Result<()> {
    info!("Starting Grid Masters TUI");

    let backend = Arc::new(HttpGameClient::from_config(config)?);
    let signals = Arc::new(TerminalBell::new(*config.sound()));
    let mut app = App::new(backend, signals, *config.algorithm());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (key_tx, mut key_rx) = mpsc::channel(64);
    let reader = spawn_key_reader(key_tx);

    let res = app.run(&mut terminal, &mut key_rx, start).await;

    drop(key_rx);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    if let Err(e) = reader.await {
        warn!(error = %e, "Key reader task failed");
    }

    if let Err(err) = &res {
        error!(error = ?err, "App loop error");
    }
    res
}

/// Forwards key presses from the terminal until the receiver is dropped.
fn spawn_key_reader(key_tx: mpsc::Sender<KeyEvent>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !key_tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!(error = %e, "Terminal poll failed");
                    break;
                }
            }
            match event::read() {
                // Skip key release events (crossterm fires both press and release).
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    if key_tx.blocking_send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Terminal read failed");
                    break;
                }
            }
        }
        debug!("Key reader stopped");
    })
}
