//! Home screen - choose a game.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use tracing::{debug, instrument};

use super::screen::ScreenTransition;
use crate::cli::Variant;

const CHOICES: [Variant; 2] = [Variant::Maze, Variant::Puzzle];

/// State for the home screen.
#[derive(Debug)]
pub struct HomeScreen {
    list_state: ListState,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    /// Creates the home screen with the first game selected.
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    /// Games offered, in display order.
    pub fn choices(&self) -> &'static [Variant] {
        &CHOICES
    }

    /// Highlighted game.
    pub fn selected(&self) -> Variant {
        self.list_state
            .selected()
            .and_then(|i| CHOICES.get(i).copied())
            .unwrap_or(Variant::Maze)
    }

    /// List state for rendering.
    pub fn list_state(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    fn select_offset(&mut self, forward: bool) {
        let count = CHOICES.len();
        let i = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (i + 1) % count
        } else {
            (i + count - 1) % count
        };
        self.list_state.select(Some(next));
    }

    /// Handles a key press.
    #[instrument(skip(self, key), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_offset(false);
                ScreenTransition::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_offset(true);
                ScreenTransition::Stay
            }
            KeyCode::Char('1') | KeyCode::Char('m') => ScreenTransition::Open(Variant::Maze),
            KeyCode::Char('2') | KeyCode::Char('p') => ScreenTransition::Open(Variant::Puzzle),
            KeyCode::Enter => {
                let variant = self.selected();
                debug!(%variant, "Game chosen");
                ScreenTransition::Open(variant)
            }
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
