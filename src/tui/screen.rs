//! Screen transitions for the app state machine.

use crate::cli::Variant;

/// The result of handling an input event on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Return to the home screen, unmounting any game.
    GoHome,
    /// Mount a game.
    Open(Variant),
    /// Exit the application.
    Quit,
}
