//! Maze grid rendering.

use grid_masters_core::{CellKind, CellState, MazeField, Playfield, Position, SessionStatus};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{BoardView, center_rect};

const CELL: &str = "  ";

impl BoardView for MazeField {
    const CONTROLS: &'static str = "↑↓←→: Move";

    fn render_board(&self, frame: &mut Frame, area: Rect, status: SessionStatus) {
        let level = self.level();
        // The player marker is hidden while the solver owns the grid.
        let show_player = !matches!(
            status,
            SessionStatus::Computing | SessionStatus::Animating
        );

        let lines: Vec<Line> = self
            .grid()
            .iter_rows()
            .enumerate()
            .map(|(row, cells)| {
                let spans: Vec<Span> = cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let pos = Position::new(row, col);
                        let color = if show_player && pos == self.player() {
                            Color::Yellow
                        } else if pos == *level.start() {
                            Color::Green
                        } else if pos == *level.goal() {
                            Color::Red
                        } else if cell.kind == CellKind::Wall {
                            Color::Black
                        } else {
                            match cell.state {
                                CellState::Path => Color::Magenta,
                                CellState::Visited => Color::Blue,
                                CellState::Untouched => Color::DarkGray,
                            }
                        };
                        Span::styled(CELL, Style::default().bg(color))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let width = u16::try_from(self.grid().cols() * CELL.len()).unwrap_or(u16::MAX);
        let height = u16::try_from(self.grid().rows()).unwrap_or(u16::MAX);
        let grid = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(grid, center_rect(area, width, height));
    }
}
