//! 8-puzzle board rendering.

use grid_masters_core::{Board, PuzzleField, SessionStatus};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{BoardView, center_rect};

const TOP: &str = "┌─────┬─────┬─────┐";
const MIDDLE: &str = "├─────┼─────┼─────┤";
const BOTTOM: &str = "└─────┴─────┴─────┘";

impl BoardView for PuzzleField {
    const CONTROLS: &'static str = "↑↓←→: Slide the gap";

    fn render_board(&self, frame: &mut Frame, area: Rect, status: SessionStatus) {
        let frame_style = Style::default().fg(match status {
            SessionStatus::Animating => Color::Magenta,
            SessionStatus::Finished => Color::Green,
            _ => Color::DarkGray,
        });
        let solved = Board::SOLVED;

        let mut lines = vec![Line::from(Span::styled(TOP, frame_style))];
        for (r, row) in self.board().rows().enumerate() {
            if r > 0 {
                lines.push(Line::from(Span::styled(MIDDLE, frame_style)));
            }
            let mut spans = vec![Span::styled("│", frame_style)];
            for (c, &tile) in row.iter().enumerate() {
                let span = if tile == 0 {
                    Span::raw("     ")
                } else {
                    let home = solved.tiles()[r * 3 + c] == tile;
                    let color = if home { Color::Green } else { Color::White };
                    Span::styled(
                        format!("  {}  ", tile),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                };
                spans.push(span);
                spans.push(Span::styled("│", frame_style));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(Span::styled(BOTTOM, frame_style)));

        let board = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(board, center_rect(area, 19, 7));
    }
}
