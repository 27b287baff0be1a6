//! UI rendering using ratatui.

mod maze;
mod puzzle;

use grid_masters_core::{Algorithm, Level, Notice, Playfield, SessionSnapshot, SessionStatus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use super::game::GameScreen;
use super::home::HomeScreen;
use crate::client::RemoteField;

/// Variant-specific board drawing.
pub trait BoardView: Playfield {
    /// Control hint shown in the sidebar.
    const CONTROLS: &'static str;

    /// Draws the playfield into `area`.
    fn render_board(&self, frame: &mut Frame, area: Rect, status: SessionStatus);
}

/// Draws the home screen.
pub fn render_home(frame: &mut Frame, home: &mut HomeScreen) {
    let [title, body, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    let heading = Paragraph::new("Grid Masters")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(heading, title);

    let items: Vec<ListItem> = home
        .choices()
        .iter()
        .map(|variant| ListItem::new(format!("  {}", variant)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Choose a game"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, center_rect(body, 40, 6), home.list_state());

    let hint = Paragraph::new("↑↓: Select | Enter: Play | Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hint, help);
}

/// Draws a mounted game.
pub fn render_game<F: RemoteField + BoardView>(frame: &mut Frame, game: &GameScreen<F>) {
    let snapshot = game.snapshot();
    let [sidebar, board] =
        Layout::horizontal([Constraint::Length(34), Constraint::Min(0)]).areas(frame.area());

    render_sidebar(frame, sidebar, game, &snapshot);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", F::VARIANT));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    match (&snapshot.field, game.load_error()) {
        (_, Some(reason)) => render_message(
            frame,
            inner,
            "Could not load levels",
            &format!("{}\n\nR: Retry | Esc: Back", reason),
            Color::Red,
        ),
        (Some(field), None) => field.render_board(frame, inner, snapshot.status),
        (None, None) => {
            let loading = Paragraph::new("Loading levels...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(loading, center_rect(inner, 30, 1));
        }
    }

    if let Some(notice) = &snapshot.notice {
        render_notice(frame, inner, notice);
    } else if snapshot.status == SessionStatus::Finished {
        render_win(frame, inner, &snapshot);
    }
}

fn render_sidebar<F: RemoteField + BoardView>(
    frame: &mut Frame,
    area: Rect,
    game: &GameScreen<F>,
    snapshot: &SessionSnapshot<F>,
) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let level = match &snapshot.field {
        Some(field) => format!(
            "{}/{} {}",
            game.current() + 1,
            game.levels().len(),
            field.level().name()
        ),
        None => "Loading...".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(level, value)),
        Line::from(Span::styled("Manual control", label)),
        Line::default(),
        Line::from(vec![
            Span::styled("Time  ", label),
            Span::styled(snapshot.stats.elapsed_label(), value),
            Span::styled("   Moves  ", label),
            Span::styled(snapshot.stats.moves().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("State ", label),
            Span::styled(snapshot.status.to_string(), status_style(snapshot.status)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "AI Solver",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        algorithm_line(snapshot.algorithm, snapshot.status),
    ];

    if let Some(stats) = snapshot.solver_stats {
        lines.push(Line::from(Span::styled(
            format!("Analyzed: {} nodes  Path: {} len", stats.visited, stats.steps),
            label,
        )));
    }

    lines.extend([
        Line::default(),
        Line::from(Span::styled(F::CONTROLS, label)),
        Line::from(Span::styled("S: Solve  A: Algorithm", label)),
        Line::from(Span::styled("R: Retry  N: Next  1-9: Level", label)),
        Line::from(Span::styled("Esc: Home  Q: Quit", label)),
    ]);

    let sidebar = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(sidebar, area);
}

fn algorithm_line(selected: Algorithm, status: SessionStatus) -> Line<'static> {
    let locked = status == SessionStatus::Animating;
    let spans = Algorithm::iter().flat_map(|algorithm| {
        let style = if algorithm == selected {
            Style::default().fg(Color::Black).bg(Color::Magenta)
        } else if locked {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        [
            Span::styled(format!(" {} ", algorithm), style),
            Span::raw(" "),
        ]
    });
    Line::from(spans.collect::<Vec<_>>())
}

fn status_style(status: SessionStatus) -> Style {
    let color = match status {
        SessionStatus::Idle => Color::Gray,
        SessionStatus::Playing => Color::Yellow,
        SessionStatus::Finished => Color::Green,
        SessionStatus::Computing => Color::Cyan,
        SessionStatus::Animating => Color::Magenta,
    };
    Style::default().fg(color)
}

fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let color = match notice {
        Notice::NoSolution => Color::Yellow,
        Notice::SolverUnavailable(_) => Color::Red,
    };
    render_message(
        frame,
        area,
        "Notice",
        &format!("{}\n\nEnter: Dismiss", notice),
        color,
    );
}

fn render_win<F>(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot<F>) {
    render_message(
        frame,
        area,
        "Level complete!",
        &format!(
            "Time: {}\nMoves: {}\n\nR: Replay | N: Next Level",
            snapshot.stats.elapsed_label(),
            snapshot.stats.moves()
        ),
        Color::Green,
    );
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, body: &str, color: Color) {
    let popup = center_rect(area, 44, 8);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(body.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        );
    frame.render_widget(paragraph, popup);
}

/// Centers a `width` x `height` rectangle inside `area`.
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, centered, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(vertical);
    centered
}
