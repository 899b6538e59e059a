//! UI module for rendering the demo

mod forms;
mod theme;

pub use forms::{draw_form, node_height};
pub use theme::Theme;

use crate::app::App;
use crate::platform::{PASTE_SHORTCUT, QUIT_SHORTCUT, RESET_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Value preview
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.idle));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    draw_form(frame, inner, &app.form, &app.theme);

    draw_value_preview(frame, chunks[1], app);
    draw_status_bar(frame, chunks[2], app);
}

fn draw_value_preview(frame: &mut Frame, area: Rect, app: &App) {
    let value = app.form.value().to_string();
    let preview = Paragraph::new(Line::from(vec![
        Span::styled(" value ", Style::default().fg(Color::Black).bg(app.theme.focus)),
        Span::raw(" "),
        Span::styled(value, Style::default().fg(Color::Gray)),
    ]));
    frame.render_widget(preview, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    let dirty = if app.form.is_dirty() {
        Span::styled(" ● modified ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ○ clean ", Style::default().fg(Color::Green))
    };
    spans.push(dirty);

    if let Some(path) = app.form.focused_path() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(path, Style::default().fg(Color::Blue)));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::White)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let hint = format!(
        " Tab:next {PASTE_SHORTCUT}:paste {RESET_SHORTCUT}:reset {QUIT_SHORTCUT}:quit "
    );
    let width = (hint.chars().count() as u16).min(area.width);
    let hint_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        width,
        ..area
    };
    let hint_widget =
        Paragraph::new(hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(hint_widget, hint_area);
}
