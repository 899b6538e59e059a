//! Input rendering for form trees

use super::super::theme::Theme;
use crate::state::{ChecklistRow, InputView};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw an input from its view model
pub fn draw_input(frame: &mut Frame, area: Rect, view: &InputView, theme: &Theme) {
    match view {
        InputView::Text {
            value,
            placeholder,
            focused,
            disabled,
            read_only,
        } => draw_text_input(
            frame,
            area,
            value,
            placeholder.as_deref(),
            *focused,
            *disabled,
            *read_only,
            theme,
        ),
        InputView::Checklist {
            rows,
            focused,
            disabled,
            read_only,
        } => draw_checklist(frame, area, rows, *focused, *disabled, *read_only, theme),
    }
}

fn input_block(theme: &Theme, focused: bool, read_only: bool) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused));
    if read_only {
        block.title(" read-only ")
    } else {
        block
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text_input(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: Option<&str>,
    focused: bool,
    disabled: bool,
    read_only: bool,
    theme: &Theme,
) {
    let editing = focused && !disabled && !read_only;
    let (display, style) = if value.is_empty() && !focused {
        (
            placeholder.unwrap_or(&theme.placeholder),
            Style::default().fg(theme.idle),
        )
    } else {
        (value, theme.text(focused, disabled))
    };

    let cursor = if editing { "▌" } else { "" };
    let content = Paragraph::new(Line::from(vec![
        Span::styled(display, style),
        Span::styled(cursor, Style::default().fg(theme.focus)),
    ]));

    frame.render_widget(content.block(input_block(theme, focused, read_only)), area);
}

fn draw_checklist(
    frame: &mut Frame,
    area: Rect,
    rows: &[ChecklistRow],
    focused: bool,
    disabled: bool,
    read_only: bool,
    theme: &Theme,
) {
    let mut lines: Vec<Line> = rows
        .iter()
        .map(|row| match row {
            ChecklistRow::Group(label) => Line::from(Span::styled(label.as_str(), theme.heading())),
            ChecklistRow::Option {
                label,
                checked,
                highlighted,
            } => {
                let marker = if focused && *highlighted { "> " } else { "  " };
                let glyph = if *checked {
                    &theme.checked
                } else {
                    &theme.unchecked
                };
                let style = theme.text(focused && *highlighted, disabled);
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.focus)),
                    Span::styled(format!("{glyph} {label}"), style),
                ])
            }
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no options)",
            Style::default().fg(theme.idle),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(input_block(theme, focused, read_only)),
        area,
    );
}
