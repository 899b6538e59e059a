//! Colours and glyphs used by the form renderers

use ratatui::style::{Color, Modifier, Style};

/// Presentation settings for a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Border and text of the focused input
    pub focus: Color,
    /// Everything that is not focused
    pub idle: Color,
    /// Group titles and option group headers
    pub heading: Color,
    /// Shown by empty unfocused text inputs without their own placeholder
    pub placeholder: String,
    pub checked: String,
    pub unchecked: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus: Color::Cyan,
            idle: Color::DarkGray,
            heading: Color::Yellow,
            placeholder: "(empty)".to_string(),
            checked: "[x]".to_string(),
            unchecked: "[ ]".to_string(),
        }
    }
}

impl Theme {
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.idle)
        }
    }

    pub fn text(&self, focused: bool, disabled: bool) -> Style {
        match (focused, disabled) {
            (_, true) => Style::default()
                .fg(self.idle)
                .add_modifier(Modifier::CROSSED_OUT),
            (true, false) => Style::default().fg(self.focus),
            (false, false) => Style::default(),
        }
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }
}
