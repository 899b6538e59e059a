//! The contract every bound input implements

use crossterm::event::KeyEvent;
use serde_json::Value;
use std::fmt;

/// Kind of a node in a form tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A form container that owns a value object
    Form,
    /// A leaf input bound by name
    Input,
    /// Presentation only
    Layout,
}

/// A change coming from an input's native control
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The control's text was replaced
    Text(String),
    /// Text was pasted at the end of the control
    Paste(String),
    /// An option checkbox was toggled
    Check { value: Value, checked: bool },
}

/// A row of a checklist view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistRow {
    Group(String),
    Option {
        label: String,
        checked: bool,
        highlighted: bool,
    },
}

/// Render model of an input, drawn by the `ui` layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputView {
    Text {
        value: String,
        placeholder: Option<String>,
        focused: bool,
        disabled: bool,
        read_only: bool,
    },
    Checklist {
        rows: Vec<ChecklistRow>,
        focused: bool,
        disabled: bool,
        read_only: bool,
    },
}

impl InputView {
    /// Rows needed to draw this view, borders included
    pub fn height(&self) -> u16 {
        match self {
            InputView::Text { .. } => 3,
            InputView::Checklist { rows, .. } => u16::try_from(rows.len().max(1))
                .unwrap_or(u16::MAX)
                .saturating_add(2),
        }
    }
}

/// A leaf input that a form can bind to a path.
///
/// Reports are `Option<Value>`: `Some` carries the input's new value after
/// its own `on_changing` / `on_changed` callbacks ran, `None` means nothing
/// changed.
pub trait FormInput: fmt::Debug {
    /// Path relative to the enclosing form. Unnamed inputs are unmanaged.
    fn name(&self) -> Option<&str>;

    /// Whether the author supplied a value, which the form must not override
    fn has_explicit_value(&self) -> bool;

    /// Current local value
    fn value(&self) -> Value;

    /// Revert to the last externally provided value without notifying
    fn reset_value(&mut self);

    /// Whether local state differs from the last externally provided value
    fn is_dirty(&self) -> bool;

    /// Adopt the injected value (if any) and report the initial value
    fn mount(&mut self, injected: Option<Value>) -> Option<Value>;

    /// External value update. Becomes clean when the value differs.
    fn receive_value(&mut self, value: Value) -> Option<Value>;

    /// Apply a native control change
    fn apply(&mut self, event: ControlEvent) -> Option<Value>;

    /// Translate a key press into a control change
    fn handle_key(&mut self, key: KeyEvent) -> Option<Value>;

    fn is_focusable(&self) -> bool;

    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);

    fn view(&self) -> InputView;

    fn kind(&self) -> NodeKind {
        NodeKind::Input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_view_height() {
        let view = InputView::Text {
            value: String::new(),
            placeholder: None,
            focused: false,
            disabled: false,
            read_only: false,
        };
        assert_eq!(view.height(), 3);
    }

    #[test]
    fn test_checklist_view_height_counts_rows() {
        let view = InputView::Checklist {
            rows: vec![
                ChecklistRow::Group("Fruit".to_string()),
                ChecklistRow::Option {
                    label: "Apple".to_string(),
                    checked: false,
                    highlighted: true,
                },
            ],
            focused: true,
            disabled: false,
            read_only: false,
        };
        assert_eq!(view.height(), 4);
    }

    #[test]
    fn test_empty_checklist_keeps_one_row() {
        let view = InputView::Checklist {
            rows: Vec::new(),
            focused: false,
            disabled: false,
            read_only: false,
        };
        assert_eq!(view.height(), 3);
    }

    #[test]
    fn test_huge_checklist_height_saturates() {
        let view = InputView::Checklist {
            rows: vec![ChecklistRow::Group("g".to_string()); 70_000],
            focused: false,
            disabled: false,
            read_only: false,
        };
        assert_eq!(view.height(), u16::MAX);
    }
}
