//! Single-value text input

use super::input::{ControlEvent, FormInput, InputView};
use super::notify::ChangeNotifier;
use crate::state::value::{display_text, values_equal};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use uuid::Uuid;

/// A single-line text input bound to one scalar value
#[derive(Debug)]
pub struct Input {
    id: Uuid,
    name: Option<String>,
    /// Value supplied by the author, wins over the form's value
    explicit: Option<Value>,
    /// Last externally provided value
    prop: Value,
    /// Local editable value
    state: Value,
    placeholder: Option<String>,
    disabled: bool,
    read_only: bool,
    focused: bool,
    notifier: ChangeNotifier,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    /// Create an unnamed input
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            explicit: None,
            prop: Value::Null,
            state: Value::Null,
            placeholder: None,
            disabled: false,
            read_only: false,
            focused: false,
            notifier: ChangeNotifier::default(),
        }
    }

    /// Create an input bound to `name`
    pub fn named(name: &str) -> Self {
        Self::new().with_name(name)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Explicit value; the enclosing form will not inject into this input
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.prop = value.clone();
        self.state = value.clone();
        self.explicit = Some(value);
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn on_changing(mut self, callback: impl FnMut(&Value) + 'static) -> Self {
        self.notifier.set_on_changing(Box::new(callback));
        self
    }

    pub fn on_changed(mut self, callback: impl FnMut(&Value) + 'static) -> Self {
        self.notifier.set_on_changed(Box::new(callback));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Text currently shown in the control
    pub fn text(&self) -> String {
        display_text(&self.state)
    }

    fn report(&mut self) -> Option<Value> {
        if self.notifier.notify(&self.state) {
            tracing::debug!(input = %self.id, name = ?self.name, "input changed");
            Some(self.state.clone())
        } else {
            None
        }
    }
}

impl FormInput for Input {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn has_explicit_value(&self) -> bool {
        self.explicit.is_some()
    }

    fn value(&self) -> Value {
        self.state.clone()
    }

    fn reset_value(&mut self) {
        self.state = self.prop.clone();
        self.notifier.sync(&self.state);
    }

    fn is_dirty(&self) -> bool {
        !values_equal(&self.state, &self.prop)
    }

    fn mount(&mut self, injected: Option<Value>) -> Option<Value> {
        self.prop = match (&self.explicit, injected) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(injected)) => injected,
            (None, None) => self.prop.clone(),
        };
        self.state = self.prop.clone();
        self.report()
    }

    fn receive_value(&mut self, value: Value) -> Option<Value> {
        if values_equal(&value, &self.prop) {
            return None;
        }
        self.prop = value.clone();
        self.state = value;
        self.report()
    }

    fn apply(&mut self, event: ControlEvent) -> Option<Value> {
        if self.disabled || self.read_only {
            return None;
        }
        let next = match event {
            ControlEvent::Text(text) => text,
            ControlEvent::Paste(pasted) => self.text() + &pasted,
            ControlEvent::Check { .. } => return None,
        };
        self.state = Value::String(next);
        self.report()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Value> {
        if self.disabled || self.read_only {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.apply(ControlEvent::Text(String::new())),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                let mut text = self.text();
                text.push(c);
                self.apply(ControlEvent::Text(text))
            }
            KeyCode::Backspace => {
                let mut text = self.text();
                text.pop()?;
                self.apply(ControlEvent::Text(text))
            }
            _ => None,
        }
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn view(&self) -> InputView {
        InputView::Text {
            value: self.text(),
            placeholder: self.placeholder.clone(),
            focused: self.focused,
            disabled: self.disabled,
            read_only: self.read_only,
        }
    }
}
