//! Demo application state and key handling

use crate::clipboard::ClipboardProvider;
use crate::config::TuiConfig;
use crate::error::FormError;
use crate::platform::PASTE_MODIFIER;
use crate::state::{
    ControlEvent, Field, Form, Group, Input, OptionItem, SelectCheckboxInput, SelectOption,
};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{json, Value};

/// Value the demo starts from
pub fn initial_profile() -> Value {
    json!({
        "id": 42,
        "name": "Ada Lovelace",
        "contact": {"email": "ada@example.com"},
        "address": {
            "street": "12 St James's Square",
            "city": "London",
            "phones": ["020 7946 0000"]
        },
        "tags": ["admin"]
    })
}

fn tag_options() -> Vec<OptionItem> {
    vec![
        OptionItem::group(
            "Role",
            vec![
                SelectOption::new("Admin", "admin").into(),
                SelectOption::new("Editor", "editor").into(),
            ],
        ),
        OptionItem::group(
            "Team",
            vec![
                SelectOption::new("Platform", "platform").into(),
                SelectOption::new("Web", "web").into(),
            ],
        ),
    ]
}

/// The profile editor: a root form with a nested `address` form, a tag
/// checklist and one unmanaged scratch input
pub fn profile_form(value: Value) -> Result<Form, FormError> {
    let form = Form::new()
        .with_value(value)
        .on_changed(|value| tracing::debug!(%value, "profile changed"))
        .child(
            Group::titled("Profile")
                .child(Field::new("Name").child(Input::named("name").placeholder("Full name")))
                .child(
                    Field::new("Email")
                        .help("Used for notifications")
                        .child(Input::named("contact.email")),
                )
                .child(Field::new("ID").child(Input::named("id").read_only(true))),
        )
        .child(
            Group::titled("Address").child(
                Form::named("address")
                    .child(Field::new("Street").child(Input::named("street")))
                    .child(Field::new("City").child(Input::named("city")))
                    .child(Field::new("Phone").child(Input::named("phones[0]"))),
            ),
        )
        .child(Field::new("Tags").child(SelectCheckboxInput::named("tags", tag_options())?))
        .child(
            Field::new("Scratch")
                .help("Not part of the value")
                .child(Input::new().placeholder("notes")),
        )
        .mounted();
    Ok(form)
}

/// Main application struct
pub struct App {
    /// The edited form
    pub form: Form,
    /// Colours and glyphs
    pub theme: Theme,
    /// Feedback for the last action
    pub status_message: Option<String>,
    clipboard: Box<dyn ClipboardProvider>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with the first input focused
    pub fn new(config: &TuiConfig, clipboard: Box<dyn ClipboardProvider>) -> Result<Self> {
        let mut form = profile_form(initial_profile())?;
        form.focus_next();
        Ok(Self {
            form,
            theme: config.theme(),
            status_message: None,
            clipboard,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('r') if ctrl => {
                self.form.reset_value();
                self.status_message = Some("Reset to last saved value".to_string());
            }
            KeyCode::Char('v') if key.modifiers.contains(PASTE_MODIFIER) => self.paste(),
            _ => {
                if self.form.handle_key(key).is_some() {
                    self.status_message = self
                        .form
                        .focused_path()
                        .map(|path| format!("Updated {path}"));
                }
            }
        }
        Ok(())
    }

    fn paste(&mut self) {
        match self.clipboard.text() {
            Ok(text) => {
                if self.form.apply(ControlEvent::Paste(text)).is_some() {
                    self.status_message = Some("Pasted".to_string());
                }
            }
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                self.status_message = Some("Clipboard unavailable".to_string());
            }
        }
    }
}
