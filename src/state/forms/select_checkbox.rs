//! Multi-value checkbox list input

use super::input::{ChecklistRow, ControlEvent, FormInput, InputView};
use super::notify::ChangeNotifier;
use crate::error::FormError;
use crate::state::value::{contains, union, values_equal, without, DataType};
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::Value;
use uuid::Uuid;

/// A selectable option
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
    pub id: Option<String>,
}

impl SelectOption {
    pub fn new(label: &str, value: impl Into<Value>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

/// An entry of an option list: a single option or a labelled group of them
#[derive(Debug, Clone, PartialEq)]
pub enum OptionItem {
    Option(SelectOption),
    Group {
        label: String,
        options: Vec<OptionItem>,
    },
}

impl OptionItem {
    pub fn group(label: &str, options: Vec<OptionItem>) -> Self {
        OptionItem::Group {
            label: label.to_string(),
            options,
        }
    }
}

impl From<SelectOption> for OptionItem {
    fn from(option: SelectOption) -> Self {
        OptionItem::Option(option)
    }
}

/// Check that every option value shares one primitive type.
///
/// `data_type` carries the type recorded by earlier validations and is
/// only updated when the whole list passes.
fn validate_options(
    options: &[OptionItem],
    data_type: &mut Option<DataType>,
) -> Result<(), FormError> {
    let mut recorded = *data_type;
    check_items(options, &mut recorded)?;
    *data_type = recorded;
    Ok(())
}

fn check_items(options: &[OptionItem], recorded: &mut Option<DataType>) -> Result<(), FormError> {
    for item in options {
        match item {
            OptionItem::Group { options, .. } => check_items(options, recorded)?,
            OptionItem::Option(option) => {
                let found = DataType::of(&option.value);
                match *recorded {
                    None => *recorded = Some(found),
                    Some(expected) if expected != found => {
                        return Err(FormError::MixedOptionTypes {
                            expected,
                            label: option.label.clone(),
                            found,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }
    Ok(())
}

fn flatten<'a>(options: &'a [OptionItem], out: &mut Vec<&'a SelectOption>) {
    for item in options {
        match item {
            OptionItem::Option(option) => out.push(option),
            OptionItem::Group { options, .. } => flatten(options, out),
        }
    }
}

fn as_array(value: Value) -> Value {
    match value {
        Value::Array(_) => value,
        Value::Null => Value::Array(Vec::new()),
        other => Value::Array(vec![other]),
    }
}

/// A list of checkboxes bound to an array of option values
#[derive(Debug)]
pub struct SelectCheckboxInput {
    id: Uuid,
    name: Option<String>,
    options: Vec<OptionItem>,
    data_type: Option<DataType>,
    explicit: Option<Value>,
    prop: Value,
    state: Value,
    /// Index of the highlighted option among all options, groups flattened
    cursor: usize,
    disabled: bool,
    read_only: bool,
    focused: bool,
    notifier: ChangeNotifier,
}

impl SelectCheckboxInput {
    /// Create an unnamed checkbox list.
    ///
    /// Fails when option values do not all share one data type.
    pub fn new(options: Vec<OptionItem>) -> Result<Self, FormError> {
        let mut data_type = None;
        validate_options(&options, &mut data_type)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: None,
            options,
            data_type,
            explicit: None,
            prop: Value::Array(Vec::new()),
            state: Value::Array(Vec::new()),
            cursor: 0,
            disabled: false,
            read_only: false,
            focused: false,
            notifier: ChangeNotifier::default(),
        })
    }

    /// Create a checkbox list bound to `name`
    pub fn named(name: &str, options: Vec<OptionItem>) -> Result<Self, FormError> {
        Ok(Self::new(options)?.with_name(name))
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Explicit value; the enclosing form will not inject into this input
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        let value = as_array(value.into());
        self.prop = value.clone();
        self.state = value.clone();
        self.explicit = Some(value);
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

    pub fn options(&self) -> &[OptionItem] {
        &self.options
    }

    /// Replace the option list.
    ///
    /// The new list must use the data type recorded at construction; on
    /// error the previous options stay in place.
    pub fn set_options(&mut self, options: Vec<OptionItem>) -> Result<(), FormError> {
        if options == self.options {
            return Ok(());
        }
        validate_options(&options, &mut self.data_type)?;
        self.options = options;
        let count = self.flat_options().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
        Ok(())
    }

    /// Data type shared by every option value
    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    fn flat_options(&self) -> Vec<&SelectOption> {
        let mut out = Vec::new();
        flatten(&self.options, &mut out);
        out
    }

    fn selected(&self) -> &[Value] {
        self.state.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the option with `value` is checked
    pub fn is_checked(&self, value: &Value) -> bool {
        contains(self.selected(), value)
    }

    fn report(&mut self) -> Option<Value> {
        if self.notifier.notify(&self.state) {
            tracing::debug!(input = %self.id, name = ?self.name, "selection changed");
            Some(self.state.clone())
        } else {
            None
        }
    }

    fn toggle_highlighted(&mut self) -> Option<Value> {
        let value = self.flat_options().get(self.cursor)?.value.clone();
        let checked = !self.is_checked(&value);
        self.apply(ControlEvent::Check { value, checked })
    }

    fn rows(&self) -> Vec<ChecklistRow> {
        let mut rows = Vec::new();
        let mut index = 0;
        self.push_rows(&self.options, &mut index, &mut rows);
        rows
    }

    fn push_rows(&self, items: &[OptionItem], index: &mut usize, rows: &mut Vec<ChecklistRow>) {
        for item in items {
            match item {
                OptionItem::Group { label, options } => {
                    rows.push(ChecklistRow::Group(label.clone()));
                    self.push_rows(options, index, rows);
                }
                OptionItem::Option(option) => {
                    rows.push(ChecklistRow::Option {
                        label: option.label.clone(),
                        checked: self.is_checked(&option.value),
                        highlighted: *index == self.cursor,
                    });
                    *index += 1;
                }
            }
        }
    }
}

impl FormInput for SelectCheckboxInput {
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
            (None, Some(injected)) => as_array(injected),
            (None, None) => self.prop.clone(),
        };
        self.state = self.prop.clone();
        self.report()
    }

    fn receive_value(&mut self, value: Value) -> Option<Value> {
        let value = as_array(value);
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
        let ControlEvent::Check { value, checked } = event else {
            return None;
        };
        let next = if checked {
            union(self.selected(), std::slice::from_ref(&value))
        } else {
            without(self.selected(), &value)
        };
        self.state = Value::Array(next);
        self.report()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Value> {
        if self.disabled {
            return None;
        }
        let count = self.flat_options().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(count.saturating_sub(1));
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter if !self.read_only => self.toggle_highlighted(),
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
        InputView::Checklist {
            rows: self.rows(),
            focused: self.focused,
            disabled: self.disabled,
            read_only: self.read_only,
        }
    }
}
