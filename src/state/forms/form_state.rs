//! Form containers: value ownership, injection and change merging

use super::input::{ControlEvent, FormInput};
use super::node::Node;
use super::notify::ChangeNotifier;
use super::visit::{
    for_each_bound, leaves_mut, walk, Bound, DirtyCheck, FocusFinder, InputFinder, Leaf,
    PathCollector,
};
use crate::state::path::{resolve, set, Path};
use crate::state::value::values_equal;
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::{Map, Value};

/// What a form routes to its focused input
enum Dispatch {
    Event(ControlEvent),
    Key(KeyEvent),
}

/// Result of routing to a focused child
struct Routed {
    name: Option<String>,
    report: Option<Value>,
}

fn route(nodes: &mut [Node], dispatch: &Dispatch) -> Option<Routed> {
    for node in nodes {
        let routed = match node {
            Node::Input(input) if input.is_focused() => {
                let report = match dispatch {
                    Dispatch::Event(event) => input.apply(event.clone()),
                    Dispatch::Key(key) => input.handle_key(*key),
                };
                Routed {
                    name: input.name().map(str::to_string),
                    report,
                }
            }
            Node::Form(form) if form.has_focus() => Routed {
                report: form.dispatch(dispatch),
                name: form.name().map(str::to_string),
            },
            Node::Field(field) => match route(field.children_mut(), dispatch) {
                Some(routed) => routed,
                None => continue,
            },
            Node::Group(group) => match route(group.children_mut(), dispatch) {
                Some(routed) => routed,
                None => continue,
            },
            _ => continue,
        };
        return Some(routed);
    }
    None
}

/// A form owns one value object and keeps it in sync with its inputs.
///
/// Named descendants receive the slice of the value at their name. Their
/// changes are merged back at the same path, replacing the value rather
/// than mutating it, and reported through `on_changing` / `on_changed`.
/// A nested form takes the slice at its own name and reports its whole
/// value upward, so paths compose (`foo` + `bar` = `foo.bar`).
///
/// # Example
///
/// ```
/// use formtree::state::{ControlEvent, Form, Input};
/// use serde_json::json;
///
/// let mut form = Form::new()
///     .with_value(json!({"foo": {"bar": "V"}}))
///     .child(Input::named("foo.bar"))
///     .mounted();
///
/// form.change("foo.bar", ControlEvent::Text("NEW".to_string()));
/// assert_eq!(form.value(), json!({"foo": {"bar": "NEW"}}));
/// ```
#[derive(Debug)]
pub struct Form {
    name: Option<String>,
    explicit: bool,
    /// Last externally provided value
    prop: Value,
    /// Composed value
    state: Value,
    children: Vec<Node>,
    notifier: ChangeNotifier,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Create an unnamed form holding an empty object
    pub fn new() -> Self {
        let empty = Value::Object(Map::new());
        Self {
            name: None,
            explicit: false,
            prop: empty.clone(),
            state: empty,
            children: Vec::new(),
            notifier: ChangeNotifier::default(),
        }
    }

    /// Create a form nested under `name` in its parent form
    pub fn named(name: &str) -> Self {
        Self::new().with_name(name)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Value of the form. On a nested form this is an explicit value and
    /// the parent will not inject into it.
    pub fn with_value(mut self, value: Value) -> Self {
        self.prop = value.clone();
        self.state = value;
        self.explicit = true;
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
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

    /// Mount as a root form
    pub fn mounted(mut self) -> Self {
        self.mount(None);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_explicit_value(&self) -> bool {
        self.explicit
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Current composed value
    pub fn value(&self) -> Value {
        self.state.clone()
    }

    /// Whether any input below this form is dirty
    pub fn is_dirty(&self) -> bool {
        let mut check = DirtyCheck::default();
        walk(self, &mut check);
        check.dirty
    }

    /// Reset every input to its last provided value, without notifying
    pub fn reset_value(&mut self) {
        for_each_bound(&mut self.children, &mut |mut child: Bound<'_>| child.reset_value());
        self.recompose();
        self.notifier.sync(&self.state);
    }

    /// Adopt `injected` (if any), push values into inputs, collect their
    /// initial reports and notify once.
    pub fn mount(&mut self, injected: Option<Value>) -> Option<Value> {
        if let Some(value) = injected {
            self.prop = value;
        }
        let prop = &self.prop;
        for_each_bound(&mut self.children, &mut |mut child: Bound<'_>| {
            let injected = match child.name() {
                Some(name) if !child.has_explicit_value() => Some(resolve(prop, name)),
                _ => None,
            };
            child.mount(injected);
        });
        self.recompose();
        tracing::debug!(form = ?self.name, "form mounted");
        self.report()
    }

    /// External value update.
    ///
    /// Ignored when `value` equals the current one; otherwise injected
    /// inputs become clean with their new slice.
    pub fn receive_value(&mut self, value: Value) -> Option<Value> {
        if values_equal(&value, &self.prop) {
            return None;
        }
        self.prop = value;
        let prop = &self.prop;
        for_each_bound(&mut self.children, &mut |mut child: Bound<'_>| {
            if child.has_explicit_value() {
                return;
            }
            if let Some(name) = child.name() {
                let slice = resolve(prop, name);
                child.receive_value(slice);
            }
        });
        self.recompose();
        self.report()
    }

    /// Deliver a native control change to the focused input
    pub fn apply(&mut self, event: ControlEvent) -> Option<Value> {
        self.dispatch(&Dispatch::Event(event))
    }

    /// Focus the input at `path` and deliver `event` to it
    pub fn change(&mut self, path: &str, event: ControlEvent) -> Option<Value> {
        if !self.focus_path(path) {
            return None;
        }
        self.apply(event)
    }

    /// Tab and BackTab move focus, other keys go to the focused input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Value> {
        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                None
            }
            _ => self.dispatch(&Dispatch::Key(key)),
        }
    }

    fn dispatch(&mut self, dispatch: &Dispatch) -> Option<Value> {
        let Routed { name, report } = route(&mut self.children, dispatch)?;
        match (name, report) {
            (Some(name), Some(value)) => self.merge(&name, value),
            _ => None,
        }
    }

    fn merge(&mut self, name: &str, value: Value) -> Option<Value> {
        self.state = set(&self.state, &Path::parse(name), value);
        tracing::debug!(form = ?self.name, path = name, "merged input change");
        self.report()
    }

    /// Rebuild the composed value from the prop and every bound child
    fn recompose(&mut self) {
        let mut state = self.prop.clone();
        for_each_bound(&mut self.children, &mut |child: Bound<'_>| {
            if let Some(name) = child.name() {
                state = set(&state, &Path::parse(name), child.value());
            }
        });
        self.state = state;
    }

    fn report(&mut self) -> Option<Value> {
        if self.notifier.notify(&self.state) {
            Some(self.state.clone())
        } else {
            None
        }
    }

    /// Composed path of every input below this form, in tree order
    pub fn input_paths(&self) -> Vec<Option<String>> {
        let mut collector = PathCollector::default();
        walk(self, &mut collector);
        collector.paths
    }

    /// Input at a composed path
    pub fn input(&self, path: &str) -> Option<&dyn FormInput> {
        let mut finder = InputFinder { path, found: None };
        walk(self, &mut finder);
        finder.found
    }

    pub fn has_focus(&self) -> bool {
        let mut finder = FocusFinder::default();
        walk(self, &mut finder);
        finder.found
    }

    /// Path of the focused input, when it is a managed one
    pub fn focused_path(&self) -> Option<String> {
        let mut finder = FocusFinder::default();
        walk(self, &mut finder);
        finder.path
    }

    pub fn focus_next(&mut self) -> bool {
        self.move_focus(true)
    }

    pub fn focus_prev(&mut self) -> bool {
        self.move_focus(false)
    }

    fn move_focus(&mut self, forward: bool) -> bool {
        let mut leaves = Vec::new();
        leaves_mut(&mut self.children, Some(""), &mut leaves);

        let focusable: Vec<usize> = leaves
            .iter()
            .enumerate()
            .filter(|(_, leaf)| leaf.input.is_focusable())
            .map(|(i, _)| i)
            .collect();
        if focusable.is_empty() {
            return false;
        }

        let current = leaves.iter().position(|leaf| leaf.input.is_focused());
        let position = current.and_then(|c| focusable.iter().position(|&i| i == c));
        let count = focusable.len();
        let next = match (position, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(p), true) => (p + 1) % count,
            (Some(p), false) => (p + count - 1) % count,
        };

        for leaf in leaves.iter_mut() {
            leaf.input.set_focused(false);
        }
        leaves[focusable[next]].input.set_focused(true);
        true
    }

    /// Focus the input at a composed path. Disabled inputs cannot take focus.
    pub fn focus_path(&mut self, path: &str) -> bool {
        let mut leaves: Vec<Leaf<'_>> = Vec::new();
        leaves_mut(&mut self.children, Some(""), &mut leaves);

        let Some(target) = leaves
            .iter()
            .position(|leaf| leaf.path.as_deref() == Some(path) && leaf.input.is_focusable())
        else {
            return false;
        };
        for (i, leaf) in leaves.iter_mut().enumerate() {
            leaf.input.set_focused(i == target);
        }
        true
    }

    /// Clear focus everywhere below this form
    pub fn blur(&mut self) {
        let mut leaves = Vec::new();
        leaves_mut(&mut self.children, Some(""), &mut leaves);
        for leaf in leaves.iter_mut() {
            leaf.input.set_focused(false);
        }
    }
}
