//! Traversal over form trees
//!
//! Two walks exist. `walk` visits every input under a form, descending into
//! nested forms and composing their path prefixes. `for_each_bound` stays
//! inside one form's scope and yields its direct bound children: inputs and
//! nested forms, which are treated as opaque.

use super::form_state::Form;
use super::input::FormInput;
use super::node::Node;
use crate::state::path::join;
use serde_json::Value;

/// Read-only visitor over a form tree.
///
/// `path` is the composed path from the walked form. It is `None` for
/// unmanaged inputs and for everything under an unnamed nested form.
pub trait Visitor<'a> {
    fn visit_input(&mut self, _path: Option<&str>, _input: &'a dyn FormInput) {}

    fn enter_form(&mut self, _path: Option<&str>, _form: &'a Form) {}

    fn leave_form(&mut self, _path: Option<&str>, _form: &'a Form) {}
}

/// Visit `form` and everything below it in tree order
pub fn walk<'a, V: Visitor<'a> + ?Sized>(form: &'a Form, visitor: &mut V) {
    visitor.enter_form(Some(""), form);
    walk_nodes(form.children(), Some(""), visitor);
    visitor.leave_form(Some(""), form);
}

fn walk_nodes<'a, V: Visitor<'a> + ?Sized>(
    nodes: &'a [Node],
    prefix: Option<&str>,
    visitor: &mut V,
) {
    for node in nodes {
        match node {
            Node::Input(input) => {
                let path = compose(prefix, input.name());
                visitor.visit_input(path.as_deref(), input.as_ref());
            }
            Node::Form(form) => {
                let path = compose(prefix, form.name());
                visitor.enter_form(path.as_deref(), form);
                walk_nodes(form.children(), path.as_deref(), visitor);
                visitor.leave_form(path.as_deref(), form);
            }
            Node::Field(field) => walk_nodes(field.children(), prefix, visitor),
            Node::Group(group) => walk_nodes(group.children(), prefix, visitor),
            Node::Text(_) => {}
        }
    }
}

fn compose(prefix: Option<&str>, name: Option<&str>) -> Option<String> {
    Some(join(prefix?, name?))
}

/// Every input's composed path, in tree order
#[derive(Debug, Default)]
pub(crate) struct PathCollector {
    pub paths: Vec<Option<String>>,
}

impl<'a> Visitor<'a> for PathCollector {
    fn visit_input(&mut self, path: Option<&str>, _input: &'a dyn FormInput) {
        self.paths.push(path.map(str::to_string));
    }
}

/// Whether any managed input is dirty. Unmanaged inputs never reach the
/// form's value, so they are skipped.
#[derive(Debug, Default)]
pub(crate) struct DirtyCheck {
    pub dirty: bool,
}

impl<'a> Visitor<'a> for DirtyCheck {
    fn visit_input(&mut self, path: Option<&str>, input: &'a dyn FormInput) {
        if path.is_some() {
            self.dirty |= input.is_dirty();
        }
    }
}

/// Locates the focused input
#[derive(Debug, Default)]
pub(crate) struct FocusFinder {
    pub found: bool,
    pub path: Option<String>,
}

impl<'a> Visitor<'a> for FocusFinder {
    fn visit_input(&mut self, path: Option<&str>, input: &'a dyn FormInput) {
        if !self.found && input.is_focused() {
            self.found = true;
            self.path = path.map(str::to_string);
        }
    }
}

/// Locates an input by composed path
pub(crate) struct InputFinder<'a, 'p> {
    pub path: &'p str,
    pub found: Option<&'a dyn FormInput>,
}

impl<'a> Visitor<'a> for InputFinder<'a, '_> {
    fn visit_input(&mut self, path: Option<&str>, input: &'a dyn FormInput) {
        if self.found.is_none() && path == Some(self.path) {
            self.found = Some(input);
        }
    }
}

/// A bound child of one form: an input or a nested form
pub(crate) enum Bound<'a> {
    Input(&'a mut Box<dyn FormInput>),
    Form(&'a mut Form),
}

impl Bound<'_> {
    pub fn name(&self) -> Option<&str> {
        match self {
            Bound::Input(input) => input.name(),
            Bound::Form(form) => form.name(),
        }
    }

    pub fn has_explicit_value(&self) -> bool {
        match self {
            Bound::Input(input) => input.has_explicit_value(),
            Bound::Form(form) => form.has_explicit_value(),
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Bound::Input(input) => input.value(),
            Bound::Form(form) => form.value(),
        }
    }

    pub fn mount(&mut self, injected: Option<Value>) -> Option<Value> {
        match self {
            Bound::Input(input) => input.mount(injected),
            Bound::Form(form) => form.mount(injected),
        }
    }

    pub fn receive_value(&mut self, value: Value) -> Option<Value> {
        match self {
            Bound::Input(input) => input.receive_value(value),
            Bound::Form(form) => form.receive_value(value),
        }
    }

    pub fn reset_value(&mut self) {
        match self {
            Bound::Input(input) => input.reset_value(),
            Bound::Form(form) => form.reset_value(),
        }
    }
}

/// Call `f` on each bound child inside one form's scope
pub(crate) fn for_each_bound(nodes: &mut [Node], f: &mut dyn FnMut(Bound<'_>)) {
    for node in nodes {
        match node {
            Node::Input(input) => f(Bound::Input(input)),
            Node::Form(form) => f(Bound::Form(form)),
            Node::Field(field) => for_each_bound(field.children_mut(), f),
            Node::Group(group) => for_each_bound(group.children_mut(), f),
            Node::Text(_) => {}
        }
    }
}

/// A leaf input with its composed path
pub(crate) struct Leaf<'a> {
    pub path: Option<String>,
    pub input: &'a mut Box<dyn FormInput>,
}

/// Collect every leaf input below `nodes`, nested forms included
pub(crate) fn leaves_mut<'a>(nodes: &'a mut [Node], prefix: Option<&str>, out: &mut Vec<Leaf<'a>>) {
    for node in nodes {
        match node {
            Node::Input(input) => {
                let path = compose(prefix, input.name());
                out.push(Leaf { path, input });
            }
            Node::Form(form) => {
                let path = compose(prefix, form.name());
                leaves_mut(form.children_mut(), path.as_deref(), out);
            }
            Node::Field(field) => leaves_mut(field.children_mut(), prefix, out),
            Node::Group(group) => leaves_mut(group.children_mut(), prefix, out),
            Node::Text(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{Field, Group, Input};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
    }

    impl<'a> Visitor<'a> for Trace {
        fn visit_input(&mut self, path: Option<&str>, _input: &'a dyn FormInput) {
            self.events.push(format!("input {path:?}"));
        }

        fn enter_form(&mut self, path: Option<&str>, _form: &'a Form) {
            self.events.push(format!("enter {path:?}"));
        }

        fn leave_form(&mut self, path: Option<&str>, _form: &'a Form) {
            self.events.push(format!("leave {path:?}"));
        }
    }

    fn sample() -> Form {
        Form::new()
            .child(Field::new("Type").child(Input::named("type")))
            .child(
                Group::titled("Inner").child(
                    Form::named("foo")
                        .child(Field::new("Bar").child(Input::named("bar")))
                        .child(Input::named("bip")),
                ),
            )
            .child(Input::new())
    }

    #[test]
    fn test_walk_visits_in_tree_order() {
        let form = sample();
        let mut trace = Trace::default();
        walk(&form, &mut trace);
        assert_eq!(
            trace.events,
            vec![
                r#"enter Some("")"#,
                r#"input Some("type")"#,
                r#"enter Some("foo")"#,
                r#"input Some("foo.bar")"#,
                r#"input Some("foo.bip")"#,
                r#"leave Some("foo")"#,
                "input None",
                r#"leave Some("")"#,
            ]
        );
    }

    #[test]
    fn test_unnamed_nested_form_hides_paths() {
        let form = Form::new().child(Form::new().child(Input::named("inner")));
        let mut paths = PathCollector::default();
        walk(&form, &mut paths);
        assert_eq!(paths.paths, vec![None]);
    }

    #[test]
    fn test_for_each_bound_stops_at_nested_forms() {
        let mut form = sample();
        let mut names = Vec::new();
        for_each_bound(form.children_mut(), &mut |child: Bound<'_>| {
            names.push(child.name().map(str::to_string));
        });
        assert_eq!(
            names,
            vec![Some("type".to_string()), Some("foo".to_string()), None]
        );
    }

    #[test]
    fn test_leaves_mut_descends_into_nested_forms() {
        let mut form = sample();
        let mut leaves = Vec::new();
        leaves_mut(form.children_mut(), Some(""), &mut leaves);
        let paths: Vec<_> = leaves.iter().map(|leaf| leaf.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                Some("type".to_string()),
                Some("foo.bar".to_string()),
                Some("foo.bip".to_string()),
                None
            ]
        );
    }
}
