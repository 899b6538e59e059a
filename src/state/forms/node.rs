//! Form tree nodes and layout wrappers

use super::form_state::Form;
use super::input::{FormInput, NodeKind};
use super::select_checkbox::SelectCheckboxInput;
use super::text_input::Input;

/// A node of a form tree
#[derive(Debug)]
pub enum Node {
    Form(Form),
    Input(Box<dyn FormInput>),
    Field(Field),
    Group(Group),
    Text(String),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Form(_) => NodeKind::Form,
            Node::Input(input) => input.kind(),
            Node::Field(_) | Node::Group(_) | Node::Text(_) => NodeKind::Layout,
        }
    }

    /// Static text
    pub fn text(text: &str) -> Self {
        Node::Text(text.to_string())
    }

    /// Wrap any custom input
    pub fn input(input: impl FormInput + 'static) -> Self {
        Node::Input(Box::new(input))
    }
}

impl From<Form> for Node {
    fn from(form: Form) -> Self {
        Node::Form(form)
    }
}

impl From<Input> for Node {
    fn from(input: Input) -> Self {
        Node::input(input)
    }
}

impl From<SelectCheckboxInput> for Node {
    fn from(input: SelectCheckboxInput) -> Self {
        Node::input(input)
    }
}

impl From<Field> for Node {
    fn from(field: Field) -> Self {
        Node::Field(field)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::text(text)
    }
}

/// A labelled wrapper around arbitrary children.
///
/// Purely presentational: it holds no value and adds nothing to paths.
#[derive(Debug)]
pub struct Field {
    label: String,
    help: Option<String>,
    children: Vec<Node>,
}

impl Field {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            help: None,
            children: Vec::new(),
        }
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }
}

/// A vertical container with an optional title
#[derive(Debug, Default)]
pub struct Group {
    title: Option<String>,
    children: Vec<Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }
}
