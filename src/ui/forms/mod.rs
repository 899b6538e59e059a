//! Form tree rendering
//!
//! Nodes are stacked vertically. Fields draw their label above their
//! children and an optional help line below; groups draw an optional title.

mod field_renderer;

use super::theme::Theme;
use crate::state::{Field, Form, Group, Node};
use field_renderer::draw_input;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Rows needed to draw `node`
pub fn node_height(node: &Node) -> u16 {
    match node {
        Node::Form(form) => nodes_height(form.children()),
        Node::Input(input) => input.view().height(),
        Node::Field(field) => {
            let help = u16::from(field.help_text().is_some());
            nodes_height(field.children())
                .saturating_add(1)
                .saturating_add(help)
        }
        Node::Group(group) => {
            let title = u16::from(group.title().is_some());
            nodes_height(group.children()).saturating_add(title)
        }
        Node::Text(_) => 1,
    }
}

fn nodes_height(nodes: &[Node]) -> u16 {
    nodes
        .iter()
        .fold(0u16, |total, node| total.saturating_add(node_height(node)))
}

/// Whether an input under `node` has focus
fn contains_focus(node: &Node) -> bool {
    match node {
        Node::Form(form) => form.has_focus(),
        Node::Input(input) => input.is_focused(),
        Node::Field(field) => field.children().iter().any(contains_focus),
        Node::Group(group) => group.children().iter().any(contains_focus),
        Node::Text(_) => false,
    }
}

/// Draw a whole form into `area`, clipping what does not fit
pub fn draw_form(frame: &mut Frame, area: Rect, form: &Form, theme: &Theme) {
    draw_nodes(frame, area, form.children(), theme);
}

/// Split off the next `height` rows of `area`
fn take_rows(area: &mut Rect, height: u16) -> Option<Rect> {
    if area.height == 0 {
        return None;
    }
    let height = height.min(area.height);
    let taken = Rect { height, ..*area };
    area.y += height;
    area.height -= height;
    Some(taken)
}

fn draw_nodes(frame: &mut Frame, area: Rect, nodes: &[Node], theme: &Theme) {
    let mut remaining = area;
    for node in nodes {
        let Some(slot) = take_rows(&mut remaining, node_height(node)) else {
            break;
        };
        draw_node(frame, slot, node, theme);
    }
}

fn draw_node(frame: &mut Frame, area: Rect, node: &Node, theme: &Theme) {
    match node {
        Node::Form(form) => draw_form(frame, area, form, theme),
        Node::Input(input) => draw_input(frame, area, &input.view(), theme),
        Node::Field(field) => draw_field(frame, area, field, contains_focus(node), theme),
        Node::Group(group) => draw_group(frame, area, group, theme),
        Node::Text(text) => frame.render_widget(Paragraph::new(text.as_str()), area),
    }
}

fn draw_field(frame: &mut Frame, area: Rect, field: &Field, focused: bool, theme: &Theme) {
    let mut remaining = area;
    if let Some(label_area) = take_rows(&mut remaining, 1) {
        let style = theme.border(focused).add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(Line::styled(field.label(), style)), label_area);
    }

    let children_height = nodes_height(field.children());
    if let Some(children_area) = take_rows(&mut remaining, children_height) {
        draw_nodes(frame, children_area, field.children(), theme);
    }

    if let Some(help) = field.help_text() {
        if let Some(help_area) = take_rows(&mut remaining, 1) {
            let style = Style::default()
                .fg(theme.idle)
                .add_modifier(Modifier::ITALIC);
            frame.render_widget(Paragraph::new(Line::styled(help, style)), help_area);
        }
    }
}

fn draw_group(frame: &mut Frame, area: Rect, group: &Group, theme: &Theme) {
    let mut remaining = area;
    if let Some(title) = group.title() {
        if let Some(title_area) = take_rows(&mut remaining, 1) {
            frame.render_widget(
                Paragraph::new(Line::styled(title, theme.heading())),
                title_area,
            );
        }
    }
    draw_nodes(frame, remaining, group.children(), theme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Input, OptionItem, SelectCheckboxInput, SelectOption};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn render(form: &Form, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_form(frame, frame.area(), form, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn colors() -> Vec<OptionItem> {
        vec![
            SelectOption::new("Red", "red").into(),
            SelectOption::new("Blue", "blue").into(),
        ]
    }

    mod heights {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_field_height_counts_label_and_help() {
            let field = Node::from(Field::new("Name").help("hint").child(Input::named("name")));
            assert_eq!(node_height(&field), 5);
        }

        #[test]
        fn test_group_height_counts_title() {
            let group = Node::from(Group::titled("T").child("text").child(Input::new()));
            assert_eq!(node_height(&group), 5);
            assert_eq!(node_height(&Node::from(Group::new().child("text"))), 1);
        }

        #[test]
        fn test_checklist_height_counts_group_headers() {
            let options = vec![OptionItem::group("Warm", colors())];
            let input = Node::from(SelectCheckboxInput::new(options).unwrap());
            assert_eq!(node_height(&input), 5);
        }
    }

    mod drawing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_text_input_shows_injected_value() {
            let form = Form::new()
                .with_value(json!({"name": "Ada"}))
                .child(Field::new("Name").child(Input::named("name")))
                .mounted();
            let lines = render(&form, 20, 4);
            assert_eq!(lines[0], "Name");
            assert!(lines[2].contains("Ada"));
        }

        #[test]
        fn test_empty_input_shows_placeholder() {
            let form = Form::new()
                .child(Input::named("a"))
                .child(Input::named("b").placeholder("type here"))
                .mounted();
            let lines = render(&form, 20, 6);
            assert!(lines[1].contains("(empty)"));
            assert!(lines[4].contains("type here"));
        }

        #[test]
        fn test_focused_input_shows_cursor() {
            let mut form = Form::new().child(Input::named("a")).mounted();
            form.focus_next();
            let lines = render(&form, 20, 3);
            assert!(lines[1].contains('▌'));
            assert!(!lines[1].contains("(empty)"));
        }

        #[test]
        fn test_checklist_marks_selected_options() {
            let form = Form::new()
                .with_value(json!({"colors": ["blue"]}))
                .child(SelectCheckboxInput::named("colors", colors()).unwrap())
                .mounted();
            let lines = render(&form, 20, 4);
            assert!(lines[1].contains("[ ] Red"));
            assert!(lines[2].contains("[x] Blue"));
        }

        #[test]
        fn test_nested_form_and_help_are_drawn() {
            let form = Form::new()
                .with_value(json!({"address": {"city": "Oslo"}}))
                .child(Group::titled("Address").child(
                    Form::named("address")
                        .child(Field::new("City").help("Where you live").child(Input::named("city"))),
                ))
                .mounted();
            let lines = render(&form, 20, 6);
            assert_eq!(lines[0], "Address");
            assert_eq!(lines[1], "City");
            assert!(lines[3].contains("Oslo"));
            assert_eq!(lines[5], "Where you live");
        }

        #[test]
        fn test_small_area_clips_without_panicking() {
            let form = Form::new()
                .child(Input::named("a"))
                .child(Input::named("b"))
                .mounted();
            let lines = render(&form, 10, 4);
            assert_eq!(lines.len(), 4);
        }
    }
}
