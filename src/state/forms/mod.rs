//! Form tree layer
//!
//! A [`Form`] owns a value object and hands slices of it to the inputs below
//! it, matched by each input's `name` path. Inputs report edits back up and
//! the form merges them into a new value. Nested forms take the slice at
//! their own name, so paths compose across levels.

mod form_state;
mod input;
mod node;
mod notify;
mod select_checkbox;
mod text_input;
mod visit;

pub use form_state::Form;
pub use input::{ChecklistRow, ControlEvent, FormInput, InputView, NodeKind};
pub use node::{Field, Group, Node};
pub use notify::{ChangeCallback, ChangeNotifier};
pub use select_checkbox::{OptionItem, SelectCheckboxInput, SelectOption};
pub use text_input::Input;
pub use visit::{walk, Visitor};
