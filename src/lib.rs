//! formtree - composable forms over JSON values
//!
//! A [`Form`] holds a `serde_json::Value` object and binds the inputs below it
//! to paths inside that object by name. Forms nest: a named child form takes
//! the slice at its name and reports its whole value back, so paths compose
//! across levels. Edits flow up as fresh values; nothing is mutated in place.
//!
//! The `ui` module draws form trees with Ratatui, and the `formtree-demo`
//! binary wires everything into a small terminal editor.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod platform;
pub mod state;
pub mod ui;

pub use error::FormError;
pub use state::{
    ControlEvent, DataType, Field, Form, FormInput, Group, Input, Node, OptionItem,
    SelectCheckboxInput, SelectOption,
};
