//! Form state module

mod forms;
pub mod path;
pub mod value;

pub use forms::*;
pub use path::{Path, PathSegment};
pub use value::DataType;
