//! Error types for form construction

use crate::state::DataType;
use thiserror::Error;

/// Errors raised while building form inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A selection input was given options whose values differ in primitive type
    #[error(
        "SelectCheckboxInput: All option values must have the same data type. \
         The data type of the first option is \"{expected}\" while the data type \
         of the {label} option is \"{found}\""
    )]
    MixedOptionTypes {
        expected: DataType,
        label: String,
        found: DataType,
    },
}
