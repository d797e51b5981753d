//! Filter input error types
//!
//! An empty selection is not an error; it produces the empty-marker payload.

use thiserror::Error;

/// Errors raised while turning raw control values into a `ControlState`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A date bound could not be coerced to a calendar date
    #[error("Malformed {field}: '{value}' is not a recognised date")]
    MalformedDate { field: &'static str, value: String },

    /// A category label is not present in the sales table
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
