//! Data layer error types

use thiserror::Error;

/// Errors that can occur while building the sales table
#[derive(Error, Debug)]
pub enum DataError {
    /// Generator settings are out of range
    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    /// No rows to build a store from
    #[error("Sales table is empty")]
    Empty,
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::InvalidConfig("floor must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid generator config: floor must be positive");
        assert_eq!(DataError::Empty.to_string(), "Sales table is empty");
    }
}
