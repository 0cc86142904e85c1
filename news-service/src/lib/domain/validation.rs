use thiserror::Error;

/// Field-level validation failure raised by value object constructors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} too short: minimum {min} characters, got {actual}")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} contains invalid characters (only alphanumeric, underscore, and hyphen allowed)")]
    InvalidCharacters { field: &'static str },

    #[error("Invalid {field} format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

/// Check that `value` holds between `min` and `max` characters.
///
/// A `min` of 1 reports blank input as `Empty` rather than `TooShort`.
pub(crate) fn bounded(
    field: &'static str,
    value: String,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let length = value.chars().count();

    if min == 1 && value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else if length < min {
        Err(ValidationError::TooShort {
            field,
            min,
            actual: length,
        })
    } else if length > max {
        Err(ValidationError::TooLong {
            field,
            max,
            actual: length,
        })
    } else {
        Ok(value)
    }
}
