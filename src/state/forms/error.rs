//! Form engine errors

use thiserror::Error;

/// Errors raised by the form engine.
///
/// Validation failures are not errors: they are reported through
/// [`SubmitOutcome::Failure`](super::SubmitOutcome) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The field name was not declared in the form's default values
    #[error("unknown field `{name}`")]
    UnknownField { name: String },

    /// A form definition declares the same field twice
    #[error("field `{name}` is declared more than once")]
    DuplicateField { name: String },
}

impl FormError {
    pub fn unknown_field(name: &str) -> Self {
        Self::UnknownField {
            name: name.to_string(),
        }
    }
}
