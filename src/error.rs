//! Service-level error types.
//!
//! Card data problems are never errors here: they resolve to an invalid
//! [`Verdict`](crate::Verdict). These types cover configuration mistakes,
//! which callers must handle separately from rejections.

use thiserror::Error;

/// Errors returned by the validation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No chain is registered for the requested validator type.
    #[error("unknown validator type: {0}")]
    UnknownValidatorType(String),
}

/// Error returned when a string does not name a validator type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown validator type: {input:?} (expected \"live\" or \"test\")")]
pub struct ParseValidatorTypeError {
    /// The input that failed to parse.
    pub input: String,
}

impl From<ParseValidatorTypeError> for ServiceError {
    fn from(err: ParseValidatorTypeError) -> Self {
        Self::UnknownValidatorType(err.input)
    }
}
