//! Reactor errors.

use thiserror::Error;

pub type ReactorResult<T> = Result<T, ReactorError>;

/// A fatal event-stream error: the stream violated the traversal
/// grammar, or a processor could not continue. The current traversal
/// is abandoned; there is no partial-result recovery.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ReactorError {
    message: String,
}

impl ReactorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
