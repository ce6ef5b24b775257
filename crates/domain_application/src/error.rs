//! Application domain errors

use core_kernel::CoreError;
use thiserror::Error;

/// Errors raised by the application domain
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApplicationError::Validation(message.into())
    }

    /// Returns true if this error indicates a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApplicationError::Core(e) if e.is_not_found())
    }
}
