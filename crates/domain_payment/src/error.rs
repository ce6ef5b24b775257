//! Payment domain errors

use core_kernel::CoreError;
use domain_application::ApplicationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PaymentError {
    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            PaymentError::Core(e) => e.is_not_found(),
            PaymentError::Application(e) => e.is_not_found(),
            PaymentError::Validation(_) => false,
        }
    }
}
