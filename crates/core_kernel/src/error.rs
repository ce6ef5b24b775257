//! Core error types used across the system

use thiserror::Error;

/// Error taxonomy shared by store ports and domain services.
///
/// Domain crates wrap this type in their own error enums; the transport
/// layer maps each variant onto an HTTP status code.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad or missing input. The message names the offending field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The persistent store is unreachable or failed. Recoverable by retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CoreError::Conflict(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        CoreError::StoreUnavailable(message.into())
    }

    /// Returns true if this error indicates a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }

    /// Returns true if this error indicates a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Conflict(_))
    }

    /// Returns true if this error indicates a transient infrastructure failure.
    pub fn is_transient(&self) -> bool {
        matches!(self, CoreError::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helper() {
        let error = CoreError::not_found("Application", "SA-1");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Application"));
        assert!(error.to_string().contains("SA-1"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(CoreError::store("connection refused").is_transient());
        assert!(!CoreError::validation("email").is_transient());
        assert!(CoreError::conflict("reference").is_conflict());
    }
}
