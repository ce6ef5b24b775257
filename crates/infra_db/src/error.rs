//! Database error types
//!
//! This module defines the error types that can occur during database
//! operations and the mapping back to the core error taxonomy.

use core_kernel::CoreError;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// Maps PostgreSQL error codes onto the taxonomy:
/// 23505 (unique) and 23503 (foreign key) become constraint variants,
/// everything else is a query failure.
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                        "23503" => {
                            DatabaseError::ForeignKeyViolation(db_err.message().to_string())
                        }
                        "23514" => {
                            DatabaseError::ConstraintViolation(db_err.message().to_string())
                        }
                        _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                    }
                } else {
                    DatabaseError::QueryFailed(db_err.message().to_string())
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

/// Maps database errors onto the core taxonomy the domain services consume.
impl From<DatabaseError> for CoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(msg) => CoreError::NotFound(msg),
            DatabaseError::DuplicateEntry(msg) => CoreError::Conflict(msg),
            DatabaseError::ConnectionFailed(msg) => CoreError::StoreUnavailable(msg),
            DatabaseError::PoolExhausted => {
                CoreError::StoreUnavailable("connection pool exhausted".to_string())
            }
            other => CoreError::StoreUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_core_not_found() {
        let error: CoreError = DatabaseError::not_found("Application", "SA-1").into();
        assert!(error.is_not_found());
    }

    #[test]
    fn test_duplicate_maps_to_core_conflict() {
        let error: CoreError = DatabaseError::DuplicateEntry("reference".to_string()).into();
        assert!(error.is_conflict());
    }

    #[test]
    fn test_connection_failures_are_transient() {
        let error: CoreError = DatabaseError::PoolExhausted.into();
        assert!(error.is_transient());
    }
}
