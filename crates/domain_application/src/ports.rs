//! Storage port for applications
//!
//! The domain talks to persistence through this trait; the Postgres adapter
//! and the in-memory test store both implement it.

use async_trait::async_trait;
use core_kernel::{ApplicationId, CoreError, PaymentId};

use crate::application::{Application, ApplicationStatus};

/// Persistence operations for applications
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Inserts a new application.
    ///
    /// Fails with [`CoreError::Conflict`] when the reference is already
    /// taken, so the registry can regenerate it and retry.
    async fn insert(&self, application: &Application) -> Result<(), CoreError>;

    /// Fetches an application by its internal id.
    async fn get(&self, id: ApplicationId) -> Result<Application, CoreError>;

    /// Fetches an application by its public reference.
    async fn get_by_reference(&self, reference: &str) -> Result<Application, CoreError>;

    /// Lists applications, newest first, optionally filtered by status.
    async fn list(&self, status: Option<ApplicationStatus>) -> Result<Vec<Application>, CoreError>;

    /// Persists a status change, updating the latest payment reference when
    /// one is supplied.
    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        payment_id: Option<PaymentId>,
    ) -> Result<(), CoreError>;
}
