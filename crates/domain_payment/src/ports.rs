//! Storage port for payments

use async_trait::async_trait;
use core_kernel::{ApplicationId, CoreError, PaymentId};
use domain_application::ApplicationStatus;

use crate::payment::{Payment, PaymentStatus};

/// Persistence operations for payments
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Records a payment and moves its application to the given status in
    /// one atomic write. Neither side is visible without the other.
    async fn record(
        &self,
        payment: &Payment,
        application_status: ApplicationStatus,
    ) -> Result<(), CoreError>;

    async fn get(&self, id: PaymentId) -> Result<Payment, CoreError>;

    /// Updates a payment's verification status.
    async fn set_status(&self, id: PaymentId, status: PaymentStatus) -> Result<(), CoreError>;

    /// Lists payments declared against an application, newest first.
    async fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<Payment>, CoreError>;
}
