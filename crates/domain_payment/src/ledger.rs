//! Payment ledger
//!
//! Confirms payment declarations against applications and applies admin
//! verification verdicts. The declaration write and the application status
//! change are committed together through [`PaymentStore::record`].

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use core_kernel::PaymentId;
use domain_application::{ApplicationEvent, ApplicationStore};
use domain_notification::{Notification, NotificationChannel, NotificationKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::PaymentError;
use crate::payment::{Payment, PaymentMethod, PaymentStatus, MIN_PAYMENT_AMOUNT};
use crate::ports::PaymentStore;

/// A citizen's declaration of an out-of-band payment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDeclaration {
    /// The application reference the payment is for
    pub application_id: String,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub amount: Decimal,
    /// The date the citizen says they paid; defaults to today when omitted
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
}

impl PaymentDeclaration {
    /// Checks the declaration before it touches any application.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.application_id.trim().is_empty() {
            return Err(PaymentError::validation("applicationId is required"));
        }
        if self.transaction_id.trim().is_empty() {
            return Err(PaymentError::validation("transactionId is required"));
        }
        if self.amount < MIN_PAYMENT_AMOUNT {
            return Err(PaymentError::validation(format!(
                "amount must be at least {}",
                MIN_PAYMENT_AMOUNT
            )));
        }
        Ok(())
    }
}

pub struct PaymentLedger {
    applications: Arc<dyn ApplicationStore>,
    payments: Arc<dyn PaymentStore>,
    channel: Arc<NotificationChannel>,
}

impl PaymentLedger {
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        payments: Arc<dyn PaymentStore>,
        channel: Arc<NotificationChannel>,
    ) -> Self {
        Self {
            applications,
            payments,
            channel,
        }
    }

    /// Confirms a payment declaration.
    ///
    /// Validates the declaration, records the payment, and moves the
    /// application to `payment_pending` in the same write. The admin
    /// notification is emitted afterwards and is best-effort: a failure is
    /// logged but does not undo the confirmed payment.
    #[instrument(skip(self, declaration), fields(reference = %declaration.application_id))]
    pub async fn confirm_payment(
        &self,
        declaration: PaymentDeclaration,
    ) -> Result<Payment, PaymentError> {
        declaration.validate()?;

        let mut application = self
            .applications
            .get_by_reference(declaration.application_id.trim())
            .await?;

        let payment = Payment::new(
            application.id,
            declaration.payment_method,
            declaration.transaction_id.trim(),
            declaration.amount,
            declaration
                .payment_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        );
        application.record_payment(payment.id)?;

        self.payments.record(&payment, application.status).await?;

        info!(
            payment_id = %payment.id,
            amount = %payment.amount,
            method = %payment.method,
            "payment declared"
        );

        let notification = Notification::new(
            NotificationKind::PaymentDeclared,
            "Payment awaiting verification",
            format!(
                "A {} payment of {} was declared for application {}",
                payment.method, payment.amount, application.reference
            ),
            Some(application.reference.to_string()),
            Some(payment.id),
        );
        if let Err(e) = self.channel.notify(notification).await {
            warn!(error = %e, "failed to record payment notification");
        }

        Ok(payment)
    }

    /// Applies an admin verification verdict to a payment.
    ///
    /// The payment's status and the application's status move together:
    /// verification sends the application to `payment_verified`, rejection
    /// to `rejected`. Repeating the same verdict is a no-op.
    #[instrument(skip(self))]
    pub async fn verify_payment(
        &self,
        payment_id: PaymentId,
        verified: bool,
    ) -> Result<Payment, PaymentError> {
        let mut payment = self.payments.get(payment_id).await?;
        let mut application = self.applications.get(payment.application_id).await?;

        let (payment_status, event) = if verified {
            (PaymentStatus::Verified, ApplicationEvent::PaymentVerified)
        } else {
            (PaymentStatus::Rejected, ApplicationEvent::PaymentRejected)
        };

        // A repeated verdict is a no-op, even after the application has
        // moved on to a later status.
        if payment.status == payment_status {
            return Ok(payment);
        }

        // Reconcile the application first so an invalid transition fails
        // before anything is written.
        let changed = application.apply(event)?;

        self.payments.set_status(payment.id, payment_status).await?;
        payment.status = payment_status;
        if changed {
            self.applications
                .update_status(application.id, application.status, None)
                .await?;
        }

        info!(
            payment_id = %payment.id,
            verified,
            application_status = %application.status,
            "payment verification applied"
        );
        Ok(payment)
    }

    /// Fetches a payment by id.
    pub async fn get(&self, payment_id: PaymentId) -> Result<Payment, PaymentError> {
        Ok(self.payments.get(payment_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn declaration(amount: Decimal) -> PaymentDeclaration {
        PaymentDeclaration {
            application_id: "SA-1719849600000-0042".to_string(),
            payment_method: PaymentMethod::BankTransfer,
            transaction_id: "TXN-0001".to_string(),
            amount,
            payment_date: Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
        }
    }

    #[test]
    fn test_declaration_without_payment_date_is_valid() {
        let mut d = declaration(dec!(5000));
        d.payment_date = None;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_minimum_amount_is_inclusive() {
        assert!(declaration(dec!(5000)).validate().is_ok());
        assert!(declaration(dec!(4999.99)).validate().is_err());
    }

    #[test]
    fn test_blank_transaction_id_rejected() {
        let mut d = declaration(dec!(5000));
        d.transaction_id = "  ".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_blank_reference_rejected() {
        let mut d = declaration(dec!(5000));
        d.application_id = String::new();
        assert!(d.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_amounts_below_minimum_are_rejected(cents in 0u64..500_000) {
            let amount = Decimal::new(cents as i64, 2);
            prop_assert!(declaration(amount).validate().is_err());
        }

        #[test]
        fn prop_amounts_at_or_above_minimum_pass(units in 5_000u64..10_000_000) {
            let amount = Decimal::from(units);
            prop_assert!(declaration(amount).validate().is_ok());
        }
    }
}
