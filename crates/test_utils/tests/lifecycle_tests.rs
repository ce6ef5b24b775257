//! End-to-end lifecycle tests across the application, payment, and
//! notification domains, backed by the in-memory store.

use std::sync::Arc;

use rust_decimal_macros::dec;

use domain_application::{ApplicationRegistry, ApplicationStatus};
use domain_notification::NotificationChannel;
use domain_payment::{PaymentError, PaymentLedger, PaymentStatus, PaymentStore};
use test_utils::{InMemoryStore, TestDeclarationBuilder, TestIntakeBuilder};

struct Harness {
    store: Arc<InMemoryStore>,
    registry: ApplicationRegistry,
    ledger: PaymentLedger,
    channel: Arc<NotificationChannel>,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let channel = Arc::new(NotificationChannel::new(store.clone()));
    Harness {
        registry: ApplicationRegistry::new(store.clone()),
        ledger: PaymentLedger::new(store.clone(), store.clone(), channel.clone()),
        channel,
        store,
    }
}

#[tokio::test]
async fn test_full_lifecycle_to_approval() {
    let h = harness();

    // Submit
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::PendingPayment);

    // Declare payment
    let payment = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .with_amount(dec!(7500))
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::PendingVerification);

    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::PaymentPending);
    assert_eq!(stored.payment_id, Some(payment.id));

    // Verify payment
    let verified = h.ledger.verify_payment(payment.id, true).await.unwrap();
    assert_eq!(verified.status, PaymentStatus::Verified);
    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::PaymentVerified);

    // Review and approve
    h.registry
        .set_status(application.reference.as_str(), ApplicationStatus::InReview)
        .await
        .unwrap();
    let approved = h
        .registry
        .set_status(application.reference.as_str(), ApplicationStatus::Approved)
        .await
        .unwrap();
    assert_eq!(approved.status, ApplicationStatus::Approved);
}

#[tokio::test]
async fn test_reference_conflict_is_retried_once() {
    let h = harness();
    h.store.conflict_on_next_insert();

    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();

    // The retry succeeded with a fresh reference.
    assert_eq!(h.store.application_count(), 1);
    assert!(h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_payment_against_unknown_reference_is_not_found() {
    let h = harness();
    let result = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference("SA-1719849600000-9999")
                .build(),
        )
        .await;
    assert!(matches!(result, Err(e) if e.is_not_found()));
    assert_eq!(h.store.payment_count(), 0);
}

#[tokio::test]
async fn test_underpayment_leaves_application_untouched() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();

    let result = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .with_amount(dec!(4999))
                .build(),
        )
        .await;
    assert!(matches!(result, Err(PaymentError::Validation(_))));

    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::PendingPayment);
    assert_eq!(h.store.payment_count(), 0);
}

#[tokio::test]
async fn test_payment_declaration_emits_notification() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();

    let payment = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .build(),
        )
        .await
        .unwrap();

    let notifications = h.channel.list().await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(!notifications[0].read);
    assert_eq!(
        notifications[0].application_reference.as_deref(),
        Some(application.reference.as_str())
    );
    // The notification links back to the payment awaiting verification.
    assert_eq!(notifications[0].payment_id, Some(payment.id));
    assert_eq!(h.channel.unread_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_declaration_without_payment_date_defaults_to_today() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();

    let payment = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .with_payment_date(None)
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(payment.payment_date, chrono::Utc::now().date_naive());
}

#[tokio::test]
async fn test_notification_failure_does_not_undo_payment() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();

    h.store.fail_notifications(true);
    let payment = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .build(),
        )
        .await
        .unwrap();

    // The payment and the status change survive the lost notification.
    assert_eq!(h.store.payment_count(), 1);
    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::PaymentPending);
    assert_eq!(stored.payment_id, Some(payment.id));
    assert!(h.channel.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_repeated_verification_is_idempotent() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();
    let payment = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .build(),
        )
        .await
        .unwrap();

    h.ledger.verify_payment(payment.id, true).await.unwrap();
    let second = h.ledger.verify_payment(payment.id, true).await.unwrap();
    assert_eq!(second.status, PaymentStatus::Verified);

    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::PaymentVerified);
}

#[tokio::test]
async fn test_repeated_verification_after_review_is_a_noop() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();
    let payment = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .build(),
        )
        .await
        .unwrap();

    h.ledger.verify_payment(payment.id, true).await.unwrap();
    h.registry
        .set_status(application.reference.as_str(), ApplicationStatus::InReview)
        .await
        .unwrap();

    // The verdict already stands; re-verifying must not disturb the review.
    let repeated = h.ledger.verify_payment(payment.id, true).await.unwrap();
    assert_eq!(repeated.status, PaymentStatus::Verified);

    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::InReview);
}

#[tokio::test]
async fn test_payment_rejection_rejects_application() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();
    let payment = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .build(),
        )
        .await
        .unwrap();

    let rejected = h.ledger.verify_payment(payment.id, false).await.unwrap();
    assert_eq!(rejected.status, PaymentStatus::Rejected);

    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::Rejected);

    // Terminal: a further declaration is refused.
    let result = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .build(),
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_new_payment_after_verification_returns_to_pending() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();
    let first = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .build(),
        )
        .await
        .unwrap();
    h.ledger.verify_payment(first.id, true).await.unwrap();

    let second = h
        .ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(application.reference.as_str())
                .with_transaction_id("TXN-2026-000124")
                .build(),
        )
        .await
        .unwrap();

    let stored = h
        .registry
        .get_by_reference(application.reference.as_str())
        .await
        .unwrap();
    assert_eq!(stored.status, ApplicationStatus::PaymentPending);
    assert_eq!(stored.payment_id, Some(second.id));

    let payments = PaymentStore::find_by_application(h.store.as_ref(), application.id)
        .await
        .unwrap();
    assert_eq!(payments.len(), 2);
}

#[tokio::test]
async fn test_mark_read_is_idempotent_and_mark_all_counts_unread() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();
    for transaction_id in ["TXN-A", "TXN-B"] {
        h.ledger
            .confirm_payment(
                TestDeclarationBuilder::new()
                    .for_reference(application.reference.as_str())
                    .with_transaction_id(transaction_id)
                    .build(),
            )
            .await
            .unwrap();
    }

    let notifications = h.channel.list().await.unwrap();
    assert_eq!(notifications.len(), 2);

    let first_id = notifications[0].id;
    h.channel.mark_read(first_id).await.unwrap();
    h.channel.mark_read(first_id).await.unwrap();
    assert_eq!(h.channel.unread_count().await.unwrap(), 1);

    assert_eq!(h.channel.mark_all_read().await.unwrap(), 1);
    assert_eq!(h.channel.unread_count().await.unwrap(), 0);
    assert_eq!(h.channel.mark_all_read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_mark_read_unknown_id_is_not_found() {
    let h = harness();
    let result = h
        .channel
        .mark_read(core_kernel::NotificationId::new_v7())
        .await;
    assert!(matches!(result, Err(e) if e.is_not_found()));
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let h = harness();
    let first = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();
    let second = h
        .registry
        .submit(TestIntakeBuilder::birth_certificate().build())
        .await
        .unwrap();

    h.ledger
        .confirm_payment(
            TestDeclarationBuilder::new()
                .for_reference(second.reference.as_str())
                .build(),
        )
        .await
        .unwrap();

    let pending = h
        .registry
        .list(Some(ApplicationStatus::PendingPayment))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].reference, first.reference);

    let all = h.registry.list(None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_admin_cannot_reset_to_pending_payment() {
    let h = harness();
    let application = h
        .registry
        .submit(TestIntakeBuilder::new().build())
        .await
        .unwrap();

    let result = h
        .registry
        .set_status(
            application.reference.as_str(),
            ApplicationStatus::PendingPayment,
        )
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_verifying_unknown_payment_is_not_found() {
    let h = harness();
    let result = h
        .ledger
        .verify_payment(core_kernel::PaymentId::new_v7(), true)
        .await;
    assert!(matches!(result, Err(e) if e.is_not_found()));
}

#[tokio::test]
async fn test_atomic_record_requires_existing_application() {
    let h = harness();
    let orphan = domain_payment::Payment::new(
        core_kernel::ApplicationId::new_v7(),
        domain_payment::PaymentMethod::Cash,
        "TXN-ORPHAN",
        dec!(5000),
        chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    );
    let result = PaymentStore::record(
        h.store.as_ref(),
        &orphan,
        ApplicationStatus::PaymentPending,
    )
    .await;
    assert!(result.is_err());
    assert_eq!(h.store.payment_count(), 0);
}
