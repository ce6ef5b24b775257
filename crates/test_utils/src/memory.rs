//! In-memory store
//!
//! One store backs all three persistence ports so that a payment record and
//! its application status update can happen under a single lock, mirroring
//! the transactional behaviour of the Postgres adapters.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use core_kernel::{ApplicationId, CoreError, NotificationId, PaymentId};
use domain_application::{Application, ApplicationStatus, ApplicationStore};
use domain_notification::{Notification, NotificationStore};
use domain_payment::{Payment, PaymentStatus, PaymentStore};

/// In-memory implementation of the application, payment, and notification
/// stores
#[derive(Default)]
pub struct InMemoryStore {
    applications: RwLock<HashMap<ApplicationId, Application>>,
    payments: RwLock<HashMap<PaymentId, Payment>>,
    notifications: RwLock<HashMap<NotificationId, Notification>>,
    conflict_on_next_insert: AtomicBool,
    fail_notifications: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next application insert fail with a reference conflict.
    pub fn conflict_on_next_insert(&self) {
        self.conflict_on_next_insert.store(true, Ordering::SeqCst);
    }

    /// Makes notification writes fail until cleared.
    pub fn fail_notifications(&self, fail: bool) {
        self.fail_notifications.store(fail, Ordering::SeqCst);
    }

    pub fn application_count(&self) -> usize {
        self.applications.read().unwrap().len()
    }

    pub fn payment_count(&self) -> usize {
        self.payments.read().unwrap().len()
    }
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn insert(&self, application: &Application) -> Result<(), CoreError> {
        if self.conflict_on_next_insert.swap(false, Ordering::SeqCst) {
            return Err(CoreError::conflict(format!(
                "application reference '{}' already exists",
                application.reference
            )));
        }
        let mut applications = self.applications.write().unwrap();
        if applications
            .values()
            .any(|a| a.reference == application.reference)
        {
            return Err(CoreError::conflict(format!(
                "application reference '{}' already exists",
                application.reference
            )));
        }
        applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn get(&self, id: ApplicationId) -> Result<Application, CoreError> {
        self.applications
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Application", id))
    }

    async fn get_by_reference(&self, reference: &str) -> Result<Application, CoreError> {
        self.applications
            .read()
            .unwrap()
            .values()
            .find(|a| a.reference.as_str() == reference)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Application", reference))
    }

    async fn list(&self, status: Option<ApplicationStatus>) -> Result<Vec<Application>, CoreError> {
        let mut applications: Vec<Application> = self
            .applications
            .read()
            .unwrap()
            .values()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        payment_id: Option<PaymentId>,
    ) -> Result<(), CoreError> {
        let mut applications = self.applications.write().unwrap();
        let application = applications
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("Application", id))?;
        application.status = status;
        if payment_id.is_some() {
            application.payment_id = payment_id;
        }
        application.updated_at = chrono::Utc::now();
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn record(
        &self,
        payment: &Payment,
        application_status: ApplicationStatus,
    ) -> Result<(), CoreError> {
        // Both maps are updated under the applications lock so neither side
        // is ever visible without the other.
        let mut applications = self.applications.write().unwrap();
        let application = applications
            .get_mut(&payment.application_id)
            .ok_or_else(|| CoreError::not_found("Application", payment.application_id))?;

        self.payments
            .write()
            .unwrap()
            .insert(payment.id, payment.clone());
        application.status = application_status;
        application.payment_id = Some(payment.id);
        application.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn get(&self, id: PaymentId) -> Result<Payment, CoreError> {
        self.payments
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Payment", id))
    }

    async fn set_status(&self, id: PaymentId, status: PaymentStatus) -> Result<(), CoreError> {
        let mut payments = self.payments.write().unwrap();
        let payment = payments
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("Payment", id))?;
        payment.status = status;
        Ok(())
    }

    async fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<Payment>, CoreError> {
        let mut payments: Vec<Payment> = self
            .payments
            .read()
            .unwrap()
            .values()
            .filter(|p| p.application_id == application_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }
}

#[async_trait]
impl NotificationStore for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), CoreError> {
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(CoreError::store("notification store unavailable"));
        }
        self.notifications
            .write()
            .unwrap()
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Notification>, CoreError> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .read()
            .unwrap()
            .values()
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_read(&self, id: NotificationId) -> Result<(), CoreError> {
        let mut notifications = self.notifications.write().unwrap();
        let notification = notifications
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("Notification", id))?;
        notification.read = true;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<u64, CoreError> {
        let mut notifications = self.notifications.write().unwrap();
        let mut marked = 0;
        for notification in notifications.values_mut() {
            if !notification.read {
                notification.read = true;
                marked += 1;
            }
        }
        Ok(marked)
    }

    async fn unread_count(&self) -> Result<u64, CoreError> {
        Ok(self
            .notifications
            .read()
            .unwrap()
            .values()
            .filter(|n| !n.read)
            .count() as u64)
    }
}
