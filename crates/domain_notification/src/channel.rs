//! Notification channel
//!
//! Thin service over the store. Emission is best-effort from the caller's
//! point of view; read operations surface storage errors normally.

use std::sync::Arc;

use core_kernel::NotificationId;
use tracing::{debug, info};

use crate::error::NotificationError;
use crate::notification::Notification;
use crate::ports::NotificationStore;

pub struct NotificationChannel {
    store: Arc<dyn NotificationStore>,
}

impl NotificationChannel {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Records a notification for the admin feed.
    pub async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        self.store.insert(&notification).await?;
        debug!(
            id = %notification.id,
            kind = %notification.kind,
            "notification recorded"
        );
        Ok(())
    }

    /// Lists notifications, newest first.
    pub async fn list(&self) -> Result<Vec<Notification>, NotificationError> {
        Ok(self.store.list().await?)
    }

    pub async fn unread_count(&self) -> Result<u64, NotificationError> {
        Ok(self.store.unread_count().await?)
    }

    /// Marks one notification as read. Idempotent for already-read ones.
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), NotificationError> {
        self.store.mark_read(id).await?;
        Ok(())
    }

    /// Marks every notification as read.
    pub async fn mark_all_read(&self) -> Result<u64, NotificationError> {
        let marked = self.store.mark_all_read().await?;
        if marked > 0 {
            info!(marked, "notifications marked as read");
        }
        Ok(marked)
    }
}
