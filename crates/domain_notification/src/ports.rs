//! Storage port for notifications

use async_trait::async_trait;
use core_kernel::{CoreError, NotificationId};

use crate::notification::Notification;

/// Persistence operations for notifications
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<(), CoreError>;

    /// Lists notifications, newest first.
    async fn list(&self) -> Result<Vec<Notification>, CoreError>;

    /// Marks one notification as read.
    ///
    /// Fails with [`CoreError::NotFound`] when the id is unknown; marking an
    /// already-read notification succeeds without change.
    async fn mark_read(&self, id: NotificationId) -> Result<(), CoreError>;

    /// Marks every notification as read, returning how many were unread.
    async fn mark_all_read(&self) -> Result<u64, CoreError>;

    async fn unread_count(&self) -> Result<u64, CoreError>;
}
