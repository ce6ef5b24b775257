//! Notification DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use domain_notification::Notification;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub application_reference: Option<String>,
    pub payment_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.to_string(),
            title: notification.title,
            message: notification.message,
            application_reference: notification.application_reference,
            payment_id: notification.payment_id.map(|id| id.to_string()),
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: u64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub marked: u64,
}
