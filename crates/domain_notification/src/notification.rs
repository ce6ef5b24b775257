//! Notification entity

use chrono::{DateTime, Utc};
use core_kernel::{NotificationId, PaymentId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A payment was declared and awaits verification
    PaymentDeclared,
    /// An application changed status
    StatusChanged,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PaymentDeclared => "payment_declared",
            NotificationKind::StatusChanged => "status_changed",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An alert for back-office staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// The application reference the notification concerns
    pub application_reference: Option<String>,
    /// Deep link to the payment awaiting verification, when there is one
    pub payment_id: Option<PaymentId>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        application_reference: Option<String>,
        payment_id: Option<PaymentId>,
    ) -> Self {
        Self {
            id: NotificationId::new_v7(),
            kind,
            title: title.into(),
            message: message.into(),
            application_reference,
            payment_id,
            read: false,
            created_at: Utc::now(),
        }
    }
}
