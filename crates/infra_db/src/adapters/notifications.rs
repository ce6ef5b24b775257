//! PostgreSQL notification store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use core_kernel::{CoreError, NotificationId, PaymentId};
use domain_notification::{Notification, NotificationKind, NotificationStore};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of the notification store port
#[derive(Debug, Clone)]
pub struct PostgresNotificationStore {
    pool: PgPool,
}

impl PostgresNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub application_reference: Option<String>,
    pub payment_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DatabaseError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = match row.kind.as_str() {
            "payment_declared" => NotificationKind::PaymentDeclared,
            "status_changed" => NotificationKind::StatusChanged,
            other => {
                return Err(DatabaseError::QueryFailed(format!(
                    "unknown notification kind '{}'",
                    other
                )))
            }
        };
        Ok(Notification {
            id: NotificationId::from(row.id),
            kind,
            title: row.title,
            message: row.message,
            application_reference: row.application_reference,
            payment_id: row.payment_id.map(PaymentId::from),
            read: row.is_read,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl NotificationStore for PostgresNotificationStore {
    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn insert(&self, notification: &Notification) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, kind, title, message, application_reference, payment_id,
                is_read, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.application_reference)
        .bind(notification.payment_id.map(|id| *id.as_uuid()))
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Notification>, CoreError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT id, kind, title, message, application_reference, payment_id,
                   is_read, created_at
            FROM notifications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        rows.into_iter()
            .map(|row| Notification::try_from(row).map_err(CoreError::from))
            .collect()
    }

    #[instrument(skip(self), fields(notification_id = %id))]
    async fn mark_read(&self, id: NotificationId) -> Result<(), CoreError> {
        // Postgres reports a row as affected even when is_read was already
        // true, so zero rows means the id does not exist.
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Notification", id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self) -> Result<u64, CoreError> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE is_read = FALSE")
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self) -> Result<u64, CoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE is_read = FALSE")
                .fetch_one(&self.pool)
                .await
                .map_err(DatabaseError::from)?;

        Ok(count as u64)
    }
}
