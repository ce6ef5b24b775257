//! PostgreSQL payment store
//!
//! The payment insert and the application status update are committed in a
//! single transaction so a declared payment is never visible without its
//! status change, and vice versa.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{ApplicationId, CoreError, PaymentId};
use domain_application::ApplicationStatus;
use domain_payment::{Payment, PaymentStatus, PaymentStore};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of the payment store port
#[derive(Debug, Clone)]
pub struct PostgresPaymentStore {
    pool: PgPool,
}

impl PostgresPaymentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct PaymentRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub method: String,
    pub transaction_id: String,
    pub amount: Decimal,
    pub status: String,
    pub payment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DatabaseError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from(row.id),
            application_id: ApplicationId::from(row.application_id),
            method: row
                .method
                .parse()
                .map_err(|e: domain_payment::PaymentError| {
                    DatabaseError::QueryFailed(e.to_string())
                })?,
            transaction_id: row.transaction_id,
            amount: row.amount,
            status: row
                .status
                .parse()
                .map_err(|e: domain_payment::PaymentError| {
                    DatabaseError::QueryFailed(e.to_string())
                })?,
            payment_date: row.payment_date,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, application_id, method, transaction_id, amount, status, payment_date, created_at";

#[async_trait]
impl PaymentStore for PostgresPaymentStore {
    #[instrument(skip(self, payment), fields(payment_id = %payment.id))]
    async fn record(
        &self,
        payment: &Payment,
        application_status: ApplicationStatus,
    ) -> Result<(), CoreError> {
        debug!("recording payment");

        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, application_id, method, transaction_id, amount, status,
                payment_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.application_id.as_uuid())
        .bind(payment.method.as_str())
        .bind(&payment.transaction_id)
        .bind(payment.amount)
        .bind(payment.status.as_str())
        .bind(payment.payment_date)
        .bind(payment.created_at)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let result = sqlx::query(
            r#"
            UPDATE applications
            SET status = $2, payment_id = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(payment.application_id.as_uuid())
        .bind(application_status.as_str())
        .bind(payment.id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(DatabaseError::from)?;
            return Err(CoreError::not_found("Application", payment.application_id));
        }

        tx.commit().await.map_err(DatabaseError::from)?;
        Ok(())
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    async fn get(&self, id: PaymentId) -> Result<Payment, CoreError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let row = row.ok_or_else(|| CoreError::not_found("Payment", id))?;
        Ok(Payment::try_from(row).map_err(CoreError::from)?)
    }

    #[instrument(skip(self), fields(payment_id = %id, status = %status))]
    async fn set_status(&self, id: PaymentId, status: PaymentStatus) -> Result<(), CoreError> {
        let result = sqlx::query("UPDATE payments SET status = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Payment", id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(application_id = %application_id))]
    async fn find_by_application(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<Payment>, CoreError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE application_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(application_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        rows.into_iter()
            .map(|row| Payment::try_from(row).map_err(CoreError::from))
            .collect()
    }
}
