//! PostgreSQL application store
//!
//! Implements the application domain's store port. Rows carry the status and
//! service type as text; parsing happens at the row boundary so the rest of
//! the system only sees domain types.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{ApplicationId, ApplicationReference, CoreError, PaymentId};
use domain_application::{Application, ApplicationStatus, ApplicationStore, DocumentMeta};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of the application store port
#[derive(Debug, Clone)]
pub struct PostgresApplicationStore {
    pool: PgPool,
}

impl PostgresApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub reference: String,
    pub service_type: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub ward_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub additional_info: Option<String>,
    pub documents: serde_json::Value,
    pub status: String,
    pub payment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = DatabaseError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let documents: Vec<DocumentMeta> = serde_json::from_value(row.documents)
            .map_err(|e| DatabaseError::QueryFailed(format!("bad documents column: {}", e)))?;
        Ok(Application {
            id: ApplicationId::from(row.id),
            reference: row
                .reference
                .parse::<ApplicationReference>()
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?,
            service_type: row
                .service_type
                .parse()
                .map_err(|e: domain_application::ApplicationError| {
                    DatabaseError::QueryFailed(e.to_string())
                })?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            ward_number: row.ward_number,
            date_of_birth: row.date_of_birth,
            purpose: row.purpose,
            additional_info: row.additional_info,
            documents,
            status: row
                .status
                .parse()
                .map_err(|e: domain_application::ApplicationError| {
                    DatabaseError::QueryFailed(e.to_string())
                })?,
            payment_id: row.payment_id.map(PaymentId::from),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, reference, service_type, first_name, last_name, email, phone, \
     address, ward_number, date_of_birth, purpose, additional_info, documents, status, \
     payment_id, created_at, updated_at";

#[async_trait]
impl ApplicationStore for PostgresApplicationStore {
    #[instrument(skip(self, application), fields(reference = %application.reference))]
    async fn insert(&self, application: &Application) -> Result<(), CoreError> {
        debug!("inserting application");

        let documents = serde_json::to_value(&application.documents)
            .map_err(|e| CoreError::store(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO applications (
                id, reference, service_type, first_name, last_name, email, phone,
                address, ward_number, date_of_birth, purpose, additional_info,
                documents, status, payment_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(application.id.as_uuid())
        .bind(application.reference.as_str())
        .bind(application.service_type.as_str())
        .bind(&application.first_name)
        .bind(&application.last_name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.address)
        .bind(&application.ward_number)
        .bind(application.date_of_birth)
        .bind(&application.purpose)
        .bind(&application.additional_info)
        .bind(documents)
        .bind(application.status.as_str())
        .bind(application.payment_id.map(Uuid::from))
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self), fields(application_id = %id))]
    async fn get(&self, id: ApplicationId) -> Result<Application, CoreError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let row = row.ok_or_else(|| CoreError::not_found("Application", id))?;
        Ok(Application::try_from(row).map_err(CoreError::from)?)
    }

    #[instrument(skip(self))]
    async fn get_by_reference(&self, reference: &str) -> Result<Application, CoreError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM applications WHERE reference = $1",
            SELECT_COLUMNS
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        let row = row.ok_or_else(|| CoreError::not_found("Application", reference))?;
        Ok(Application::try_from(row).map_err(CoreError::from)?)
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<ApplicationStatus>) -> Result<Vec<Application>, CoreError> {
        let rows: Vec<ApplicationRow> = match status {
            Some(status) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM applications WHERE status = $1 ORDER BY created_at DESC",
                    SELECT_COLUMNS
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM applications ORDER BY created_at DESC",
                    SELECT_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(DatabaseError::from)?;

        rows.into_iter()
            .map(|row| Application::try_from(row).map_err(CoreError::from))
            .collect()
    }

    #[instrument(skip(self), fields(application_id = %id, status = %status))]
    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        payment_id: Option<PaymentId>,
    ) -> Result<(), CoreError> {
        let result = sqlx::query(
            r#"
            UPDATE applications
            SET status = $2,
                payment_id = COALESCE($3, payment_id),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(payment_id.map(Uuid::from))
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found("Application", id));
        }
        Ok(())
    }
}
