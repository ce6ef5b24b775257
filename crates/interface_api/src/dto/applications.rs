//! Application DTOs
//!
//! Requests reuse the domain intake type directly; responses expose the
//! public reference as `applicationId` and keep internal UUIDs out of the
//! citizen-facing surface.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use domain_application::{Application, DocumentMeta, ServiceType};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    /// Public reference, quoted when declaring a payment
    pub application_id: String,
    pub service_type: ServiceType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub ward_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub additional_info: Option<String>,
    pub documents: Vec<DocumentMeta>,
    pub status: String,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            application_id: application.reference.to_string(),
            service_type: application.service_type,
            first_name: application.first_name,
            last_name: application.last_name,
            email: application.email,
            phone: application.phone,
            address: application.address,
            ward_number: application.ward_number,
            date_of_birth: application.date_of_birth,
            purpose: application.purpose,
            additional_info: application.additional_info,
            documents: application.documents,
            status: application.status.to_string(),
            payment_id: application.payment_id.map(|id| id.to_string()),
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}
