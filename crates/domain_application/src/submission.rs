//! Client-side submission flow
//!
//! Models the form a citizen fills in and the controller that dispatches it
//! to a backend. The controller guards against duplicate dispatch while a
//! submission is in flight and never fabricates a success result.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{DocumentMeta, ServiceType};
use crate::intake::Intake;

/// Errors surfaced to the citizen during submission
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// A submission is already being dispatched
    #[error("A submission is already in progress")]
    AlreadyInFlight,

    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend refused or failed the submission
    #[error("Submission failed: {0}")]
    Backend(String),
}

/// Acknowledgement returned by a successful submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// The reference the citizen quotes when paying
    pub application_id: String,
}

/// Wire payload sent to the backend
///
/// `date_of_birth` is always present, serialised as an explicit null when
/// absent, so the backend sees the field rather than a missing key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
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
}

/// Transport the controller dispatches through
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Form state accumulated while the citizen fills in the application
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    intake: Intake,
}

impl SubmissionForm {
    pub fn new(service_type: ServiceType) -> Self {
        Self {
            intake: Intake {
                service_type,
                first_name: String::new(),
                last_name: String::new(),
                email: String::new(),
                phone: String::new(),
                address: String::new(),
                ward_number: String::new(),
                date_of_birth: None,
                purpose: None,
                additional_info: None,
                documents: Vec::new(),
            },
        }
    }

    /// Switches the requested service.
    ///
    /// Moving away from a birth-related service clears any date of birth
    /// already entered, so a stale value is never submitted.
    pub fn set_service_type(&mut self, service_type: ServiceType) {
        self.intake.service_type = service_type;
        if !service_type.is_birth_related() {
            self.intake.date_of_birth = None;
        }
    }

    pub fn intake(&self) -> &Intake {
        &self.intake
    }

    pub fn intake_mut(&mut self) -> &mut Intake {
        &mut self.intake
    }

    fn to_payload(&self) -> SubmissionPayload {
        let intake = &self.intake;
        SubmissionPayload {
            service_type: intake.service_type,
            first_name: intake.first_name.trim().to_string(),
            last_name: intake.last_name.trim().to_string(),
            email: intake.email.trim().to_string(),
            phone: intake.phone.trim().to_string(),
            address: intake.address.trim().to_string(),
            ward_number: intake.ward_number.trim().to_string(),
            date_of_birth: if intake.service_type.is_birth_related() {
                intake.date_of_birth
            } else {
                None
            },
            purpose: intake.purpose.clone().filter(|p| !p.trim().is_empty()),
            additional_info: intake
                .additional_info
                .clone()
                .filter(|i| !i.trim().is_empty()),
            documents: intake.documents.clone(),
        }
    }
}

/// Dispatches submissions and rejects concurrent duplicates
pub struct SubmissionController<B: SubmissionBackend> {
    backend: B,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<B: SubmissionBackend> SubmissionController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validates the form and dispatches it.
    ///
    /// Fails fast with [`SubmissionError::AlreadyInFlight`] when a previous
    /// dispatch has not completed. Backend failures are returned as-is; the
    /// caller decides how to present them.
    pub async fn submit(&self, form: &SubmissionForm) -> Result<SubmissionReceipt, SubmissionError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmissionError::AlreadyInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        form.intake()
            .validate()
            .map_err(|e| SubmissionError::Validation(e.to_string()))?;

        self.backend.submit(&form.to_payload()).await
    }
}
