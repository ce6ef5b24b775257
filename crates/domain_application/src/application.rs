//! Application aggregate and status state machine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ApplicationId, ApplicationReference, PaymentId};

use crate::error::ApplicationError;
use crate::intake::Intake;

/// Municipal service a citizen can apply for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    BirthCertificate,
    LocalOrigin,
    BusinessPermit,
    MarriageCertificate,
    DeathCertificate,
    LandOwnership,
    Other,
}

impl ServiceType {
    /// Service types that require the applicant's date of birth.
    pub fn is_birth_related(&self) -> bool {
        matches!(self, ServiceType::BirthCertificate | ServiceType::LocalOrigin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::BirthCertificate => "birth-certificate",
            ServiceType::LocalOrigin => "local-origin",
            ServiceType::BusinessPermit => "business-permit",
            ServiceType::MarriageCertificate => "marriage-certificate",
            ServiceType::DeathCertificate => "death-certificate",
            ServiceType::LandOwnership => "land-ownership",
            ServiceType::Other => "other",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birth-certificate" => Ok(ServiceType::BirthCertificate),
            "local-origin" => Ok(ServiceType::LocalOrigin),
            "business-permit" => Ok(ServiceType::BusinessPermit),
            "marriage-certificate" => Ok(ServiceType::MarriageCertificate),
            "death-certificate" => Ok(ServiceType::DeathCertificate),
            "land-ownership" => Ok(ServiceType::LandOwnership),
            "other" => Ok(ServiceType::Other),
            _ => Err(ApplicationError::validation(format!(
                "serviceType '{}' is not a recognised service",
                s
            ))),
        }
    }
}

/// Application status
///
/// The lifecycle runs `pending_payment -> payment_pending -> payment_verified
/// -> in_review -> approved`, with `rejected` reachable from
/// `payment_pending` (payment rejected) or `in_review` (admin rejection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Created, waiting for the citizen to declare a payment
    PendingPayment,
    /// A payment was declared and awaits admin verification
    PaymentPending,
    /// Admin verified the payment
    PaymentVerified,
    /// Under admin review
    InReview,
    /// Approved (terminal)
    Approved,
    /// Rejected (terminal)
    Rejected,
}

impl ApplicationStatus {
    /// Terminal statuses cannot be left through system events.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }

    /// Checks if a system-driven transition is valid
    pub fn can_transition_to(&self, target: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, target),
            // P1: a payment declaration moves any non-terminal application
            (PendingPayment, PaymentPending) |
            (PaymentVerified, PaymentPending) |
            (InReview, PaymentPending) |
            // P2 / P3: admin verifies or rejects the payment
            (PaymentPending, PaymentVerified) |
            (PaymentPending, Rejected) |
            // A1: admin moves to review
            (PaymentVerified, InReview) |
            // A2 / A3: admin approves or rejects
            (InReview, Approved) |
            (InReview, Rejected)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::PendingPayment => "pending_payment",
            ApplicationStatus::PaymentPending => "payment_pending",
            ApplicationStatus::PaymentVerified => "payment_verified",
            ApplicationStatus::InReview => "in_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_payment" => Ok(ApplicationStatus::PendingPayment),
            "payment_pending" => Ok(ApplicationStatus::PaymentPending),
            "payment_verified" => Ok(ApplicationStatus::PaymentVerified),
            "in_review" => Ok(ApplicationStatus::InReview),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(ApplicationError::validation(format!(
                "status '{}' is not a valid application status",
                s
            ))),
        }
    }
}

/// Events the reconciler maps onto status transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationEvent {
    /// A payment was declared against the application (P1)
    PaymentConfirmed,
    /// Admin verified the latest payment (P2)
    PaymentVerified,
    /// Admin rejected the latest payment (P3)
    PaymentRejected,
    /// Admin moved the application to review (A1)
    MovedToReview,
    /// Admin approved the application (A2)
    Approved,
    /// Admin rejected the application (A3)
    Rejected,
}

impl ApplicationEvent {
    /// The status this event drives an application towards.
    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            ApplicationEvent::PaymentConfirmed => ApplicationStatus::PaymentPending,
            ApplicationEvent::PaymentVerified => ApplicationStatus::PaymentVerified,
            ApplicationEvent::PaymentRejected => ApplicationStatus::Rejected,
            ApplicationEvent::MovedToReview => ApplicationStatus::InReview,
            ApplicationEvent::Approved => ApplicationStatus::Approved,
            ApplicationEvent::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// Metadata for an uploaded supporting document
///
/// The core stores metadata only; file bytes live in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// A citizen's request for a municipal service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Internal identifier
    pub id: ApplicationId,
    /// Human-shareable reference, quoted as the payment reference
    pub reference: ApplicationReference,
    /// Requested service
    pub service_type: ServiceType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub ward_number: String,
    /// Present only for birth-related service types
    pub date_of_birth: Option<NaiveDate>,
    pub purpose: Option<String>,
    pub additional_info: Option<String>,
    /// Supporting document metadata
    pub documents: Vec<DocumentMeta>,
    /// Lifecycle status, mutated only through the reconciler or admin action
    pub status: ApplicationStatus,
    /// Weak reference to the most recent payment
    pub payment_id: Option<PaymentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Creates a new application from validated intake data.
    ///
    /// Strings are trimmed, the date of birth is kept only for birth-related
    /// service types, and the status starts at `pending_payment`.
    pub fn from_intake(intake: Intake) -> Self {
        let now = Utc::now();
        let date_of_birth = if intake.service_type.is_birth_related() {
            intake.date_of_birth
        } else {
            None
        };

        Self {
            id: ApplicationId::new_v7(),
            reference: ApplicationReference::generate(),
            service_type: intake.service_type,
            first_name: intake.first_name.trim().to_string(),
            last_name: intake.last_name.trim().to_string(),
            email: intake.email.trim().to_string(),
            phone: intake.phone.trim().to_string(),
            address: intake.address.trim().to_string(),
            ward_number: intake.ward_number.trim().to_string(),
            date_of_birth,
            purpose: intake.purpose.filter(|p| !p.trim().is_empty()),
            additional_info: intake.additional_info.filter(|i| !i.trim().is_empty()),
            documents: intake.documents,
            status: ApplicationStatus::PendingPayment,
            payment_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the reference after a uniqueness conflict.
    pub fn regenerate_reference(&mut self) {
        self.reference = ApplicationReference::generate();
    }

    /// Applies a reconciler event.
    ///
    /// Returns `Ok(true)` when the status changed, `Ok(false)` when the
    /// application is already at the event's target (a repeated admin
    /// action, treated as a no-op), and an error for an invalid transition.
    pub fn apply(&mut self, event: ApplicationEvent) -> Result<bool, ApplicationError> {
        let target = event.target_status();
        if self.status == target {
            return Ok(false);
        }
        if !self.status.can_transition_to(target) {
            return Err(ApplicationError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(true)
    }

    /// Records a declared payment (P1) and remembers it as the latest one.
    pub fn record_payment(&mut self, payment_id: PaymentId) -> Result<(), ApplicationError> {
        self.apply(ApplicationEvent::PaymentConfirmed)?;
        self.payment_id = Some(payment_id);
        Ok(())
    }

    /// Sets the status from an admin action.
    ///
    /// Follows the transition graph when it allows the move, otherwise
    /// falls back to the administrative override. `pending_payment` is
    /// creation-only and cannot be set explicitly.
    pub fn admin_set_status(&mut self, target: ApplicationStatus) -> Result<(), ApplicationError> {
        if target == ApplicationStatus::PendingPayment {
            return Err(ApplicationError::validation(
                "status 'pending_payment' is assigned at creation and cannot be set",
            ));
        }
        if self.status == target {
            return Ok(());
        }
        if !self.status.can_transition_to(target) {
            tracing::warn!(
                from = %self.status,
                to = %target,
                reference = %self.reference,
                "administrative status override outside the transition graph"
            );
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }
}
