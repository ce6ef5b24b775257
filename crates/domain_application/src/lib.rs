//! Service Application Domain
//!
//! This crate owns the service-application lifecycle:
//! - The [`Application`](application::Application) aggregate and its status
//!   state machine (the reconciler mapping payment/admin events to statuses)
//! - Intake validation, including the conditional date-of-birth rule for
//!   birth-related service types
//! - The [`ApplicationRegistry`](registry::ApplicationRegistry) service that
//!   issues unique application references
//! - The client-side submission flow with its in-flight duplicate guard

pub mod application;
pub mod error;
pub mod intake;
pub mod ports;
pub mod registry;
pub mod submission;

pub use application::{
    Application, ApplicationEvent, ApplicationStatus, DocumentMeta, ServiceType,
};
pub use error::ApplicationError;
pub use intake::Intake;
pub use ports::ApplicationStore;
pub use registry::ApplicationRegistry;
pub use submission::{
    SubmissionBackend, SubmissionController, SubmissionError, SubmissionForm, SubmissionPayload,
    SubmissionReceipt,
};
