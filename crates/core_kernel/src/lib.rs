//! Core Kernel - Foundational types for the civic services system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for applications, payments, and notifications
//! - The human-shareable application reference used as a payment reference
//! - The common error taxonomy shared by store ports and domain services

pub mod error;
pub mod identifiers;
pub mod reference;

pub use error::CoreError;
pub use identifiers::{ApplicationId, NotificationId, PaymentId};
pub use reference::ApplicationReference;
