//! HTTP request handlers

pub mod applications;
pub mod health;
pub mod notifications;
pub mod payments;
