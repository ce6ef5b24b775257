//! Request and response data transfer objects

pub mod applications;
pub mod notifications;
pub mod payments;
