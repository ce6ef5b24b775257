//! PostgreSQL adapters for the domain store ports

pub mod applications;
pub mod notifications;
pub mod payments;

pub use applications::PostgresApplicationStore;
pub use notifications::PostgresNotificationStore;
pub use payments::PostgresPaymentStore;
