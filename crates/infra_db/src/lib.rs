//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the civic services
//! core, implementing the domain store ports using SQLx.
//!
//! # Architecture
//!
//! Each domain defines a store trait (a port); this crate supplies the
//! Postgres adapter for each one. Queries are built at runtime so the
//! workspace compiles without a live database; the schema lives in
//! `migrations/` and is applied with `sqlx::migrate!`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PostgresApplicationStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/civic")).await?;
//! let store = PostgresApplicationStore::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;

pub use adapters::{PostgresApplicationStore, PostgresNotificationStore, PostgresPaymentStore};
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
