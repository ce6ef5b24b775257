//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the civic services core test
//! suite.
//!
//! # Modules
//!
//! - `memory`: In-memory store implementing every persistence port
//! - `builders`: Builder patterns for test data construction
//! - `fixtures`: Pre-built test data for common entities

pub mod builders;
pub mod fixtures;
pub mod memory;

pub use builders::*;
pub use fixtures::*;
pub use memory::*;
