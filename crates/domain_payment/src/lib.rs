//! Payment Domain
//!
//! Citizens pay out-of-band (bank transfer, mobile wallet, cash, card) and
//! then declare the payment against their application reference. This crate
//! owns the declaration record, the minimum-amount rule, and the ledger that
//! confirms declarations and applies admin verification verdicts.

pub mod error;
pub mod ledger;
pub mod payment;
pub mod ports;

pub use error::PaymentError;
pub use ledger::{PaymentDeclaration, PaymentLedger};
pub use payment::{Payment, PaymentMethod, PaymentStatus, MIN_PAYMENT_AMOUNT};
pub use ports::PaymentStore;
