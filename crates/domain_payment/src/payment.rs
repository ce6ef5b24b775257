//! Payment declaration entity

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{ApplicationId, PaymentId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PaymentError;

/// Minimum accepted payment amount, in the municipality's currency
pub const MIN_PAYMENT_AMOUNT: Decimal = dec!(5000);

/// How the citizen paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    BankTransfer,
    MobileWallet,
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank-transfer",
            PaymentMethod::MobileWallet => "mobile-wallet",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank-transfer" => Ok(PaymentMethod::BankTransfer),
            "mobile-wallet" => Ok(PaymentMethod::MobileWallet),
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            _ => Err(PaymentError::validation(format!(
                "paymentMethod '{}' is not a recognised method",
                s
            ))),
        }
    }
}

/// Verification state of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    PendingVerification,
    Verified,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::PendingVerification => "pending_verification",
            PaymentStatus::Verified => "verified",
            PaymentStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_verification" => Ok(PaymentStatus::PendingVerification),
            "verified" => Ok(PaymentStatus::Verified),
            "rejected" => Ok(PaymentStatus::Rejected),
            _ => Err(PaymentError::validation(format!(
                "status '{}' is not a valid payment status",
                s
            ))),
        }
    }
}

/// A declared out-of-band payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub application_id: ApplicationId,
    pub method: PaymentMethod,
    /// The citizen's bank or wallet transaction reference
    pub transaction_id: String,
    pub amount: Decimal,
    pub status: PaymentStatus,
    /// The date the citizen says they paid
    pub payment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a declaration awaiting verification.
    pub fn new(
        application_id: ApplicationId,
        method: PaymentMethod,
        transaction_id: impl Into<String>,
        amount: Decimal,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            application_id,
            method,
            transaction_id: transaction_id.into(),
            amount,
            status: PaymentStatus::PendingVerification,
            payment_date,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payment_awaits_verification() {
        let payment = Payment::new(
            ApplicationId::new_v7(),
            PaymentMethod::BankTransfer,
            "TXN-0001",
            dec!(5000),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        );
        assert_eq!(payment.status, PaymentStatus::PendingVerification);
    }

    #[test]
    fn test_method_string_roundtrip() {
        for method in [
            PaymentMethod::BankTransfer,
            PaymentMethod::MobileWallet,
            PaymentMethod::Cash,
            PaymentMethod::Card,
        ] {
            let parsed: PaymentMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
