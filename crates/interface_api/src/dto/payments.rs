//! Payment DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_payment::Payment;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_id: String,
    pub payment_method: String,
    pub transaction_id: String,
    pub amount: Decimal,
    pub status: String,
    pub payment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            payment_id: payment.id.to_string(),
            payment_method: payment.method.to_string(),
            transaction_id: payment.transaction_id,
            amount: payment.amount,
            status: payment.status.to_string(),
            payment_date: payment.payment_date,
            created_at: payment.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub verified: bool,
}
