//! Payment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use domain_payment::PaymentDeclaration;

use crate::dto::payments::{PaymentResponse, VerifyPaymentRequest};
use crate::error::{ApiError, JsonBody};
use crate::AppState;

/// Declares an out-of-band payment against an application
pub async fn declare_payment(
    State(state): State<AppState>,
    JsonBody(declaration): JsonBody<PaymentDeclaration>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let payment = state.ledger.confirm_payment(declaration).await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

/// Applies an admin verification verdict to an application's latest payment
pub async fn verify_payment(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    JsonBody(request): JsonBody<VerifyPaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let application = state.registry.get_by_reference(&reference).await?;
    let payment_id = application.payment_id.ok_or_else(|| {
        ApiError::NotFound(format!(
            "Application '{}' has no payment to verify",
            reference
        ))
    })?;

    let payment = state
        .ledger
        .verify_payment(payment_id, request.verified)
        .await?;
    Ok(Json(payment.into()))
}
