//! Application handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use domain_application::{ApplicationStatus, Intake};

use crate::dto::applications::{ApplicationResponse, ListParams, UpdateStatusRequest};
use crate::error::{ApiError, JsonBody};
use crate::AppState;

/// Submits a new service application
pub async fn submit_application(
    State(state): State<AppState>,
    JsonBody(intake): JsonBody<Intake>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let application = state.registry.submit(intake).await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

/// Lists applications, optionally filtered by status
pub async fn list_applications(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let status = params
        .status
        .map(|s| s.parse::<ApplicationStatus>())
        .transpose()?;
    let applications = state.registry.list(status).await?;
    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

/// Gets an application by its public reference
pub async fn get_application(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = state.registry.get_by_reference(&reference).await?;
    Ok(Json(application.into()))
}

/// Sets an application's status from an admin action
pub async fn update_status(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let status: ApplicationStatus = request.status.parse()?;
    let application = state.registry.set_status(&reference, status).await?;
    Ok(Json(application.into()))
}
