//! HTTP API Layer
//!
//! This crate provides the REST API for the civic services core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for applications, payments, notifications
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Citizen-facing routes (submission and payment declaration) are public;
//! everything that reads or mutates back-office state requires an admin JWT.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(registry, ledger, channel, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_application::ApplicationRegistry;
use domain_notification::NotificationChannel;
use domain_payment::PaymentLedger;

use crate::config::ApiConfig;
use crate::handlers::{applications, health, notifications, payments};
use crate::middleware::{admin_auth_middleware, audit_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ApplicationRegistry>,
    pub ledger: Arc<PaymentLedger>,
    pub channel: Arc<NotificationChannel>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        registry: Arc<ApplicationRegistry>,
        ledger: Arc<PaymentLedger>,
        channel: Arc<NotificationChannel>,
        config: ApiConfig,
    ) -> Self {
        Self {
            registry,
            ledger,
            channel,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/service-applications", post(applications::submit_application))
        .route(
            "/service-applications/payments",
            post(payments::declare_payment),
        );

    // Back-office routes for applications
    let admin_application_routes = Router::new()
        .route("/service-applications", get(applications::list_applications))
        .route(
            "/service-applications/:reference",
            get(applications::get_application),
        )
        .route(
            "/service-applications/:reference/status",
            put(applications::update_status),
        )
        .route(
            "/service-applications/:reference/payment/verify",
            put(payments::verify_payment),
        );

    // Back-office notification feed
    let admin_notification_routes = Router::new()
        .route("/admin/notifications", get(notifications::list_notifications))
        .route(
            "/admin/notifications/read-all",
            put(notifications::mark_all_read),
        )
        .route("/admin/notifications/:id/read", put(notifications::mark_read));

    let admin_routes = Router::new()
        .merge(admin_application_routes)
        .merge(admin_notification_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
