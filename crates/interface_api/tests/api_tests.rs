//! HTTP surface tests against the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain_application::ApplicationRegistry;
use domain_notification::NotificationChannel;
use domain_payment::PaymentLedger;
use interface_api::auth::{create_token, roles};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::InMemoryStore;

const JWT_SECRET: &str = "test-secret";

fn test_app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let channel = Arc::new(NotificationChannel::new(store.clone()));
    let registry = Arc::new(ApplicationRegistry::new(store.clone()));
    let ledger = Arc::new(PaymentLedger::new(
        store.clone(),
        store.clone(),
        channel.clone(),
    ));

    let config = ApiConfig {
        jwt_secret: JWT_SECRET.to_string(),
        ..ApiConfig::default()
    };
    let app = create_router(AppState::new(registry, ledger, channel, config));
    (app, store)
}

fn admin_token() -> String {
    create_token("clerk-1", vec![roles::ADMIN.to_string()], JWT_SECRET, 300).unwrap()
}

fn clerk_token() -> String {
    create_token("clerk-2", vec![roles::CLERK.to_string()], JWT_SECRET, 300).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json_admin(uri: &str, body: &Value, token: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_admin(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn submission_body() -> Value {
    json!({
        "serviceType": "business-permit",
        "firstName": "Amina",
        "lastName": "Yusuf",
        "email": "amina@example.com",
        "phone": "08012345678",
        "address": "12 Market Road",
        "wardNumber": "3"
    })
}

async fn submit_application(app: &Router) -> String {
    let (status, body) = send(app, post_json("/service-applications", &submission_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["applicationId"].as_str().unwrap().to_string()
}

async fn declare_payment(app: &Router, reference: &str) -> Value {
    let body = json!({
        "applicationId": reference,
        "paymentMethod": "bank-transfer",
        "transactionId": "TXN-0001",
        "amount": dec!(7500),
        "paymentDate": "2026-01-15"
    });
    let (status, payment) =
        send(app, post_json("/service-applications/payments", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    payment
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(
        &app,
        Request::get("/health/ready").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_submission_returns_reference() {
    let (app, _) = test_app();
    let (status, body) = send(&app, post_json("/service-applications", &submission_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    let reference = body["applicationId"].as_str().unwrap();
    assert!(reference.starts_with("SA-"));
    assert_eq!(body["status"], "pending_payment");
}

#[tokio::test]
async fn test_invalid_submission_is_bad_request() {
    let (app, _) = test_app();
    let mut body = submission_body();
    body["serviceType"] = json!("birth-certificate");
    // No dateOfBirth for a birth-related service.
    let (status, error) = send(&app, post_json("/service-applications", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
    assert!(error["message"].as_str().unwrap().contains("dateOfBirth"));
}

#[tokio::test]
async fn test_payment_below_minimum_is_bad_request() {
    let (app, _) = test_app();
    let reference = submit_application(&app).await;

    let body = json!({
        "applicationId": reference,
        "paymentMethod": "cash",
        "transactionId": "TXN-0002",
        "amount": dec!(4000),
        "paymentDate": "2026-01-15"
    });
    let (status, error) = send(&app, post_json("/service-applications/payments", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
}

#[tokio::test]
async fn test_payment_body_without_payment_date_is_accepted() {
    let (app, _) = test_app();
    let reference = submit_application(&app).await;

    // The declaration form only asks for these four fields.
    let body = json!({
        "applicationId": reference,
        "paymentMethod": "bank-transfer",
        "transactionId": "TXN123",
        "amount": dec!(5000)
    });
    let (status, payment) = send(&app, post_json("/service-applications/payments", &body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["status"], "pending_verification");
    assert!(payment["paymentDate"].is_string());
}

#[tokio::test]
async fn test_malformed_payment_body_gets_json_error() {
    let (app, _) = test_app();
    let reference = submit_application(&app).await;

    // Missing paymentMethod fails deserialization; the rejection still
    // carries the standard error body.
    let body = json!({
        "applicationId": reference,
        "transactionId": "TXN123",
        "amount": dec!(5000)
    });
    let (status, error) = send(&app, post_json("/service-applications/payments", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "bad_request");
    assert!(error["message"].is_string());
}

#[tokio::test]
async fn test_payment_for_unknown_application_is_not_found() {
    let (app, _) = test_app();
    let body = json!({
        "applicationId": "SA-1719849600000-9999",
        "paymentMethod": "card",
        "transactionId": "TXN-0003",
        "amount": dec!(5000),
        "paymentDate": "2026-01-15"
    });
    let (status, error) = send(&app, post_json("/service-applications/payments", &body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "not_found");
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let (app, _) = test_app();

    let (status, _) = send(
        &app,
        Request::get("/service-applications")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_admin("/service-applications", &clerk_token())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, get_admin("/service-applications", &admin_token())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_full_flow_over_http() {
    let (app, _) = test_app();
    let token = admin_token();

    let reference = submit_application(&app).await;
    let payment = declare_payment(&app, &reference).await;
    assert_eq!(payment["status"], "pending_verification");

    // The declaration produced an admin notification linking both ways.
    let (status, feed) = send(&app, get_admin("/admin/notifications", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["unreadCount"], 1);
    assert_eq!(
        feed["notifications"][0]["applicationReference"],
        json!(reference)
    );
    assert_eq!(feed["notifications"][0]["paymentId"], payment["paymentId"]);

    // Verify the payment.
    let (status, verified) = send(
        &app,
        put_json_admin(
            &format!("/service-applications/{}/payment/verify", reference),
            &json!({ "verified": true }),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["status"], "verified");

    // Move to review and approve.
    for target in ["in_review", "approved"] {
        let (status, application) = send(
            &app,
            put_json_admin(
                &format!("/service-applications/{}/status", reference),
                &json!({ "status": target }),
                &token,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(application["status"], json!(target));
    }

    let (status, detail) = send(
        &app,
        get_admin(&format!("/service-applications/{}", reference), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"], "approved");
}

#[tokio::test]
async fn test_verify_without_payment_is_not_found() {
    let (app, _) = test_app();
    let reference = submit_application(&app).await;

    let (status, error) = send(
        &app,
        put_json_admin(
            &format!("/service-applications/{}/payment/verify", reference),
            &json!({ "verified": true }),
            &admin_token(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "not_found");
}

#[tokio::test]
async fn test_invalid_status_value_is_bad_request() {
    let (app, _) = test_app();
    let reference = submit_application(&app).await;

    let (status, error) = send(
        &app,
        put_json_admin(
            &format!("/service-applications/{}/status", reference),
            &json!({ "status": "archived" }),
            &admin_token(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
}

#[tokio::test]
async fn test_notification_read_endpoints() {
    let (app, _) = test_app();
    let token = admin_token();

    let reference = submit_application(&app).await;
    declare_payment(&app, &reference).await;

    let (_, feed) = send(&app, get_admin("/admin/notifications", &token)).await;
    let id = feed["notifications"][0]["id"].as_str().unwrap().to_string();

    let (status, marked) = send(
        &app,
        put_json_admin(
            &format!("/admin/notifications/{}/read", id),
            &json!({}),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["read"], true);

    // Repeating the mark is a no-op, not an error.
    let (status, _) = send(
        &app,
        put_json_admin(
            &format!("/admin/notifications/{}/read", id),
            &json!({}),
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, result) = send(
        &app,
        put_json_admin("/admin/notifications/read-all", &json!({}), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["marked"], 0);

    let (_, feed) = send(&app, get_admin("/admin/notifications", &token)).await;
    assert_eq!(feed["unreadCount"], 0);
}

#[tokio::test]
async fn test_list_filters_by_status_param() {
    let (app, _) = test_app();
    let token = admin_token();

    let first = submit_application(&app).await;
    let second = submit_application(&app).await;
    declare_payment(&app, &second).await;

    let (status, pending) = send(
        &app,
        get_admin("/service-applications?status=pending_payment", &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let references: Vec<&str> = pending
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["applicationId"].as_str().unwrap())
        .collect();
    assert_eq!(references, vec![first.as_str()]);
}
