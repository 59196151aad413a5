//! Integration tests for the Flightcast HTTP surface.
//!
//! Uses axum-test to drive the router in-process.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum_test::TestServer;
use flightcast::api::{create_router, AppState, MAX_BODY_BYTES};
use flightcast_core::{BookingForm, ModelArtifact, ModelMetrics};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
}

/// Server backed by the shipped artifacts.
fn shipped_server() -> TestServer {
    let dir = artifacts_dir();
    let state = AppState::load(
        &dir.join("booking_predictor.json"),
        &dir.join("deployment_artifacts.json"),
    )
    .unwrap();
    TestServer::new(create_router(state)).unwrap()
}

/// Server whose model splits on a column the booking schema lacks.
fn mismatched_server() -> TestServer {
    let model = ModelArtifact::from_json(
        r#"{
            "kind": "tree_ensemble",
            "name": "stale-model",
            "trees": [{"nodes": [
                {"feature": "cabin_class", "threshold": 0.5, "yes": 1, "no": 2},
                {"leaf": -1.0},
                {"leaf": 1.0}
            ]}]
        }"#,
    )
    .unwrap();
    let metrics = ModelMetrics {
        accuracy: 0.5,
        roc_auc: 0.5,
        f1_score: 0.5,
    };
    TestServer::new(create_router(AppState::new(Arc::new(model), metrics))).unwrap()
}

fn likely_booking() -> BookingForm {
    BookingForm {
        num_passengers: 2,
        length_of_stay: 3,
        booking_origin: "Malaysia".into(),
        wants_extra_baggage: true,
        wants_preferred_seat: true,
        wants_in_flight_meals: true,
        flight_duration: 8.0,
        ..BookingForm::default()
    }
}

// =============================================================================
// PAGE TESTS
// =============================================================================

#[tokio::test]
async fn test_index_renders_defaults_and_metrics() {
    let server = shipped_server();
    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Flight Booking Completion Predictor"));
    assert!(html.contains("Model Information"));
    assert!(html.contains("85.1%"));
    assert!(html.contains("0.779"));
    assert!(html.contains("0.432"));
    assert!(html.contains("<option value=\"Mon\" selected>Mon</option>"));
    assert!(html.contains("Predict Booking Completion"));
    assert!(!html.contains("Prediction Result"));
}

#[tokio::test]
async fn test_submit_default_form_scores_low() {
    let server = shipped_server();
    let response = server.post("/").form(&BookingForm::default()).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Prediction Result"));
    assert!(html.contains("Low likelihood of booking completion (10.9% probability)"));
    assert!(html.contains("Confidence: 10.9%"));
    assert!(html.contains("promotional discounts"));
}

#[tokio::test]
async fn test_submit_keeps_submitted_values() {
    let server = shipped_server();
    let response = server.post("/").form(&likely_booking()).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("High likelihood of booking completion"));
    assert!(html.contains("<option value=\"Malaysia\" selected>Malaysia</option>"));
    assert!(html.contains("name=\"wants_extra_baggage\" value=\"true\" checked"));
    assert!(html.contains("smooth checkout"));
}

#[tokio::test]
async fn test_submit_out_of_range_is_unprocessable() {
    let server = shipped_server();
    let form = BookingForm {
        flight_hour: 24,
        ..BookingForm::default()
    };
    let response = server.post("/").form(&form).await;

    assert_eq!(response.status_code(), 422);
    let html = response.text();
    assert!(html.contains("Invalid booking details: flight_hour must be between 0 and 23"));
    assert!(!html.contains("Prediction Result"));
}

#[tokio::test]
async fn test_predictor_failure_shows_error_and_server_keeps_serving() {
    let server = mismatched_server();

    let response = server.post("/").form(&BookingForm::default()).await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Prediction error: model feature &#39;cabin_class&#39;"));
    assert!(html.contains("Model Information"));

    server.get("/health").await.assert_status_ok();
    server.get("/").await.assert_status_ok();
}

#[tokio::test]
async fn test_submit_oversized_form_is_payload_too_large() {
    let server = shipped_server();
    let form = BookingForm {
        sales_channel: "x".repeat(MAX_BODY_BYTES + 1),
        ..BookingForm::default()
    };
    let response = server.post("/").form(&form).await;

    assert_eq!(response.status_code(), 413);
    assert!(response.text().contains("Invalid booking details"));
}

// =============================================================================
// JSON API TESTS
// =============================================================================

#[tokio::test]
async fn test_api_predict_returns_assessment() {
    let server = shipped_server();
    let response = server.post("/api/predict").json(&json!({})).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["label"], 0);
    assert_eq!(body["data"]["percent"], "10.9%");
    assert_eq!(body["data"]["banner"]["level"], "error");
    assert_eq!(body["data"]["recommendation"], "offer_discounts");
    assert_eq!(body["data"]["features"]["flight_day"], 1);
    assert_eq!(body["data"]["features"]["wants_extra_baggage"], 0);
}

#[tokio::test]
async fn test_api_predict_rejects_unknown_option() {
    let server = shipped_server();
    let response = server
        .post("/api/predict")
        .json(&json!({"trip_type": "Roundtrip"}))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("trip_type"));
}

#[tokio::test]
async fn test_api_predict_rejects_malformed_body() {
    let server = shipped_server();
    let response = server
        .post("/api/predict")
        .json(&json!({"num_passengers": "two"}))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_api_predict_reports_predictor_failure() {
    let server = mismatched_server();
    let response = server.post("/api/predict").json(&json!({})).await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Prediction error:"));
}

#[tokio::test]
async fn test_api_metrics() {
    let server = shipped_server();
    let response = server.get("/api/metrics").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["model"], "booking-completion-gbt");
    assert_eq!(body["model_metrics"]["accuracy"], 0.8512);
    assert_eq!(body["model_metrics"]["f1_score"], 0.4318);
}

#[tokio::test]
async fn test_health() {
    let server = shipped_server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "booking-completion-gbt");
}

#[tokio::test]
async fn test_api_predict_oversized_body_is_payload_too_large() {
    let server = shipped_server();
    let response = server
        .post("/api/predict")
        .json(&json!({"booking_origin": "x".repeat(MAX_BODY_BYTES + 1)}))
        .await;

    assert_eq!(response.status_code(), 413);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}
