use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, Json, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use flightcast_core::{assess, BookingForm, Error, Predictor};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::page::{self, Outcome};
use super::AppState;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(
        &state.metrics,
        state.predictor.name(),
        &BookingForm::default(),
        None,
    ))
}

pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<BookingForm>, FormRejection>,
) -> impl IntoResponse {
    let (status, form, outcome) = match form {
        Ok(Form(form)) => {
            let (status, outcome) = evaluate(state.predictor.as_ref(), &form);
            (status, form, outcome)
        }
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable form submission");
            (
                rejection.status(),
                BookingForm::default(),
                Outcome::Invalid(rejection.body_text()),
            )
        }
    };

    let body = page::render(
        &state.metrics,
        state.predictor.name(),
        &form,
        Some(&outcome),
    );
    (status, Html(body))
}

/// Score one submitted form for the page.
///
/// A predictor failure still renders the page normally; only the result
/// section turns into an error banner.
fn evaluate(predictor: &dyn Predictor, form: &BookingForm) -> (StatusCode, Outcome) {
    match assess(predictor, form) {
        Ok(assessment) => {
            debug!(
                label = assessment.report.label,
                probability = assessment.report.probability,
                "prediction served"
            );
            (StatusCode::OK, Outcome::Scored(assessment.report))
        }
        Err(Error::Query(err)) => {
            warn!(error = %err, "booking form rejected");
            (StatusCode::UNPROCESSABLE_ENTITY, Outcome::Invalid(err.to_string()))
        }
        Err(err) => {
            warn!(error = %err, "prediction failed");
            (StatusCode::OK, Outcome::Failed(prediction_message(err)))
        }
    }
}

/// User-facing text for a failed prediction.
fn prediction_message(err: Error) -> String {
    match err {
        Error::Predict(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

pub async fn api_predict(
    State(state): State<AppState>,
    payload: Result<Json<BookingForm>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(form) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable booking payload");
            return (
                rejection.status(),
                Json(json!({"success": false, "error": rejection.body_text()})),
            );
        }
    };

    match assess(state.predictor.as_ref(), &form) {
        Ok(assessment) => {
            debug!(
                label = assessment.report.label,
                probability = assessment.report.probability,
                "prediction served"
            );
            (
                StatusCode::OK,
                Json(json!({"success": true, "data": assessment})),
            )
        }
        Err(Error::Query(err)) => {
            warn!(error = %err, "booking payload rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"success": false, "error": err.to_string()})),
            )
        }
        Err(err) => {
            warn!(error = %err, "prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": err.to_string()})),
            )
        }
    }
}

pub async fn api_metrics(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "model": state.predictor.name(),
        "model_metrics": state.metrics,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.predictor.name(),
    }))
}
