use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use clarity::error::AppError;
use clarity::pay::{ComparisonReport, FormOptions, UserFormSubmission};
use clarity::session::{AnalysisReport, SessionOutcome};
use serde_json::json;
use tracing::debug;

pub(crate) fn with_clarity_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/form/options", get(form_options_endpoint))
        .route("/api/v1/comparisons", post(comparisons_endpoint))
        .route("/api/v1/analysis", post(analysis_endpoint))
        .route(
            "/api/v1/sessions/:session_id/submission",
            put(session_submission_endpoint),
        )
        .route("/api/v1/sessions/:session_id", get(session_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn form_options_endpoint() -> Json<FormOptions> {
    Json(FormOptions::standard())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Unreadable bodies and invalid answers both come back as 400 with an `error` message.
fn read_submission(
    payload: Result<Json<UserFormSubmission>, JsonRejection>,
) -> Result<UserFormSubmission, Response> {
    let Json(submission) = payload
        .map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text()))?;
    submission
        .validate()
        .map_err(|err| AppError::from(err).into_response())?;
    Ok(submission)
}

pub(crate) async fn comparisons_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<UserFormSubmission>, JsonRejection>,
) -> Result<Json<ComparisonReport>, Response> {
    let submission = read_submission(payload)?;
    Ok(Json(state.analyzer.compare(&submission)))
}

pub(crate) async fn analysis_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<UserFormSubmission>, JsonRejection>,
) -> Result<Json<AnalysisReport>, Response> {
    let submission = read_submission(payload)?;
    let report = state
        .analyzer
        .analyze(submission)
        .await
        .map_err(|err| AppError::from(err).into_response())?;
    Ok(Json(report))
}

pub(crate) async fn session_submission_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<UserFormSubmission>, JsonRejection>,
) -> Result<Json<AnalysisReport>, Response> {
    let submission = read_submission(payload)?;
    let session = state.sessions.get_or_create(&session_id);
    debug!(
        %session_id,
        sessions = state.sessions.len(),
        "tracked submission received"
    );

    match session.submit(&state.analyzer, submission).await {
        Ok(SessionOutcome::Settled(report)) => Ok(Json(report)),
        Ok(SessionOutcome::Superseded { .. }) => Err(error_response(
            StatusCode::CONFLICT,
            "submission superseded",
        )),
        Err(err) => Err(AppError::from(err).into_response()),
    }
}

pub(crate) async fn session_report_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<AnalysisReport>, Response> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "unknown session"))?;

    session
        .latest()
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "no settled analysis yet"))
}
