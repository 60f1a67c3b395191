use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::EmployeeRecord;
use super::narrative::AuditNarrator;
use super::scoring::ScoringError;
use super::service::PayoutService;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub scenario: String,
    #[serde(default)]
    pub records: Vec<EmployeeRecord>,
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub scenario: String,
    pub record: EmployeeRecord,
}

/// Router builder exposing payout scoring and audit endpoints.
pub fn payout_router<N>(service: Arc<PayoutService<N>>) -> Router
where
    N: AuditNarrator + 'static,
{
    Router::new()
        .route("/api/v1/payouts/scenarios", get(scenarios_handler::<N>))
        .route("/api/v1/payouts/score", post(score_handler::<N>))
        .route("/api/v1/payouts/audit", post(audit_handler::<N>))
        .with_state(service)
}

pub(crate) async fn scenarios_handler<N>(State(service): State<Arc<PayoutService<N>>>) -> Response
where
    N: AuditNarrator + 'static,
{
    let payload = json!({ "scenarios": service.scenarios() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn score_handler<N>(
    State(service): State<Arc<PayoutService<N>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    N: AuditNarrator + 'static,
{
    match service.score_batch(&request.records, &request.scenario) {
        Ok(batch) => (StatusCode::OK, axum::Json(batch)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

pub(crate) async fn audit_handler<N>(
    State(service): State<Arc<PayoutService<N>>>,
    axum::Json(request): axum::Json<AuditRequest>,
) -> Response
where
    N: AuditNarrator + 'static,
{
    let AuditRequest { scenario, record } = request;
    match service.audit(record, scenario).await {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

fn scoring_error_response(error: ScoringError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
