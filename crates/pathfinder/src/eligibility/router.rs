use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::intake::ProfileSubmission;
use super::service::{EligibilityService, EligibilityServiceError};

/// Router exposing eligibility assessment and the program catalog.
pub fn eligibility_router(service: Arc<EligibilityService>) -> Router {
    Router::new()
        .route("/api/v1/eligibility", post(evaluate_handler))
        .route("/api/v1/programs", get(programs_handler))
        .route("/api/v1/programs/:program_id", get(program_handler))
        .with_state(service)
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<EligibilityService>>,
    axum::Json(submission): axum::Json<ProfileSubmission>,
) -> Response {
    match service.evaluate(submission) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(EligibilityServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProgramsQuery {
    country: Option<String>,
}

pub(crate) async fn programs_handler(
    State(service): State<Arc<EligibilityService>>,
    Query(query): Query<ProgramsQuery>,
) -> Response {
    let programs = service.programs(query.country.as_deref());
    let payload = json!({
        "versions": service.catalog().versions(),
        "count": programs.len(),
        "programs": programs,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn program_handler(
    State(service): State<Arc<EligibilityService>>,
    Path(program_id): Path<String>,
) -> Response {
    match service.program(&program_id) {
        Ok(program) => (StatusCode::OK, axum::Json(program)).into_response(),
        Err(error @ EligibilityServiceError::UnknownProgram(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
