use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::{Admission, SchedulerError};
use crate::domain::AnalysisRequest;
use crate::infrastructure::observability::{RequestId, sanitize_prompt};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct SubmitJobResponse {
    pub id: String,
    pub status: String,
}

#[tracing::instrument(skip(state, request_id, request))]
pub async fn submit_job_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<AnalysisRequest>,
) -> impl IntoResponse {
    tracing::debug!(question = %sanitize_prompt(&request.question), "Analysis job submitted");

    match state.scheduler.submit(request).await {
        Ok(submission) => {
            let queued_behind = match submission.admission {
                Admission::Dispatched => 0,
                Admission::Queued { position } => position,
            };
            tracing::info!(
                job_id = %submission.job_id,
                request_id = %request_id.0,
                queued_behind,
                "Analysis job accepted"
            );
            (
                StatusCode::ACCEPTED,
                Json(SubmitJobResponse {
                    id: submission.job_id.to_string(),
                    status: "accepted".to_string(),
                }),
            )
                .into_response()
        }
        Err(SchedulerError::WorkerUnavailable) => {
            tracing::error!(request_id = %request_id.0, "Analysis worker unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "Analysis worker unavailable".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id.0, error = %e, "Failed to admit analysis job");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
