use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::JobStoreError;
use crate::domain::{AnalysisResult, Job, JobId};
use crate::presentation::state::AppState;

use super::ErrorResponse;

const JOB_NOT_FOUND: &str = "Job not found";

#[derive(Serialize)]
pub struct JobStatusResponse {
    pub id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Job> for JobStatusResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id().to_string(),
            status: job.status().as_str().to_string(),
            created_at: job.created_at().to_rfc3339(),
            updated_at: job.updated_at().to_rfc3339(),
            result: job.result().cloned(),
            error: job.error().map(str::to_string),
        }
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: JOB_NOT_FOUND.to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    // An unparseable id cannot name a job, so it gets the same answer as an unknown one.
    let Ok(id) = job_id.parse::<JobId>() else {
        tracing::debug!(job_id = %job_id, "Malformed job id");
        return not_found();
    };

    match state.scheduler.get(id).await {
        Ok(job) => (StatusCode::OK, Json(JobStatusResponse::from(job))).into_response(),
        Err(JobStoreError::NotFound(_)) => not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
