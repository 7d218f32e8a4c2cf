use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub busy: bool,
    pub queue_depth: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.scheduler.snapshot().await;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            busy: snapshot.current_job.is_some(),
            queue_depth: snapshot.queue_depth,
        }),
    )
}
