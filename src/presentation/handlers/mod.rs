mod health;
mod job_status;
mod submit_job;

use serde::Serialize;

pub use health::{HealthResponse, health_handler};
pub use job_status::{JobStatusResponse, job_status_handler};
pub use submit_job::{SubmitJobResponse, submit_job_handler};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
