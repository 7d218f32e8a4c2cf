mod analysis_request;
mod analysis_result;
mod job;
mod job_id;
mod job_status;

pub use analysis_request::AnalysisRequest;
pub use analysis_result::{AnalysisResult, MISSING_SCORE};
pub use job::{Job, JobTransitionError};
pub use job_id::JobId;
pub use job_status::JobStatus;
