use chrono::{DateTime, Utc};

use super::{AnalysisRequest, AnalysisResult, JobId, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("job {id} cannot move from {from} to {to}")]
pub struct JobTransitionError {
    pub id: JobId,
    pub from: JobStatus,
    pub to: JobStatus,
}

/// A submitted analysis tracked from admission to its terminal outcome.
///
/// Fields are only reachable through the transition methods, so `result` is set
/// exactly when the job is `completed`, `error` exactly when it is `failed`, and
/// nothing changes once either terminal state is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    id: JobId,
    status: JobStatus,
    request: AnalysisRequest,
    result: Option<AnalysisResult>,
    error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(request: AnalysisRequest) -> Self {
        Self::with_id(JobId::new(), request)
    }

    pub fn with_id(id: JobId, request: AnalysisRequest) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Pending,
            request,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn start_processing(&mut self) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Pending, JobStatus::Processing)
    }

    pub fn complete(&mut self, result: AnalysisResult) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Processing, JobStatus::Completed)?;
        self.result = Some(result);
        Ok(())
    }

    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Processing, JobStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    fn transition(&mut self, from: JobStatus, to: JobStatus) -> Result<(), JobTransitionError> {
        if self.status != from {
            return Err(JobTransitionError {
                id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.touch();
        Ok(())
    }

    // Wall clock may step backwards; updated_at must not.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
