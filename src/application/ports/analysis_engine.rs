use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{AnalysisRequest, AnalysisResult};

use super::LlmClientError;

/// Performs the slow analysis for one job. Called once per job, never concurrently.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest)
    -> Result<AnalysisResult, AnalysisEngineError>;
}

/// Failure of a single analysis. The `Display` text is what callers see in `error`.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisEngineError {
    #[error("inference failed: {0}")]
    Llm(#[from] LlmClientError),
    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),
    #[error("analysis engine panicked: {0}")]
    Panicked(String),
    #[error("{0}")]
    Failed(String),
}
