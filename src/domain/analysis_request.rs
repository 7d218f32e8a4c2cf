use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One organisation's answer to an assessment question, as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub question_metadata: Map<String, Value>,
    pub question: String,
    pub organization_answer: String,
}

impl AnalysisRequest {
    pub fn new(
        question_metadata: Map<String, Value>,
        question: impl Into<String>,
        organization_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_metadata,
            question: question.into(),
            organization_answer: organization_answer.into(),
        }
    }
}
