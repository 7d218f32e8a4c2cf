use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AnalysisRequest;

pub const MISSING_SCORE: &str = "Error: not provided by model";

/// Structured output of one analysis. The request fields are echoed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub question_metadata: Map<String, Value>,
    pub question: String,
    pub organization_answer: String,
    pub answer_score: String,
    pub root_causes: Vec<String>,
}

impl AnalysisResult {
    pub fn for_request(
        request: &AnalysisRequest,
        answer_score: Option<String>,
        root_causes: Vec<String>,
    ) -> Self {
        Self {
            question_metadata: request.question_metadata.clone(),
            question: request.question.clone(),
            organization_answer: request.organization_answer.clone(),
            answer_score: answer_score.unwrap_or_else(|| MISSING_SCORE.to_string()),
            root_causes,
        }
    }
}
