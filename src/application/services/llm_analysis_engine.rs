use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{AnalysisEngine, AnalysisEngineError, LlmClient};
use crate::domain::{AnalysisRequest, AnalysisResult};
use crate::infrastructure::observability::sanitize_prompt;

use super::{PromptBuilder, parse_analysis_output};

/// Prompts the model, then extracts score and root causes from its reply.
pub struct LlmAnalysisEngine<L: ?Sized> {
    llm_client: Arc<L>,
    prompt_builder: PromptBuilder,
}

impl<L> LlmAnalysisEngine<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>, prompt_builder: PromptBuilder) -> Self {
        Self {
            llm_client,
            prompt_builder,
        }
    }
}

#[async_trait]
impl<L> AnalysisEngine for LlmAnalysisEngine<L>
where
    L: LlmClient + ?Sized + 'static,
{
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisEngineError> {
        tracing::debug!(question = %sanitize_prompt(&request.question), "Building analysis prompt");
        let user_prompt = self.prompt_builder.user_prompt(request);

        let output = self
            .llm_client
            .complete(self.prompt_builder.system_prompt(), &user_prompt)
            .await?;

        let parsed = parse_analysis_output(&output);
        if parsed.score.is_none() {
            tracing::warn!(output_chars = output.len(), "Model reply has no <score>");
        }
        tracing::debug!(causes = parsed.root_causes.len(), "Model reply parsed");

        Ok(AnalysisResult::for_request(
            request,
            parsed.score,
            parsed.root_causes,
        ))
    }
}
