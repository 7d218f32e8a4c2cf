mod analysis_engine;
mod llm_client;

pub use analysis_engine::{AnalysisEngine, AnalysisEngineError};
pub use llm_client::{LlmClient, LlmClientError};
