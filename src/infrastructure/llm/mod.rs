mod mock_llm_client;
mod openai_client;

pub use mock_llm_client::{MockLlmClient, SCAFFOLD_MODEL_OUTPUT};
pub use openai_client::OpenAiClient;
