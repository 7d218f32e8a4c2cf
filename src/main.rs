use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use assessor::application::ports::{AnalysisEngine, LlmClient};
use assessor::application::services::{
    AnalysisWorker, JobScheduler, LlmAnalysisEngine, PromptBuilder,
};
use assessor::infrastructure::llm::{MockLlmClient, OpenAiClient};
use assessor::infrastructure::observability::{TracingConfig, init_tracing};
use assessor::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let llm_client: Arc<dyn LlmClient> = if settings.scaffold.enabled {
        tracing::warn!("Scaffold mode enabled: analyses return a recorded model reply");
        Arc::new(MockLlmClient::new(Duration::from_millis(
            settings.scaffold.mock_response_delay_ms,
        )))
    } else {
        tracing::info!(
            base_url = %settings.llm.base_url,
            model = %settings.llm.model,
            "Using OpenAI-compatible inference server"
        );
        Arc::new(OpenAiClient::new(&settings.llm).context("Failed to build LLM client")?)
    };

    let prompt_builder = settings
        .analysis
        .system_prompt
        .clone()
        .map(PromptBuilder::new)
        .unwrap_or_default();
    let engine: Arc<dyn AnalysisEngine> =
        Arc::new(LlmAnalysisEngine::new(llm_client, prompt_builder));

    let (scheduler, dispatch_receiver) = JobScheduler::new();
    let scheduler = Arc::new(scheduler);

    let worker = AnalysisWorker::new(dispatch_receiver, Arc::clone(&scheduler), engine)
        .with_timeout(settings.analysis.timeout());
    tokio::spawn(worker.run());

    let router = create_router(AppState::new(scheduler));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
