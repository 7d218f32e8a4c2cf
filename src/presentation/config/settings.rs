use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
    pub scaffold: ScaffoldSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisSettings {
    /// Replaces the built-in assessor prompt when set.
    pub system_prompt: Option<String>,
    /// Unset means an analysis may run indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl AnalysisSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

/// Scaffold mode answers every analysis with a recorded model reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScaffoldSettings {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
}

impl Settings {
    /// Built-in defaults, then `appsettings.{env}.toml` if present, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("llm.base_url", "http://localhost:8001/v1")?
            .set_default("llm.api_key", "")?
            .set_default("llm.model", "unsloth/Qwen3-32B")?
            .set_default("llm.max_tokens", 4096)?
            .set_default("llm.temperature", 0.6)?
            .set_default("llm.top_p", 0.9)?
            .set_default("llm.top_k", 20)?
            .set_default("llm.request_timeout_seconds", 600)?
            .set_default("logging.level", "info,assessor=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)?
            .set_default("scaffold.enabled", false)?
            .set_default("scaffold.mock_response_delay_ms", 0)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
