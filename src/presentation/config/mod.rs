mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, LlmSettings, LoggingSettings, ScaffoldSettings, ServerSettings, Settings,
};
