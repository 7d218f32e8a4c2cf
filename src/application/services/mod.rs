mod analysis_worker;
mod job_scheduler;
mod job_store;
mod llm_analysis_engine;
mod output_parser;
mod pending_queue;
mod prompt_builder;

pub use analysis_worker::AnalysisWorker;
pub use job_scheduler::{
    Admission, DispatchMessage, JobScheduler, SchedulerError, SchedulerSnapshot, Submission,
};
pub use job_store::{JobStore, JobStoreError};
pub use llm_analysis_engine::LlmAnalysisEngine;
pub use output_parser::{ParsedAnalysis, parse_analysis_output};
pub use pending_queue::PendingQueue;
pub use prompt_builder::{DEFAULT_SYSTEM_PROMPT, PromptBuilder};
