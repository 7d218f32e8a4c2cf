use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::Instrument;

use crate::application::ports::{AnalysisEngine, AnalysisEngineError};
use crate::domain::AnalysisResult;

use super::{DispatchMessage, JobScheduler};

/// The single execution loop. Receives the job the scheduler dispatched on an
/// idle slot, then keeps pulling successors from [`JobScheduler::finish`] until
/// the queue is empty before waiting on the channel again.
pub struct AnalysisWorker {
    receiver: mpsc::UnboundedReceiver<DispatchMessage>,
    scheduler: Arc<JobScheduler>,
    engine: Arc<dyn AnalysisEngine>,
    timeout: Option<Duration>,
}

impl AnalysisWorker {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<DispatchMessage>,
        scheduler: Arc<JobScheduler>,
        engine: Arc<dyn AnalysisEngine>,
    ) -> Self {
        Self {
            receiver,
            scheduler,
            engine,
            timeout: None,
        }
    }

    /// Treat an analysis running longer than `timeout` as failed. The slot is
    /// only released once the overrunning call has actually stopped.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn run(mut self) {
        tracing::info!(timeout = ?self.timeout, "Analysis worker started");
        while let Some(first) = self.receiver.recv().await {
            let mut next = Some(first);
            while let Some(msg) = next.take() {
                let job_id = msg.job_id;
                let span = tracing::info_span!("analysis_job", job_id = %job_id);
                let outcome = self.execute(msg).instrument(span).await;
                next = self.scheduler.finish(job_id, outcome).await;
            }
        }
        tracing::info!("Analysis worker stopped: channel closed");
    }

    async fn execute(&self, msg: DispatchMessage) -> Result<AnalysisResult, AnalysisEngineError> {
        tracing::debug!("Analysis started");
        let engine = Arc::clone(&self.engine);
        let request = msg.request;
        let mut handle = tokio::spawn(async move { engine.analyze(&request).await });

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!(limit = ?limit, "Analysis timed out; waiting for it to stop");
                    // Abort only lands at the next yield point. The slot stays
                    // held until the task has actually ended.
                    handle.abort();
                    match handle.await {
                        Err(e) if e.is_cancelled() => {
                            tracing::debug!("Timed-out analysis cancelled")
                        }
                        Err(e) => {
                            join_failure(e);
                        }
                        Ok(_) => tracing::debug!("Timed-out analysis ran to its end"),
                    }
                    return Err(AnalysisEngineError::Timeout(limit));
                }
            },
            None => handle.await,
        };

        let outcome = joined.map_err(join_failure).and_then(|result| result);
        if outcome.is_ok() {
            tracing::info!("Analysis completed");
        }
        outcome
    }
}

fn join_failure(e: JoinError) -> AnalysisEngineError {
    if e.is_panic() {
        let message = panic_message(e.into_panic());
        tracing::error!(panic = %message, "Analysis engine panicked");
        AnalysisEngineError::Panicked(message)
    } else {
        AnalysisEngineError::Failed(format!("analysis task join error: {e}"))
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
