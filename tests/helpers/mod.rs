#![allow(dead_code)]

mod scripted_engine;

pub use scripted_engine::{GatedEngine, ScriptedEngine, analysis_request, scripted_outcome};

use std::sync::Arc;
use std::time::Duration;

use assessor::application::ports::AnalysisEngine;
use assessor::application::services::{AnalysisWorker, JobScheduler};
use assessor::domain::{Job, JobId, JobStatus};

const WAIT_LIMIT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Starts a scheduler with its worker running on `engine`.
pub fn start_scheduler(
    engine: Arc<dyn AnalysisEngine>,
    timeout: Option<Duration>,
) -> Arc<JobScheduler> {
    let (scheduler, receiver) = JobScheduler::new();
    let scheduler = Arc::new(scheduler);
    let worker =
        AnalysisWorker::new(receiver, Arc::clone(&scheduler), engine).with_timeout(timeout);
    tokio::spawn(worker.run());
    scheduler
}

pub async fn wait_for_terminal(scheduler: &JobScheduler, id: JobId) -> Job {
    tokio::time::timeout(WAIT_LIMIT, async {
        loop {
            let job = scheduler.get(id).await.expect("job exists");
            if job.is_terminal() {
                return job;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
    .expect("job reached a terminal state in time")
}

pub async fn wait_for_status(scheduler: &JobScheduler, id: JobId, status: JobStatus) -> Job {
    tokio::time::timeout(WAIT_LIMIT, async {
        loop {
            let job = scheduler.get(id).await.expect("job exists");
            if job.status() == status {
                return job;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
    .expect("job reached the expected status in time")
}
