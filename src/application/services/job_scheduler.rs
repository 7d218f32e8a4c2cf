use tokio::sync::{Mutex, mpsc};

use crate::application::ports::AnalysisEngineError;
use crate::domain::{AnalysisRequest, AnalysisResult, Job, JobId};

use super::{JobStore, JobStoreError, PendingQueue};

const WORKER_UNAVAILABLE: &str = "analysis worker unavailable";

/// A job that now owns the current-job slot and must be executed.
#[derive(Debug)]
pub struct DispatchMessage {
    pub job_id: JobId,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The slot was free; the job is already `processing`.
    Dispatched,
    /// The job waits behind `position - 1` others.
    Queued { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub job_id: JobId,
    pub admission: Admission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSnapshot {
    pub current_job: Option<JobId>,
    pub queue_depth: usize,
    pub job_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("job store: {0}")]
    Store(#[from] JobStoreError),
    #[error("analysis worker unavailable")]
    WorkerUnavailable,
}

#[derive(Debug, Default)]
struct SchedulerState {
    store: JobStore,
    queue: PendingQueue,
    current: Option<JobId>,
}

impl SchedulerState {
    /// Occupy the slot with `id` and move it to `processing`.
    fn claim(&mut self, id: JobId) -> Result<DispatchMessage, JobStoreError> {
        self.store.update(id, Job::start_processing)?;
        self.current = Some(id);
        let request = self.store.get(id)?.request().clone();
        Ok(DispatchMessage { job_id: id, request })
    }
}

/// Admission and bookkeeping for single-flight execution.
///
/// The job store, the pending queue and the current-job slot sit behind one
/// mutex. It is never held across an engine call: the worker receives a
/// [`DispatchMessage`], runs the analysis unlocked, then reports back through
/// [`JobScheduler::finish`], which hands it the next job in admission order.
///
/// The queue is non-empty only while the slot is occupied.
pub struct JobScheduler {
    state: Mutex<SchedulerState>,
    dispatcher: mpsc::UnboundedSender<DispatchMessage>,
}

impl JobScheduler {
    /// Returns the scheduler and the receiving end for the
    /// [`AnalysisWorker`](super::AnalysisWorker).
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DispatchMessage>) {
        let (dispatcher, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            state: Mutex::new(SchedulerState::default()),
            dispatcher,
        };
        (scheduler, receiver)
    }

    /// Admit a new job. Never waits for the analysis itself.
    pub async fn submit(&self, request: AnalysisRequest) -> Result<Submission, SchedulerError> {
        self.admit(Job::new(request)).await
    }

    /// Admit a freshly built `pending` record.
    pub async fn admit(&self, job: Job) -> Result<Submission, SchedulerError> {
        let job_id = job.id();
        let mut state = self.state.lock().await;
        state.store.put(job)?;

        if state.current.is_some() {
            let position = state.queue.enqueue(job_id);
            tracing::info!(job_id = %job_id, position, "Job queued");
            return Ok(Submission {
                job_id,
                admission: Admission::Queued { position },
            });
        }

        let message = state.claim(job_id)?;
        if self.dispatcher.send(message).is_err() {
            tracing::error!(job_id = %job_id, "Analysis worker is gone; failing job");
            state.current = None;
            state.store.update(job_id, |job| job.fail(WORKER_UNAVAILABLE))?;
            return Err(SchedulerError::WorkerUnavailable);
        }

        tracing::info!(job_id = %job_id, "Job dispatched");
        Ok(Submission {
            job_id,
            admission: Admission::Dispatched,
        })
    }

    /// Snapshot of a job as of the latest committed transition.
    pub async fn get(&self, id: JobId) -> Result<Job, JobStoreError> {
        let state = self.state.lock().await;
        state.store.get(id).cloned()
    }

    /// Record the outcome of the job in the slot, release the slot, and claim
    /// the oldest pending job if there is one.
    pub async fn finish(
        &self,
        id: JobId,
        outcome: Result<AnalysisResult, AnalysisEngineError>,
    ) -> Option<DispatchMessage> {
        let mut state = self.state.lock().await;

        let recorded = match outcome {
            Ok(result) => state.store.update(id, |job| job.complete(result)),
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(job_id = %id, error = %message, "Job failed");
                state.store.update(id, |job| job.fail(message))
            }
        };
        if let Err(e) = recorded {
            tracing::error!(job_id = %id, error = %e, "Failed to record job outcome");
        }

        if state.current != Some(id) {
            tracing::error!(
                job_id = %id,
                current = ?state.current,
                "Finished job did not hold the slot"
            );
        }
        state.current = None;

        while let Some(next) = state.queue.dequeue() {
            match state.claim(next) {
                Ok(message) => {
                    tracing::debug!(job_id = %next, remaining = state.queue.len(), "Next job claimed");
                    return Some(message);
                }
                Err(e) => {
                    tracing::error!(job_id = %next, error = %e, "Skipping unclaimable job");
                }
            }
        }

        tracing::debug!("Queue drained; scheduler idle");
        None
    }

    /// Slot, queue and store sizes read under one lock acquisition.
    pub async fn snapshot(&self) -> SchedulerSnapshot {
        let state = self.state.lock().await;
        SchedulerSnapshot {
            current_job: state.current,
            queue_depth: state.queue.len(),
            job_count: state.store.len(),
        }
    }
}
