use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::{Job, JobId, JobTransitionError};

#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("duplicate job id: {0}")]
    DuplicateId(JobId),
    #[error("invalid transition: {0}")]
    Transition(#[from] JobTransitionError),
}

/// Every job known to the process, keyed by id, regardless of state.
///
/// Not synchronized on its own; it lives inside the scheduler's lock.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: HashMap<JobId, Job>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record. An existing record with the same id is left untouched.
    pub fn put(&mut self, job: Job) -> Result<(), JobStoreError> {
        match self.jobs.entry(job.id()) {
            Entry::Occupied(_) => Err(JobStoreError::DuplicateId(job.id())),
            Entry::Vacant(slot) => {
                slot.insert(job);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: JobId) -> Result<&Job, JobStoreError> {
        self.jobs.get(&id).ok_or(JobStoreError::NotFound(id))
    }

    /// Apply `mutator` to the record. A rejected transition leaves the record as it was.
    pub fn update<F>(&mut self, id: JobId, mutator: F) -> Result<(), JobStoreError>
    where
        F: FnOnce(&mut Job) -> Result<(), JobTransitionError>,
    {
        let job = self.jobs.get_mut(&id).ok_or(JobStoreError::NotFound(id))?;
        mutator(job)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
