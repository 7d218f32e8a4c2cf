use std::collections::VecDeque;

use crate::domain::JobId;

/// Ids of admitted jobs waiting for the worker, oldest first.
#[derive(Debug, Default)]
pub struct PendingQueue {
    ids: VecDeque<JobId>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` and return its 1-based position in line.
    pub fn enqueue(&mut self, id: JobId) -> usize {
        self.ids.push_back(id);
        self.ids.len()
    }

    pub fn dequeue(&mut self) -> Option<JobId> {
        self.ids.pop_front()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
