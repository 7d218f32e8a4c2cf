use std::sync::Arc;

use crate::application::services::JobScheduler;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<JobScheduler>,
}

impl AppState {
    pub fn new(scheduler: Arc<JobScheduler>) -> Self {
        Self { scheduler }
    }
}
