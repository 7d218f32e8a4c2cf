use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assessor::application::ports::{AnalysisEngine, AnalysisEngineError};
use assessor::domain::{AnalysisRequest, AnalysisResult};
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Semaphore;

pub fn analysis_request(question: &str) -> AnalysisRequest {
    let metadata = json!({"q": question});
    AnalysisRequest::new(
        metadata.as_object().cloned().expect("object"),
        question,
        format!("answer to {question}"),
    )
}

/// Outcome chosen by the question text:
/// `fail:<msg>` fails with `<msg>`, `panic` panics, `sleep:<ms>` sleeps first,
/// `block:<ms>` blocks the thread first, anything else succeeds.
pub async fn scripted_outcome(
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AnalysisEngineError> {
    let question = request.question.as_str();
    if let Some(message) = question.strip_prefix("fail:") {
        return Err(AnalysisEngineError::Failed(message.to_string()));
    }
    if question == "panic" {
        panic!("boom");
    }
    if let Some(ms) = question.strip_prefix("block:") {
        let ms: u64 = ms.parse().expect("block duration");
        std::thread::sleep(Duration::from_millis(ms));
    }
    if let Some(ms) = question.strip_prefix("sleep:") {
        let ms: u64 = ms.parse().expect("sleep duration");
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    Ok(AnalysisResult::for_request(
        request,
        Some("7".to_string()),
        vec!["cause".to_string()],
    ))
}

/// Runs each analysis immediately and tracks how many run at once.
#[derive(Default)]
pub struct ScriptedEngine {
    pub started: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[async_trait]
impl AnalysisEngine for ScriptedEngine {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisEngineError> {
        self.started.lock().unwrap().push(request.question.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.in_flight);
        tokio::time::sleep(Duration::from_millis(2)).await;
        scripted_outcome(request).await
    }
}

/// Decrements the counter however the analysis ends, panics and aborts included.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Holds every analysis until the test releases a permit.
pub struct GatedEngine {
    pub gate: Arc<Semaphore>,
    pub started: Mutex<Vec<String>>,
}

impl GatedEngine {
    pub fn new() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            started: Mutex::new(Vec::new()),
        }
    }

    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisEngine for GatedEngine {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisEngineError> {
        self.started.lock().unwrap().push(request.question.clone());
        self.gate.acquire().await.expect("gate open").forget();
        scripted_outcome(request).await
    }
}
