mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use assessor::application::ports::AnalysisEngine;
use assessor::application::services::{LlmAnalysisEngine, PromptBuilder};
use assessor::infrastructure::llm::MockLlmClient;
use assessor::infrastructure::observability::REQUEST_ID_HEADER;
use assessor::presentation::{AppState, create_router};

use helpers::{GatedEngine, ScriptedEngine, start_scheduler};

fn scaffold_app() -> axum::Router {
    let engine: Arc<dyn AnalysisEngine> = Arc::new(LlmAnalysisEngine::new(
        Arc::new(MockLlmClient::default()),
        PromptBuilder::default(),
    ));
    create_router(AppState::new(start_scheduler(engine, None)))
}

fn app_with(engine: Arc<dyn AnalysisEngine>) -> axum::Router {
    create_router(AppState::new(start_scheduler(engine, None)))
}

fn submit_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/jobs")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn status_request(id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/jobs/{id}"))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn submit(app: &axum::Router, body: Value) -> String {
    let response = app.clone().oneshot(submit_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = json_body(response).await;
    assert_eq!(body["status"], "accepted");
    body["id"].as_str().unwrap().to_string()
}

async fn poll_until_terminal(app: &axum::Router, id: &str) -> Value {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let response = app.clone().oneshot(status_request(id)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body = json_body(response).await;
            if body["status"] == "completed" || body["status"] == "failed" {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("job finished in time")
}

fn sample_request() -> Value {
    json!({
        "question_metadata": {"dimension": "strategy", "best_answer": "clear vision"},
        "question": "How clearly is the digital vision communicated?",
        "organization_answer": "Partially defined, inconsistent across departments."
    })
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = scaffold_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["busy"], false);
    assert_eq!(body["queue_depth"], 0);
}

#[tokio::test]
async fn given_valid_request_when_submitted_then_completes_with_parsed_analysis() {
    let app = scaffold_app();

    let id = submit(&app, sample_request()).await;
    let body = poll_until_terminal(&app, &id).await;

    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["status"], "completed");
    assert!(body.get("error").is_none());
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());

    let result = &body["result"];
    assert_eq!(result["answer_score"], "5");
    assert_eq!(result["root_causes"].as_array().unwrap().len(), 5);
    assert_eq!(result["question_metadata"], sample_request()["question_metadata"]);
    assert_eq!(result["question"], sample_request()["question"]);
    assert_eq!(result["organization_answer"], sample_request()["organization_answer"]);
}

#[tokio::test]
async fn given_busy_worker_when_second_job_submitted_then_it_reports_pending() {
    let engine = Arc::new(GatedEngine::new());
    let app = app_with(engine.clone());

    let first = submit(&app, json!({"question_metadata": {}, "question": "Q1", "organization_answer": "A"})).await;
    let second = submit(&app, json!({"question_metadata": {}, "question": "Q2", "organization_answer": "A"})).await;

    let body = json_body(app.clone().oneshot(status_request(&first)).await.unwrap()).await;
    assert_eq!(body["status"], "processing");
    let body = json_body(app.clone().oneshot(status_request(&second)).await.unwrap()).await;
    assert_eq!(body["status"], "pending");
    assert!(body.get("result").is_none());
    assert!(body.get("error").is_none());

    let health = json_body(
        app.clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(health["busy"], true);
    assert_eq!(health["queue_depth"], 1);

    engine.release(2);
    assert_eq!(poll_until_terminal(&app, &first).await["status"], "completed");
    assert_eq!(poll_until_terminal(&app, &second).await["status"], "completed");
}

#[tokio::test]
async fn given_failing_engine_when_polled_then_error_shown_without_result() {
    let app = app_with(Arc::new(ScriptedEngine::default()));

    let id = submit(
        &app,
        json!({"question_metadata": {}, "question": "fail:engine timeout", "organization_answer": "A"}),
    )
    .await;
    let body = poll_until_terminal(&app, &id).await;

    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "engine timeout");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn given_unknown_job_id_when_status_requested_then_returns_not_found() {
    let app = scaffold_app();

    let response = app
        .clone()
        .oneshot(status_request(&uuid::Uuid::new_v4().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"error": "Job not found"}));
}

#[tokio::test]
async fn given_malformed_job_id_when_status_requested_then_returns_not_found() {
    let app = scaffold_app();

    let response = app.oneshot(status_request("not-a-job")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_metadata_not_an_object_when_submitted_then_rejected() {
    let app = scaffold_app();

    let response = app
        .oneshot(submit_request(json!({
            "question_metadata": "strategy",
            "question": "Q",
            "organization_answer": "A"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn given_missing_body_when_submitted_then_returns_bad_request() {
    let app = scaffold_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/jobs")
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_versioned_route_when_submitted_then_job_is_reachable_on_both_paths() {
    let app = scaffold_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/jobs")
                .header("content-type", "application/json")
                .body(Body::from(sample_request().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/jobs/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_request_id_header_when_calling_api_then_it_is_echoed() {
    let app = scaffold_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "req-42"
    );
}

#[tokio::test]
async fn given_blank_request_id_header_when_submitting_then_generated_id_is_echoed() {
    let app = scaffold_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/jobs")
                .header("content-type", "application/json")
                .header(REQUEST_ID_HEADER, "  ")
                .body(Body::from(
                    json!({"question_metadata": {}, "question": "Q", "organization_answer": "A"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let echoed = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(echoed).is_ok());
}
