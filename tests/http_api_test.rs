//! HTTP handler tests, invoking the axum handlers directly.

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Query, State};
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use taskrank::adapters::http::tasks_http::{
    analyze_tasks, health_check, suggest_info, suggest_tasks, AnalysisParams,
};
use taskrank::adapters::http::{AppState, TasksHttpConfig, TasksHttpServer};
use taskrank::{Strategy, TaskAnalysisService};
use tower::ServiceExt;

fn state() -> Arc<AppState> {
    Arc::new(AppState::new(
        TaskAnalysisService::default(),
        Strategy::SmartBalance,
    ))
}

fn params(strategy: Option<&str>) -> Query<AnalysisParams> {
    Query(AnalysisParams {
        strategy: strategy.map(str::to_string),
        today: Some("2025-03-10".to_string()),
    })
}

fn body(value: Value) -> Bytes {
    Bytes::from(value.to_string())
}

#[tokio::test]
async fn test_analyze_returns_ranked_tasks() {
    let payload = json!([
        {"id": "a", "title": "Low", "importance": 2, "estimated_hours": 8},
        {"id": "b", "title": "Urgent", "importance": 9, "due_date": "2025-03-09"},
        {"id": "c", "dependencies": ["b"]}
    ]);

    let response = analyze_tasks(State(state()), Method::POST, params(None), body(payload))
        .await
        .unwrap();
    let value = serde_json::to_value(&response.0).unwrap();

    assert_eq!(value["strategy"], json!("smart_balance"));
    assert_eq!(value["tasks"][0]["id"], json!("b"));
    assert_eq!(value["tasks"][0]["flags"]["overdue"], json!(true));
    assert_eq!(value["tasks"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["dependency_cycles"], json!([]));
}

#[tokio::test]
async fn test_analyze_accepts_tasks_envelope_and_strategy() {
    let payload = json!({"tasks": [{"id": 1, "estimated_hours": 0.5}]});

    let response = analyze_tasks(
        State(state()),
        Method::POST,
        params(Some("fastest_wins")),
        body(payload),
    )
    .await
    .unwrap();

    assert_eq!(response.0.strategy, Strategy::FastestWins);
    // 40 + 20 + 40
    assert_eq!(response.0.tasks[0].score, 100.0);
}

#[tokio::test]
async fn test_analyze_unknown_strategy_falls_back() {
    let response = analyze_tasks(
        State(state()),
        Method::POST,
        params(Some("chaos")),
        body(json!([{"id": 1}])),
    )
    .await
    .unwrap();
    assert_eq!(response.0.strategy, Strategy::SmartBalance);
}

#[tokio::test]
async fn test_analyze_reports_cycles() {
    let payload = json!([
        {"id": "a", "dependencies": ["b"]},
        {"id": "b", "dependencies": ["a"]}
    ]);
    let response = analyze_tasks(State(state()), Method::POST, params(None), body(payload))
        .await
        .unwrap();

    let value = serde_json::to_value(&response.0).unwrap();
    assert_eq!(value["dependency_cycles"], json!([["a", "b", "a"]]));
}

#[tokio::test]
async fn test_analyze_rejects_non_post() {
    let (status, error) = analyze_tasks(
        State(state()),
        Method::GET,
        params(None),
        Bytes::new(),
    )
    .await
    .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.0.error, "Only POST allowed.");
}

#[tokio::test]
async fn test_analyze_rejects_invalid_json() {
    let (status, error) = analyze_tasks(
        State(state()),
        Method::POST,
        params(None),
        Bytes::from_static(b"{oops"),
    )
    .await
    .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.0.error, "Invalid JSON payload.");
}

#[tokio::test]
async fn test_analyze_rejects_bad_envelope() {
    let (status, error) = analyze_tasks(
        State(state()),
        Method::POST,
        params(None),
        body(json!({"items": []})),
    )
    .await
    .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error.0.error,
        "Payload must be a list of tasks or an object with 'tasks' key."
    );
}

#[tokio::test]
async fn test_analyze_rejects_non_numeric_field() {
    let (status, error) = analyze_tasks(
        State(state()),
        Method::POST,
        params(None),
        body(json!([{"id": "x", "importance": "very"}])),
    )
    .await
    .unwrap_err();

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error.0.code, "INVALID_TASK_FIELD");
}

#[tokio::test]
async fn test_analyze_rejects_bad_today() {
    let query = Query(AnalysisParams {
        strategy: None,
        today: Some("tomorrow".to_string()),
    });
    let (status, error) = analyze_tasks(State(state()), Method::POST, query, body(json!([])))
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.0.code, "INVALID_DATE");
}

#[tokio::test]
async fn test_suggest_info() {
    let response = suggest_info().await;
    assert!(response.0.info.starts_with("POST a list of tasks"));
}

#[tokio::test]
async fn test_suggest_top_three() {
    let payload = json!([
        {"id": 1, "title": "one", "importance": 1},
        {"id": 2, "title": "two", "importance": 2},
        {"id": 3, "title": "three", "importance": 3},
        {"id": 4, "title": "four", "importance": 4}
    ]);

    let response = suggest_tasks(State(state()), params(None), body(payload))
        .await
        .unwrap();
    let value = serde_json::to_value(&response.0).unwrap();

    let top = value["top_3"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0]["id"], json!(4));
    assert_eq!(top[0]["title"], json!("four"));
    assert!(top[0]["why"].as_str().unwrap().contains("importance 4"));
}

#[tokio::test]
async fn test_suggest_echoes_loose_ids_and_titles() {
    let payload = json!([
        {"id": 1.5, "title": 42, "importance": 9},
        {"id": "a", "dependencies": [null]}
    ]);

    let response = suggest_tasks(State(state()), params(None), body(payload))
        .await
        .unwrap();
    let value = serde_json::to_value(&response.0).unwrap();

    let top = value["top_3"].as_array().unwrap();
    assert_eq!(top[0]["id"], json!(1.5));
    assert_eq!(top[0]["title"], json!(42));
    assert_eq!(top[0]["score"], json!(92.0));
    // null dependency never resolves: 40 + 20 - 30
    assert_eq!(top[1]["score"], json!(30.0));
    assert_eq!(top[1]["title"], Value::Null);
}

#[tokio::test]
async fn test_suggest_rejects_invalid_json() {
    let (status, _) = suggest_tasks(State(state()), params(None), Bytes::from_static(b"nope"))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_check_and_router_build() {
    assert_eq!(health_check().await, "OK");

    let server = TasksHttpServer::new(
        AppState::new(TaskAnalysisService::default(), Strategy::HighImpact),
        TasksHttpConfig {
            enable_cors: false,
            ..TasksHttpConfig::default()
        },
    );
    let _router = server.build_router();
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let router = TasksHttpServer::new(
        AppState::new(TaskAnalysisService::default(), Strategy::SmartBalance),
        TasksHttpConfig::default(),
    )
    .build_router();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_router_analyze_post() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks/analyze/?strategy=high_impact&today=2025-03-10")
        .header("content-type", "application/json")
        .body(Body::from(r#"[{"id": 1, "importance": 4}, {"id": 2, "importance": 7}]"#))
        .unwrap();

    let (status, value) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["strategy"], json!("high_impact"));
    assert_eq!(value["tasks"][0]["id"], json!(2));
}

#[tokio::test]
async fn test_router_analyze_put_is_bad_request() {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/tasks/analyze/")
        .body(Body::empty())
        .unwrap();

    let (status, value) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], json!("Only POST allowed."));
}

#[tokio::test]
async fn test_router_suggest_get_returns_info() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks/suggest/")
        .body(Body::empty())
        .unwrap();

    let (status, value) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(value["info"].as_str().is_some());
}
