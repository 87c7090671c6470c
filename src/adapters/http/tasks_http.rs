//! Tasks HTTP Server.
//!
//! Stateless JSON endpoints: every request carries its own task batch and
//! gets back the ranked result.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::Json,
    routing::{any, get},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::payload::parse_task_payload_str;
use crate::domain::errors::DomainError;
use crate::domain::models::{ServerConfig, Strategy, TaskRecord};
use crate::services::{local_today, AnalysisReport, SuggestionReport, TaskAnalysisService};

const SUGGEST_INFO: &str = "POST a list of tasks (JSON array) to get top-3 suggestions. \
Use query param ?strategy=... to choose strategy.";

/// Configuration for the tasks HTTP server.
#[derive(Debug, Clone)]
pub struct TasksHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for TasksHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for TasksHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Query parameters accepted by both analysis endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisParams {
    #[serde(default)]
    pub strategy: Option<String>,
    /// Reference date override, `YYYY-MM-DD`
    #[serde(default)]
    pub today: Option<String>,
}

/// Response for `GET /api/tasks/suggest/`.
#[derive(Debug, Serialize)]
pub struct SuggestInfoResponse {
    pub info: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
        }),
    )
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

fn domain_error(err: DomainError) -> ApiError {
    let status = match err {
        DomainError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidNumericField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::from(err)))
}

/// Shared state for the tasks HTTP server.
pub struct AppState {
    pub service: TaskAnalysisService,
    /// Used when a request names no strategy
    pub default_strategy: Strategy,
}

impl AppState {
    pub fn new(service: TaskAnalysisService, default_strategy: Strategy) -> Self {
        Self {
            service,
            default_strategy,
        }
    }

    fn resolve(&self, params: &AnalysisParams) -> Result<(Strategy, NaiveDate), ApiError> {
        let strategy = match params.strategy.as_deref() {
            Some(name) => Strategy::from_name(Some(name)),
            None => self.default_strategy,
        };
        let today = match params.today.as_deref() {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                api_error(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid 'today' date: {raw}. Expected YYYY-MM-DD."),
                    "INVALID_DATE",
                )
            })?,
            None => local_today(),
        };
        Ok((strategy, today))
    }
}

/// Tasks HTTP Server.
pub struct TasksHttpServer {
    config: TasksHttpConfig,
    state: Arc<AppState>,
}

impl TasksHttpServer {
    pub fn new(state: AppState, config: TasksHttpConfig) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let app = Router::new()
            .route("/api/tasks/analyze/", any(analyze_tasks))
            .route("/api/tasks/suggest/", get(suggest_info).post(suggest_tasks))
            .route("/health", get(health_check))
            .with_state(Arc::clone(&self.state));

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the server.
    pub async fn serve(self) -> anyhow::Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.build_router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Tasks HTTP server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

pub async fn health_check() -> &'static str {
    "OK"
}

/// `/api/tasks/analyze/`: every method is routed here so non-POST requests
/// get a 400 rather than a 405.
pub async fn analyze_tasks(
    State(state): State<Arc<AppState>>,
    method: Method,
    Query(params): Query<AnalysisParams>,
    body: Bytes,
) -> Result<Json<AnalysisReport>, ApiError> {
    if method != Method::POST {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Only POST allowed.",
            "METHOD_NOT_ALLOWED",
        ));
    }

    let tasks = decode_body(&body)?;
    let (strategy, today) = state.resolve(&params)?;

    state
        .service
        .analyze(tasks, strategy, today)
        .map(Json)
        .map_err(domain_error)
}

pub async fn suggest_info() -> Json<SuggestInfoResponse> {
    Json(SuggestInfoResponse {
        info: SUGGEST_INFO.to_string(),
    })
}

pub async fn suggest_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
    body: Bytes,
) -> Result<Json<SuggestionReport>, ApiError> {
    let tasks = decode_body(&body)?;
    let (strategy, today) = state.resolve(&params)?;

    state
        .service
        .suggest(tasks, strategy, today)
        .map(Json)
        .map_err(domain_error)
}

fn decode_body(body: &[u8]) -> Result<Vec<TaskRecord>, ApiError> {
    let text = std::str::from_utf8(body).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            "Invalid JSON payload.",
            "INVALID_PAYLOAD",
        )
    })?;
    parse_task_payload_str(text).map_err(domain_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TasksHttpConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.enable_cors);
    }

    #[test]
    fn test_domain_error_status_mapping() {
        let (status, Json(body)) =
            domain_error(DomainError::InvalidPayload("Invalid JSON payload.".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_PAYLOAD");

        let (status, Json(body)) = domain_error(DomainError::InvalidNumericField {
            task_id: "a".to_string(),
            field: "importance",
            value: "\"x\"".to_string(),
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, "INVALID_TASK_FIELD");
    }

    #[test]
    fn test_resolve_params() {
        let state = AppState::new(TaskAnalysisService::default(), Strategy::HighImpact);

        let (strategy, _) = state.resolve(&AnalysisParams::default()).unwrap();
        assert_eq!(strategy, Strategy::HighImpact);

        let params = AnalysisParams {
            strategy: Some("bogus".to_string()),
            today: Some("2025-03-10".to_string()),
        };
        let (strategy, today) = state.resolve(&params).unwrap();
        assert_eq!(strategy, Strategy::SmartBalance);
        assert_eq!(today, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

        let params = AnalysisParams {
            strategy: None,
            today: Some("10/03/2025".to_string()),
        };
        let (status, _) = state.resolve(&params).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
