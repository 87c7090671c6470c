//! HTTP surface for the analysis engine.

pub mod tasks_http;

pub use tasks_http::{AppState, ErrorResponse, TasksHttpConfig, TasksHttpServer};
