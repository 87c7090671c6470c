//! Adapters: transport-facing edges of the engine.
//!
//! - `payload`: JSON request decoding shared by every surface
//! - `http`: axum service exposing analyze and suggest

pub mod http;
pub mod payload;

pub use payload::{parse_task_payload, parse_task_payload_str};
