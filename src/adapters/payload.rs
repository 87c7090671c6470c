//! Request payload decoding shared by the HTTP and CLI surfaces.
//!
//! A payload is either a bare JSON array of task objects or an object with a
//! `tasks` array. Records without an id (or with a null id) are assigned
//! `tmp_<index>` so every task in the batch is addressable.

use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::TaskRecord;

pub const INVALID_ENVELOPE: &str =
    "Payload must be a list of tasks or an object with 'tasks' key.";

/// Decode a raw JSON document into task records.
pub fn parse_task_payload(payload: Value) -> DomainResult<Vec<TaskRecord>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tasks") {
            Some(Value::Array(items)) => items,
            _ => return Err(DomainError::InvalidPayload(INVALID_ENVELOPE.to_string())),
        },
        _ => return Err(DomainError::InvalidPayload(INVALID_ENVELOPE.to_string())),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| parse_task(idx, item))
        .collect()
}

/// Decode raw text, mapping syntax errors to the payload error.
pub fn parse_task_payload_str(body: &str) -> DomainResult<Vec<TaskRecord>> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|_| DomainError::InvalidPayload("Invalid JSON payload.".to_string()))?;
    parse_task_payload(payload)
}

fn parse_task(idx: usize, item: Value) -> DomainResult<TaskRecord> {
    let Value::Object(mut fields) = item else {
        return Err(DomainError::InvalidPayload(format!(
            "Task at index {idx} must be an object."
        )));
    };

    if fields.get("id").is_none_or(Value::is_null) {
        fields.insert("id".to_string(), Value::String(format!("tmp_{idx}")));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| DomainError::InvalidPayload(format!("Task at index {idx}: {e}")))
}
