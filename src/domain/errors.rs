//! Domain errors for the taskrank engine.

use thiserror::Error;

/// Domain-level errors that can occur while analyzing a task batch.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The payload was neither a task list nor an object holding one.
    #[error("{0}")]
    InvalidPayload(String),

    /// A numeric task field could not be converted to a number.
    #[error("Task {task_id}: field '{field}' is not numeric: {value}")]
    InvalidNumericField {
        task_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Short machine-readable code used by the transport surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::InvalidNumericField { .. } => "INVALID_TASK_FIELD",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_field_message() {
        let err = DomainError::InvalidNumericField {
            task_id: "t1".to_string(),
            field: "importance",
            value: "\"high\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Task t1: field 'importance' is not numeric: \"high\""
        );
        assert_eq!(err.code(), "INVALID_TASK_FIELD");
    }

    #[test]
    fn test_payload_message_is_verbatim() {
        let err = DomainError::InvalidPayload("bad shape".to_string());
        assert_eq!(err.to_string(), "bad shape");
        assert_eq!(err.code(), "INVALID_PAYLOAD");
    }
}
