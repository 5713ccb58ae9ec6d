//! Error types for the Evolve client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EvolveError>;

#[derive(Error, Debug)]
pub enum EvolveError {
    #[error("Connection to backend failed: {reason}")]
    Transport { reason: String },

    #[error("API Error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected response shape from {endpoint}: expected {expected}, found {found}")]
    UnexpectedShape {
        endpoint: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Backend unavailable: every dashboard resource failed to load")]
    BackendUnavailable,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

impl EvolveError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Human-readable name of a JSON value's container kind.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
