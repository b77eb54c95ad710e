//! Tester error types

use std::time::Duration;
use thiserror::Error;

/// Result type for tester operations
pub type TesterResult<T> = Result<T, TesterError>;

/// Tester error types
#[derive(Error, Debug)]
pub enum TesterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API call {operation} failed with status {status}: {body}")]
    Api {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Assertion failed: {message}")]
    Assertion { message: String },

    #[error("{resource} {id} not found")]
    NotFound { resource: String, id: String },

    #[error("{operation} did not complete within {elapsed:?} ({attempts} attempts)")]
    Timeout {
        operation: String,
        elapsed: Duration,
        attempts: u32,
    },

    #[error("{operation} was cancelled")]
    Cancelled { operation: String },

    #[error("Did not find component param: {name}")]
    MissingParam { name: String },

    #[error("Param value wrong at observation {index}. Expected: {expected} Received: {received}")]
    ParamMismatch {
        index: usize,
        expected: String,
        received: String,
    },

    #[error("no {name} provided")]
    MissingCredential { name: String },

    #[error("suite context has no {field}; an earlier step must produce it")]
    MissingContext { field: &'static str },

    #[error("Kafka error: {message}")]
    Kafka { message: String },

    #[error("Mailbox error: {message}")]
    Mailbox { message: String },

    #[error("Control channel error: {message}")]
    WebSocket { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{step}: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<TesterError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TesterError {
    pub fn assertion(message: impl Into<String>) -> Self {
        TesterError::Assertion {
            message: message.into(),
        }
    }

    pub fn in_step(self, step: &str) -> Self {
        TesterError::Step {
            step: step.to_string(),
            source: Box::new(self),
        }
    }

    /// Innermost error, looking through step wrappers
    pub fn root(&self) -> &TesterError {
        match self {
            TesterError::Step { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<shared::SharedError> for TesterError {
    fn from(e: shared::SharedError) -> Self {
        TesterError::WebSocket {
            message: e.to_string(),
        }
    }
}

impl From<rskafka::client::error::Error> for TesterError {
    fn from(e: rskafka::client::error::Error) -> Self {
        TesterError::Kafka {
            message: e.to_string(),
        }
    }
}

impl From<async_imap::error::Error> for TesterError {
    fn from(e: async_imap::error::Error) -> Self {
        TesterError::Mailbox {
            message: e.to_string(),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for TesterError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        TesterError::WebSocket {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_step_wrapping_keeps_root() {
        let err = TesterError::MissingParam { name: "LED".into() }.in_step("Shall send observation and check rules");

        assert_eq!(
            err.to_string(),
            "Shall send observation and check rules: Did not find component param: LED"
        );
        assert_matches!(err.root(), TesterError::MissingParam { name } if name == "LED");
    }

    #[test]
    fn test_param_mismatch_message() {
        let err = TesterError::ParamMismatch {
            index: 5,
            expected: "0".into(),
            received: "1".into(),
        };
        assert!(err.to_string().contains("Expected: 0 Received: 1"));
    }
}
