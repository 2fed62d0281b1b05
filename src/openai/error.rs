//! Completion error types

use thiserror::Error;

/// Failure of a single completion attempt
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct CompletionError {
    pub kind: CompletionErrorKind,
    pub message: String,
}

impl CompletionError {
    pub fn new(kind: CompletionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(CompletionErrorKind::Configuration, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(CompletionErrorKind::Transport, message)
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == CompletionErrorKind::Configuration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionErrorKind {
    /// Credential or endpoint missing, or the HTTP client could not be
    /// built. No request was sent.
    Configuration,
    /// Network, timeout, auth or malformed response
    Transport,
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport(format!("request timed out: {}", err))
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl From<anyhow::Error> for CompletionError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<reqwest::Error>() {
            Ok(e) => e.into(),
            Err(e) => Self::transport(e.to_string()),
        }
    }
}
