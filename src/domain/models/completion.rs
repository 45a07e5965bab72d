#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;

use std::fmt;

use super::Message;

/// Cap on generated tokens for every request.
pub const MAX_OUTPUT_TOKENS: u32 = 200;

/// Provider-agnostic request. Backends map it into their own wire schema.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub model_id: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompletionErrorKind {
    /// Connection refused, DNS failure, reset stream and friends.
    Transport,
    /// The provider answered with a non-2xx status.
    Status(u16),
    /// The body could not be parsed or held no candidate text.
    Malformed,
    Timeout,
}

impl fmt::Display for CompletionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompletionErrorKind::Transport => return write!(f, "network error"),
            CompletionErrorKind::Status(status) => return write!(f, "HTTP {status}"),
            CompletionErrorKind::Malformed => return write!(f, "malformed response"),
            CompletionErrorKind::Timeout => return write!(f, "timeout"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CompletionError {
    pub kind: CompletionErrorKind,
    pub message: String,
}

impl CompletionError {
    pub fn new(kind: CompletionErrorKind, message: &str) -> CompletionError {
        return CompletionError {
            kind,
            message: message.to_string(),
        };
    }

    pub fn malformed(err: serde_json::Error) -> CompletionError {
        return CompletionError::new(CompletionErrorKind::Malformed, &err.to_string());
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> CompletionError {
        let kind = if err.is_timeout() {
            CompletionErrorKind::Timeout
        } else if err.is_decode() {
            CompletionErrorKind::Malformed
        } else if let Some(status) = err.status() {
            CompletionErrorKind::Status(status.as_u16())
        } else {
            CompletionErrorKind::Transport
        };

        // Request URLs can carry credentials in their query string.
        return CompletionError::new(kind, &err.without_url().to_string());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CompletionResult {
    Success { text: String },
    Error(CompletionError),
}

impl CompletionResult {
    pub fn is_success(&self) -> bool {
        return matches!(self, CompletionResult::Success { .. });
    }
}
