use super::CompletionError;

/// Failures surfaced to the user as notices. None of these end the process.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChatError {
    #[error("Model unavailable: {0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("The model request failed with {0}")]
    Completion(#[from] CompletionError),
    #[error("A message is already being answered. Please wait for it to finish.")]
    Busy,
    #[error("No session found for id {0}")]
    SessionNotFound(String),
}
