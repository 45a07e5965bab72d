#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use crate::domain::models::ChatError;
use crate::domain::models::CompletionResult;
use crate::domain::models::Message;
use crate::domain::models::Session;

/// Last `size` turns of the history in their original order. The window is
/// positional, so the system turn is dropped once the history outgrows it.
pub fn window(history: &[Message], size: usize) -> Vec<Message> {
    let start = history.len().saturating_sub(size);
    return history[start..].to_vec();
}

pub struct HistoryUpdater {}

impl HistoryUpdater {
    /// Settles an exchange. History only grows on success, and the busy flag
    /// is cleared either way.
    pub fn apply(
        session: &mut Session,
        user_input: &str,
        result: &CompletionResult,
    ) -> Result<(), ChatError> {
        session.busy = false;

        match result {
            CompletionResult::Success { text } => {
                session.history.push(Message::user(user_input));
                session.history.push(Message::assistant(text));
                tracing::debug!(
                    session_id = session.id,
                    history_len = session.history.len(),
                    "Exchange appended"
                );

                return Ok(());
            }
            CompletionResult::Error(err) => {
                return Err(ChatError::Completion(err.clone()));
            }
        }
    }

    pub fn reset(session: &mut Session, persona: &str) {
        session.history = vec![Message::system(persona)];
    }
}
