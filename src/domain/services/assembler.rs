#[cfg(test)]
#[path = "assembler_test.rs"]
mod tests;

use crate::domain::models::ChatError;
use crate::domain::models::CompletionRequest;
use crate::domain::models::Message;
use crate::domain::models::ProviderProfile;
use crate::domain::models::MAX_OUTPUT_TOKENS;

pub struct RequestAssembler {}

impl RequestAssembler {
    pub fn assemble(
        windowed_history: &[Message],
        user_input: &str,
        temperature: f32,
        provider: &ProviderProfile,
    ) -> Result<CompletionRequest, ChatError> {
        if user_input.trim().is_empty() {
            return Err(ChatError::Validation("Please enter a message.".to_string()));
        }

        let mut messages = windowed_history.to_vec();
        messages.push(Message::user(user_input));

        return Ok(CompletionRequest {
            messages,
            temperature,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            model_id: provider.wire_model_id.to_string(),
        });
    }
}
