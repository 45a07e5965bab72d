#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::models::Backend;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionErrorKind;
use crate::domain::models::CompletionRequest;
use crate::domain::models::ProviderProfile;
use crate::domain::models::RequestStyle;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct MessageRequest {
    pub role: String,
    pub content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<MessageRequest>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct ChoiceMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct ChoiceResponse {
    pub message: ChoiceMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct ChatCompletionResponse {
    pub choices: Vec<ChoiceResponse>,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(request: &CompletionRequest) -> ChatCompletionRequest {
        return ChatCompletionRequest {
            model: request.model_id.to_string(),
            messages: request
                .messages
                .iter()
                .map(|message| {
                    return MessageRequest {
                        role: message.role.to_string(),
                        content: message.content.to_string(),
                    };
                })
                .collect(),
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        };
    }
}

/// Posts an OpenAI-compatible chat completion with bearer auth. Shared with
/// providers that expose the same schema under a different URL.
pub(super) async fn post_chat_completion(
    provider_name: &str,
    url: &str,
    token: &str,
    request: &CompletionRequest,
) -> Result<String, CompletionError> {
    let req = ChatCompletionRequest::from(request);

    let res = reqwest::Client::new()
        .post(url)
        .header("Authorization", format!("Bearer {token}"))
        .json(&req)
        .send()
        .await?;

    if !res.status().is_success() {
        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        tracing::error!(
            status = status,
            provider = provider_name,
            "Failed to make completion request"
        );
        return Err(CompletionError::new(
            CompletionErrorKind::Status(status),
            &format!("{provider_name} rejected the request. {body}"),
        ));
    }

    let body = res.text().await?;
    let ores: ChatCompletionResponse =
        serde_json::from_str(&body).map_err(CompletionError::malformed)?;
    tracing::debug!(body = ?ores, "Completion response");

    let text = ores
        .choices
        .into_iter()
        .next()
        .and_then(|choice| return choice.message.content)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CompletionError::new(
            CompletionErrorKind::Malformed,
            &format!("{provider_name} returned no completion text"),
        ));
    }

    return Ok(text);
}

pub struct OpenAI {
    url: String,
    token: String,
}

impl From<&ProviderProfile> for OpenAI {
    fn from(profile: &ProviderProfile) -> OpenAI {
        return OpenAI {
            url: profile.endpoint.trim_end_matches('/').to_string(),
            token: profile.credential.to_string(),
        };
    }
}

#[async_trait]
impl Backend for OpenAI {
    fn style(&self) -> RequestStyle {
        return RequestStyle::OpenAI;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        request: &'a CompletionRequest,
    ) -> Result<String, CompletionError> {
        let url = format!("{url}/v1/chat/completions", url = self.url);
        return post_chat_completion("OpenAI", &url, &self.token, request).await;
    }
}
