#[cfg(test)]
#[path = "claude_test.rs"]
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
use crate::domain::models::Role;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequestBody {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<MessageRequest>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentBlockResponse {
    #[serde(rename = "type")]
    _type: String,
    #[serde(default)]
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlockResponse>,
}

/// The Messages API takes system prompts as a top level field rather than a
/// message role. Turns are passed through in window order, so the first one
/// may be an assistant turn.
fn to_request_body(request: &CompletionRequest) -> CompletionRequestBody {
    let system_prompts = request
        .messages
        .iter()
        .filter(|message| return message.role == Role::System)
        .map(|message| return message.content.to_string())
        .collect::<Vec<String>>();

    let messages = request
        .messages
        .iter()
        .filter(|message| return message.role != Role::System)
        .map(|message| {
            return MessageRequest {
                role: message.role.to_string(),
                content: message.content.to_string(),
            };
        })
        .collect::<Vec<MessageRequest>>();

    let mut system = None;
    if !system_prompts.is_empty() {
        system = Some(system_prompts.join("\n\n"));
    }

    return CompletionRequestBody {
        model: request.model_id.to_string(),
        max_tokens: request.max_output_tokens,
        temperature: request.temperature,
        system,
        messages,
    };
}

pub struct Claude {
    url: String,
    token: String,
}

impl From<&ProviderProfile> for Claude {
    fn from(profile: &ProviderProfile) -> Claude {
        return Claude {
            url: profile.endpoint.trim_end_matches('/').to_string(),
            token: profile.credential.to_string(),
        };
    }
}

#[async_trait]
impl Backend for Claude {
    fn style(&self) -> RequestStyle {
        return RequestStyle::Claude;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        request: &'a CompletionRequest,
    ) -> Result<String, CompletionError> {
        let req = to_request_body(request);

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/messages", url = self.url))
            .header("x-api-key", &self.token)
            .header("content-type", "application/json")
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status = status, "Failed to make completion request to Claude");
            return Err(CompletionError::new(
                CompletionErrorKind::Status(status),
                &format!("Claude rejected the request. {body}"),
            ));
        }

        let body = res.text().await?;
        let ores: CompletionResponse =
            serde_json::from_str(&body).map_err(CompletionError::malformed)?;
        tracing::debug!(body = ?ores, "Completion response");

        let text = ores
            .content
            .iter()
            .filter(|block| return block._type == "text")
            .map(|block| return block.text.as_str())
            .collect::<Vec<&str>>()
            .join("");

        if text.trim().is_empty() {
            return Err(CompletionError::new(
                CompletionErrorKind::Malformed,
                "Claude returned no completion text",
            ));
        }

        return Ok(text);
    }
}
