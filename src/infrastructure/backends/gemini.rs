#[cfg(test)]
#[path = "gemini_test.rs"]
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

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    role: String,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Gemini calls the assistant "model" and takes system prompts as a separate
/// instruction.
fn to_request_body(request: &CompletionRequest) -> CompletionRequestBody {
    let system_parts = request
        .messages
        .iter()
        .filter(|message| return message.role == Role::System)
        .map(|message| {
            return ContentPart {
                text: message.content.to_string(),
            };
        })
        .collect::<Vec<ContentPart>>();

    let contents = request
        .messages
        .iter()
        .filter(|message| return message.role != Role::System)
        .map(|message| {
            let role = match message.role {
                Role::Assistant => "model",
                _ => "user",
            };
            return Content {
                role: role.to_string(),
                parts: vec![ContentPart {
                    text: message.content.to_string(),
                }],
            };
        })
        .collect::<Vec<Content>>();

    let mut system_instruction = None;
    if !system_parts.is_empty() {
        system_instruction = Some(Content {
            role: "".to_string(),
            parts: system_parts,
        });
    }

    return CompletionRequestBody {
        system_instruction,
        contents,
        generation_config: GenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        },
    };
}

pub struct Gemini {
    url: String,
    token: String,
}

impl From<&ProviderProfile> for Gemini {
    fn from(profile: &ProviderProfile) -> Gemini {
        return Gemini {
            url: profile.endpoint.trim_end_matches('/').to_string(),
            token: profile.credential.to_string(),
        };
    }
}

#[async_trait]
impl Backend for Gemini {
    fn style(&self) -> RequestStyle {
        return RequestStyle::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        request: &'a CompletionRequest,
    ) -> Result<String, CompletionError> {
        let req = to_request_body(request);

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent",
                url = self.url,
                model = request.model_id,
            ))
            .header("x-goog-api-key", &self.token)
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status = status, "Failed to make completion request to Gemini");
            return Err(CompletionError::new(
                CompletionErrorKind::Status(status),
                &format!("Gemini rejected the request. {body}"),
            ));
        }

        let body = res.text().await?;
        let ores: GenerateContentResponse =
            serde_json::from_str(&body).map_err(CompletionError::malformed)?;
        tracing::debug!(body = ?ores, "Completion response");

        let text = ores
            .candidates
            .first()
            .map(|candidate| {
                return candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| return part.text.as_str())
                    .collect::<Vec<&str>>()
                    .join("");
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CompletionError::new(
                CompletionErrorKind::Malformed,
                "Gemini returned no completion candidates",
            ));
        }

        return Ok(text);
    }
}
