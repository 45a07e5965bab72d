#[cfg(test)]
#[path = "raw_http_test.rs"]
mod tests;

use async_trait::async_trait;

use super::openai::post_chat_completion;
use crate::domain::models::Backend;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionRequest;
use crate::domain::models::ProviderProfile;
use crate::domain::models::RequestStyle;

/// OpenAI-compatible API posted to a fully qualified endpoint, as Groq
/// exposes it.
pub struct RawHttp {
    label: String,
    url: String,
    token: String,
}

impl From<&ProviderProfile> for RawHttp {
    fn from(profile: &ProviderProfile) -> RawHttp {
        return RawHttp {
            label: profile.label.to_string(),
            url: profile.endpoint.to_string(),
            token: profile.credential.to_string(),
        };
    }
}

#[async_trait]
impl Backend for RawHttp {
    fn style(&self) -> RequestStyle {
        return RequestStyle::RawHttp;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        request: &'a CompletionRequest,
    ) -> Result<String, CompletionError> {
        return post_chat_completion(&self.label, &self.url, &self.token, request).await;
    }
}
