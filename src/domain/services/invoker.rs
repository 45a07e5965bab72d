#[cfg(test)]
#[path = "invoker_test.rs"]
mod tests;

use std::time::Duration;

use tokio::time;

use crate::domain::models::BackendBox;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionErrorKind;
use crate::domain::models::CompletionRequest;
use crate::domain::models::CompletionResult;
use crate::domain::models::ProviderProfile;
use crate::infrastructure::backends::BackendManager;

pub struct CompletionInvoker {}

impl CompletionInvoker {
    pub async fn invoke(
        request: &CompletionRequest,
        profile: &ProviderProfile,
        timeout: Duration,
    ) -> CompletionResult {
        let backend = BackendManager::get(profile);
        return CompletionInvoker::invoke_backend(&backend, request, &profile.label, timeout).await;
    }

    /// Single attempt against the backend. Every failure, including the
    /// timeout, comes back as [`CompletionResult::Error`].
    pub async fn invoke_backend(
        backend: &BackendBox,
        request: &CompletionRequest,
        provider_label: &str,
        timeout: Duration,
    ) -> CompletionResult {
        tracing::debug!(
            provider = provider_label,
            style = backend.style().to_string(),
            model = request.model_id,
            messages = request.messages.len(),
            temperature = request.temperature,
            "Sending completion request"
        );

        let res = match time::timeout(timeout, backend.get_completion(request)).await {
            Ok(res) => res,
            Err(_) => Err(CompletionError::new(
                CompletionErrorKind::Timeout,
                &format!(
                    "{provider_label} did not answer within {}ms",
                    timeout.as_millis()
                ),
            )),
        };

        match res {
            Ok(text) => {
                return CompletionResult::Success {
                    text: text.trim().to_string(),
                };
            }
            Err(err) => {
                tracing::error!(
                    provider = provider_label,
                    model = request.model_id,
                    error = err.to_string(),
                    "Completion request failed"
                );
                return CompletionResult::Error(err);
            }
        }
    }
}
