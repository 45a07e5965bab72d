use async_trait::async_trait;

use super::CompletionError;
use super::CompletionRequest;
use super::RequestStyle;

pub type BackendBox = Box<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    fn style(&self) -> RequestStyle;

    /// Sends a single completion request and returns the assistant's text.
    /// There are no retries; every transport, status or parsing failure is
    /// returned as a [`CompletionError`].
    async fn get_completion<'a>(
        &self,
        request: &'a CompletionRequest,
    ) -> Result<String, CompletionError>;
}
