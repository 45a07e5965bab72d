use std::time::Duration;

use async_trait::async_trait;
use test_utils::openai_completion_fixture;

use super::CompletionInvoker;
use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionErrorKind;
use crate::domain::models::CompletionRequest;
use crate::domain::models::CompletionResult;
use crate::domain::models::Message;
use crate::domain::models::ProviderProfile;
use crate::domain::models::RequestStyle;

struct SlowBackend {}

#[async_trait]
impl Backend for SlowBackend {
    fn style(&self) -> RequestStyle {
        return RequestStyle::RawHttp;
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        _request: &'a CompletionRequest,
    ) -> Result<String, CompletionError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        return Ok("too late".to_string());
    }
}

fn request() -> CompletionRequest {
    return CompletionRequest {
        messages: vec![Message::user("Hello")],
        temperature: 0.7,
        max_output_tokens: 200,
        model_id: "gpt-3.5-turbo".to_string(),
    };
}

fn profile(url: &str) -> ProviderProfile {
    return ProviderProfile {
        label: "GPT-3.5".to_string(),
        wire_model_id: "gpt-3.5-turbo".to_string(),
        endpoint: url.to_string(),
        credential: "abc".to_string(),
        request_style: RequestStyle::OpenAI,
        price_per_input_token: 0.5e-6,
        price_per_output_token: 1.5e-6,
    };
}

#[tokio::test]
async fn it_trims_successful_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(openai_completion_fixture("\\n\\nHi there!  "))
        .create_async()
        .await;

    let res =
        CompletionInvoker::invoke(&request(), &profile(&server.url()), Duration::from_secs(5))
            .await;
    mock.assert_async().await;

    assert_eq!(
        res,
        CompletionResult::Success {
            text: "Hi there!".to_string()
        }
    );
}

#[tokio::test]
async fn it_makes_a_single_attempt() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let res =
        CompletionInvoker::invoke(&request(), &profile(&server.url()), Duration::from_secs(5))
            .await;
    mock.assert_async().await;

    match res {
        CompletionResult::Error(err) => assert_eq!(err.kind, CompletionErrorKind::Status(500)),
        _ => panic!("expected an error"),
    }
}

#[tokio::test]
async fn it_times_out() {
    let backend: BackendBox = Box::new(SlowBackend {});
    let res = CompletionInvoker::invoke_backend(
        &backend,
        &request(),
        "Groq/Mixtral",
        Duration::from_millis(20),
    )
    .await;

    match res {
        CompletionResult::Error(err) => {
            assert_eq!(err.kind, CompletionErrorKind::Timeout);
            assert_eq!(err.message, "Groq/Mixtral did not answer within 20ms");
        }
        _ => panic!("expected a timeout"),
    }
}
