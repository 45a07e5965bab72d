#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use super::CompletionInvoker;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Exchange;
use crate::domain::models::ExchangeOutcome;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /models (/ml) - Lists every model with its availability and prices.
- /model (/m) [MODEL_NAME,MODEL_INDEX] - Sets the active model. You can pass either the model name, or the index from /models.
- /temperature (/t) [VALUE] - Sets the sampling temperature, between 0.0 and 2.0.
- /project (/p) [PROJECT_NAME,PROJECT_INDEX] - Lists projects, or switches to the given one.
- /reset (/clear) - Starts the conversation over.
- /quit /exit (/q) - Exit ALTAM.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

fn request_timeout() -> Duration {
    let millis = Config::get(ConfigKey::RequestTimeout)
        .parse::<u64>()
        .unwrap_or(30000);

    return Duration::from_millis(millis);
}

async fn run_exchange(exchange: Exchange, timeout: Duration) -> ExchangeOutcome {
    let result = CompletionInvoker::invoke(&exchange.request, &exchange.provider, timeout).await;

    return ExchangeOutcome {
        session_id: exchange.session_id,
        user_input: exchange.user_input,
        result,
    };
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs exchanges one after another, in the order they were submitted.
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let timeout = request_timeout();

        loop {
            let action = match rx.recv().await {
                Some(action) => action,
                None => return Ok(()),
            };

            match action {
                Action::BackendRequest(exchange) => {
                    let outcome = tokio::spawn(run_exchange(exchange, timeout)).await?;
                    tracing::debug!(
                        session_id = outcome.session_id,
                        success = outcome.result.is_success(),
                        "Exchange settled"
                    );

                    // The UI has shut down.
                    if tx.send(Event::BackendResponse(outcome)).is_err() {
                        return Ok(());
                    }
                }
            }
        }
    }
}
