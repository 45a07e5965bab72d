use super::CompletionRequest;
use super::CompletionResult;
use super::ProviderProfile;

/// An assembled request waiting to be sent.
#[derive(Clone, Debug)]
pub struct Exchange {
    pub session_id: String,
    pub user_input: String,
    pub provider: ProviderProfile,
    pub request: CompletionRequest,
}

/// Settled result of an [`Exchange`], routed back to the UI.
#[derive(Clone, Debug)]
pub struct ExchangeOutcome {
    pub session_id: String,
    pub user_input: String,
    pub result: CompletionResult,
}
