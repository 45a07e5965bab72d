#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;

use std::fmt;

/// Wire format and credential scheme used to talk to a provider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum RequestStyle {
    #[strum(serialize = "openai")]
    OpenAI,
    #[strum(serialize = "claude")]
    Claude,
    #[strum(serialize = "gemini")]
    Gemini,
    #[strum(serialize = "raw-http")]
    RawHttp,
}

/// Static descriptor of a selectable backend model.
#[derive(Clone, PartialEq)]
pub struct ProviderProfile {
    pub label: String,
    pub wire_model_id: String,
    pub endpoint: String,
    pub credential: String,
    pub request_style: RequestStyle,
    pub price_per_input_token: f64,
    pub price_per_output_token: f64,
}

impl ProviderProfile {
    /// Prices are shown per million tokens, the unit providers publish them in.
    pub fn price_summary(&self) -> String {
        return format!(
            "input ${:.2}/1M tokens, output ${:.2}/1M tokens",
            self.price_per_input_token * 1_000_000.0,
            self.price_per_output_token * 1_000_000.0
        );
    }
}

impl fmt::Debug for ProviderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credential = if self.credential.is_empty() {
            "<missing>"
        } else {
            "<redacted>"
        };

        return f
            .debug_struct("ProviderProfile")
            .field("label", &self.label)
            .field("wire_model_id", &self.wire_model_id)
            .field("endpoint", &self.endpoint)
            .field("credential", &credential)
            .field("request_style", &self.request_style)
            .finish();
    }
}
