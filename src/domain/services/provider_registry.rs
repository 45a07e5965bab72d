#[cfg(test)]
#[path = "provider_registry_test.rs"]
mod tests;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatError;
use crate::domain::models::ProviderProfile;
use crate::domain::models::RequestStyle;

struct ProviderDefinition {
    label: &'static str,
    request_style: RequestStyle,
    wire_model_id: &'static str,
    price_per_input_token: f64,
    price_per_output_token: f64,
    url_key: ConfigKey,
    token_key: ConfigKey,
}

const PROVIDERS: [ProviderDefinition; 5] = [
    ProviderDefinition {
        label: "GPT-3.5",
        request_style: RequestStyle::OpenAI,
        wire_model_id: "gpt-3.5-turbo",
        price_per_input_token: 0.5e-6,
        price_per_output_token: 1.5e-6,
        url_key: ConfigKey::OpenaiURL,
        token_key: ConfigKey::OpenaiToken,
    },
    ProviderDefinition {
        label: "GPT-4",
        request_style: RequestStyle::OpenAI,
        wire_model_id: "gpt-4o",
        price_per_input_token: 5e-6,
        price_per_output_token: 15e-6,
        url_key: ConfigKey::OpenaiURL,
        token_key: ConfigKey::OpenaiToken,
    },
    ProviderDefinition {
        label: "Claude 3.5 Sonnet",
        request_style: RequestStyle::Claude,
        wire_model_id: "claude-3-5-sonnet-20240620",
        price_per_input_token: 3e-6,
        price_per_output_token: 15e-6,
        url_key: ConfigKey::ClaudeURL,
        token_key: ConfigKey::ClaudeToken,
    },
    ProviderDefinition {
        label: "Gemini 1.5 Pro",
        request_style: RequestStyle::Gemini,
        wire_model_id: "gemini-1.5-pro-latest",
        price_per_input_token: 3.5e-6,
        price_per_output_token: 10.5e-6,
        url_key: ConfigKey::GeminiURL,
        token_key: ConfigKey::GeminiToken,
    },
    ProviderDefinition {
        label: "Groq/Mixtral",
        request_style: RequestStyle::RawHttp,
        wire_model_id: "mixtral-8x7b-32768",
        price_per_input_token: 3e-6,
        price_per_output_token: 15e-6,
        url_key: ConfigKey::GroqURL,
        token_key: ConfigKey::GroqToken,
    },
];

#[derive(Clone, Debug)]
pub struct ProviderEntry {
    pub profile: ProviderProfile,
    pub available: bool,
    /// Flag users set to make the provider available.
    pub token_flag: String,
}

/// Fixed set of selectable providers. Availability is decided once when the
/// registry is built.
#[derive(Clone, Debug)]
pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
}

impl ProviderRegistry {
    /// Labels accepted by `--provider`, in listing order.
    pub fn labels() -> Vec<&'static str> {
        return PROVIDERS
            .iter()
            .map(|definition| return definition.label)
            .collect();
    }

    pub fn new(entries: Vec<ProviderEntry>) -> ProviderRegistry {
        return ProviderRegistry { entries };
    }

    pub fn from_config() -> ProviderRegistry {
        let entries = PROVIDERS
            .iter()
            .map(|definition| {
                let profile = ProviderProfile {
                    label: definition.label.to_string(),
                    wire_model_id: definition.wire_model_id.to_string(),
                    endpoint: Config::get(definition.url_key),
                    credential: Config::get(definition.token_key),
                    request_style: definition.request_style,
                    price_per_input_token: definition.price_per_input_token,
                    price_per_output_token: definition.price_per_output_token,
                };
                let available = !profile.credential.trim().is_empty()
                    && !profile.endpoint.trim().is_empty();

                if !available {
                    tracing::warn!(
                        provider = definition.label,
                        token_flag = definition.token_key.to_string(),
                        "Provider unavailable, no credential configured"
                    );
                }

                return ProviderEntry {
                    profile,
                    available,
                    token_flag: format!("--{}", definition.token_key),
                };
            })
            .collect();

        return ProviderRegistry::new(entries);
    }

    pub fn list(&self) -> &[ProviderEntry] {
        return &self.entries;
    }

    fn find(&self, label: &str) -> Option<&ProviderEntry> {
        let label = label.trim();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| return entry.profile.label == label)
        {
            return Some(entry);
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| return entry.profile.label.eq_ignore_ascii_case(label))
        {
            return Some(entry);
        }

        if let Ok(idx) = label.parse::<usize>() {
            if idx >= 1 {
                return self.entries.get(idx - 1);
            }
        }

        return None;
    }

    /// Accepts a label, ignoring case, or the 1-based index from [`list`].
    ///
    /// [`list`]: ProviderRegistry::list
    pub fn resolve(&self, label: &str) -> Result<ProviderProfile, ChatError> {
        let entry = match self.find(label) {
            Some(entry) => entry,
            None => {
                return Err(ChatError::Configuration(format!(
                    "No model named '{}'. Run /models to see the available models.",
                    label.trim()
                )));
            }
        };

        if !entry.available {
            return Err(ChatError::Configuration(format!(
                "{} has no credential configured (set {}).",
                entry.profile.label, entry.token_flag
            )));
        }

        return Ok(entry.profile.clone());
    }

    /// One line per provider, used by `/models` and the `providers` command.
    pub fn describe(&self, selected: Option<&str>) -> String {
        return self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let n = idx + 1;
                let mut availability = "available".to_string();
                if !entry.available {
                    availability = format!("unavailable, set {}", entry.token_flag);
                }
                let mut marker = "";
                if selected == Some(entry.profile.label.as_str()) {
                    marker = " *";
                }

                return format!(
                    "- ({n}) {label} [{model}] {availability}, {prices}{marker}",
                    label = entry.profile.label,
                    model = entry.profile.wire_model_id,
                    prices = entry.profile.price_summary(),
                );
            })
            .collect::<Vec<String>>()
            .join("\n");
    }
}
