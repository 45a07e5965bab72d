#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::Project;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

pub const DEFAULT_PERSONA: &str = "ALTAM is a helpful assistant.";

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Provider,
    Temperature,
    HistoryWindow,
    RequestTimeout,
    Persona,
    Project,
    ConfigFile,
    OpenaiURL,
    OpenaiToken,
    ClaudeURL,
    ClaudeToken,
    GeminiURL,
    GeminiToken,
    GroqURL,
    GroqToken,
    Username,
}

impl ConfigKey {
    /// Credentials are never written to logs or the default config output.
    pub fn is_secret(&self) -> bool {
        return matches!(
            self,
            ConfigKey::OpenaiToken
                | ConfigKey::ClaudeToken
                | ConfigKey::GeminiToken
                | ConfigKey::GroqToken
        );
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let default_project = Project::default().to_string();

        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("altam/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(env::var("HOME").unwrap_or_default())
            .join(".config/altam/config.toml");

        let res: &str = match key {
            ConfigKey::Provider => "GPT-3.5",
            ConfigKey::Temperature => "0.7",
            ConfigKey::HistoryWindow => "3",
            ConfigKey::RequestTimeout => "30000",
            ConfigKey::Persona => DEFAULT_PERSONA,
            ConfigKey::Project => default_project.as_str(),
            ConfigKey::OpenaiURL => "https://api.openai.com",
            ConfigKey::OpenaiToken => "",
            ConfigKey::ClaudeURL => "https://api.anthropic.com",
            ConfigKey::ClaudeToken => "",
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com",
            ConfigKey::GeminiToken => "",
            ConfigKey::GroqURL => "https://api.groq.com/openai/v1/chat/completions",
            ConfigKey::GroqToken => "",

            // Special
            ConfigKey::ConfigFile => config_path.to_str().unwrap_or_default(),
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_float) = val.as_float() {
                        Config::set(key, &val_float.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an unsupported value type for key '{key}'"
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::validate()?;

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            provider = Config::get(ConfigKey::Provider),
            temperature = Config::get(ConfigKey::Temperature),
            history_window = Config::get(ConfigKey::HistoryWindow),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            project = Config::get(ConfigKey::Project),
            "config"
        );

        return Ok(());
    }

    /// Numeric keys are checked up front so a bad value is reported before the
    /// terminal UI takes over the screen.
    pub fn validate() -> Result<()> {
        let temperature = Config::get(ConfigKey::Temperature);
        match temperature.parse::<f32>() {
            Ok(val) if (0.0..=2.0).contains(&val) => {}
            _ => bail!(format!(
                "temperature must be a number between 0.0 and 2.0, got '{temperature}'"
            )),
        }

        let history_window = Config::get(ConfigKey::HistoryWindow);
        if !matches!(history_window.parse::<usize>(), Ok(val) if val > 0) {
            bail!(format!(
                "history-window must be a positive whole number, got '{history_window}'"
            ));
        }

        let request_timeout = Config::get(ConfigKey::RequestTimeout);
        match request_timeout.parse::<u64>() {
            Ok(val) if val > 0 => {}
            _ => bail!(format!(
                "request-timeout must be a number of milliseconds greater than 0, got '{request_timeout}'"
            )),
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your user name displayed in the chat log.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg.get_help()?.to_string();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() || key.is_secret() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<f64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
