#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Project;
use crate::domain::services::actions::help_text;
use crate::domain::services::ProviderRegistry;

/// Directory the debug log is written to when `RUST_LOG` mentions altam.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("ALTAM_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("altam");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for ALTAM")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running ALTAM with environment variable RUST_LOG=altam")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_provider() -> Arg {
    return Arg::new(ConfigKey::Provider.to_string())
        .short('p')
        .long(ConfigKey::Provider.to_string())
        .env("ALTAM_PROVIDER")
        .num_args(1)
        .help(format!(
            "The model to start chatting with. [default: {}]",
            Config::default(ConfigKey::Provider)
        ))
        .value_parser(PossibleValuesParser::new(ProviderRegistry::labels()));
}

fn arg_temperature() -> Arg {
    return Arg::new(ConfigKey::Temperature.to_string())
        .short('t')
        .long(ConfigKey::Temperature.to_string())
        .env("ALTAM_TEMPERATURE")
        .num_args(1)
        .help(format!(
            "Sampling temperature sent with every request, between 0.0 and 2.0. [default: {}]",
            Config::default(ConfigKey::Temperature)
        ));
}

fn arg_history_window() -> Arg {
    return Arg::new(ConfigKey::HistoryWindow.to_string())
        .long(ConfigKey::HistoryWindow.to_string())
        .env("ALTAM_HISTORY_WINDOW")
        .num_args(1)
        .help(format!(
            "Number of most recent turns sent along with each new message. [default: {}]",
            Config::default(ConfigKey::HistoryWindow)
        ));
}

fn arg_project() -> Arg {
    return Arg::new(ConfigKey::Project.to_string())
        .long(ConfigKey::Project.to_string())
        .env("ALTAM_PROJECT")
        .num_args(1)
        .help(format!(
            "The project to open the chat in. [default: {}]",
            Config::default(ConfigKey::Project)
        ))
        .value_parser(PossibleValuesParser::new(Project::VARIANTS));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat session.")
        .arg(arg_provider())
        .arg(arg_temperature())
        .arg(arg_history_window())
        .arg(arg_project());
}

fn subcommand_providers() -> Command {
    return Command::new("providers")
        .about("List every model with its availability and prices.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("altam")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_providers())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_provider())
        .arg(arg_temperature())
        .arg(arg_history_window())
        .arg(arg_project())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("ALTAM_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("ALTAM_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds for a model to answer before giving up. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Persona.to_string())
                .long(ConfigKey::Persona.to_string())
                .env("ALTAM_PERSONA")
                .num_args(1)
                .help(format!("System instruction every conversation starts with. [default: {}]", Config::default(ConfigKey::Persona)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("ALTAM_USERNAME")
                .num_args(1)
                .help("Your user name displayed in the chat log. Defaults to $USER.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenaiURL.to_string())
                .long(ConfigKey::OpenaiURL.to_string())
                .env("ALTAM_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI API URL used by the GPT models. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::OpenaiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenaiToken.to_string())
                .long(ConfigKey::OpenaiToken.to_string())
                .env("ALTAM_OPENAI_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("OpenAI API token used by the GPT models.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ClaudeURL.to_string())
                .long(ConfigKey::ClaudeURL.to_string())
                .env("ALTAM_CLAUDE_URL")
                .num_args(1)
                .help(format!("Anthropic API URL used by the Claude models. [default: {}]", Config::default(ConfigKey::ClaudeURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ClaudeToken.to_string())
                .long(ConfigKey::ClaudeToken.to_string())
                .env("ALTAM_CLAUDE_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Anthropic's Claude API token used by the Claude models.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("ALTAM_GEMINI_URL")
                .num_args(1)
                .help(format!("Google Generative Language API URL used by the Gemini models. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("ALTAM_GEMINI_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Google API key used by the Gemini models.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GroqURL.to_string())
                .long(ConfigKey::GroqURL.to_string())
                .env("ALTAM_GROQ_URL")
                .num_args(1)
                .help(format!("Full chat completions URL posted to for the Groq models. [default: {}]", Config::default(ConfigKey::GroqURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GroqToken.to_string())
                .long(ConfigKey::GroqToken.to_string())
                .env("ALTAM_GROQ_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Groq API token used by the Groq models.")
                .global(true),
        );
}

/// Returns true when the chat UI should be started.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("providers", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let selected = Config::get(ConfigKey::Provider);
            println!("{}", ProviderRegistry::from_config().describe(Some(&selected)));
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
