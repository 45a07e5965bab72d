#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use strum::IntoEnumIterator;

use super::actions::help_text;
use super::history::window;
use super::ChatLog;
use super::ConversationStore;
use super::HistoryUpdater;
use super::ProviderRegistry;
use super::RequestAssembler;
use super::Scroll;
use crate::domain::models::ChatError;
use crate::domain::models::Exchange;
use crate::domain::models::ExchangeOutcome;
use crate::domain::models::Notice;
use crate::domain::models::Project;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;

pub struct AppStateProps {
    pub persona: String,
    pub provider: String,
    pub temperature: f32,
    pub history_window: usize,
    pub project: String,
    pub username: String,
}

pub struct AppState {
    pub chat_log: ChatLog,
    pub history_window: usize,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub notice: Option<Notice>,
    pub persona: String,
    pub registry: ProviderRegistry,
    pub scroll: Scroll,
    pub session_id: String,
    pub store: ConversationStore,
    pub username: String,
}

impl AppState {
    pub fn new(registry: ProviderRegistry, props: AppStateProps) -> AppState {
        let store = ConversationStore::default();
        let mut notice = None;

        let selected_provider = match registry.resolve(&props.provider) {
            Ok(profile) => Some(profile),
            Err(err) => {
                notice = Some(Notice::error(&format!(
                    "{err} Run /models to see which models can be used, and /model to pick one."
                )));
                None
            }
        };

        let session_id = store.create(selected_provider, props.temperature, &props.persona);
        let project = Project::parse(&props.project).unwrap_or_default();
        if let Err(err) = store.set_project(&session_id, project) {
            notice = Some(Notice::error(&err.to_string()));
        }

        let mut app_state = AppState {
            chat_log: ChatLog::default(),
            history_window: props.history_window,
            last_known_height: 0,
            last_known_width: 0,
            notice,
            persona: props.persona,
            registry,
            scroll: Scroll::default(),
            session_id,
            store,
            username: props.username,
        };
        app_state.sync_dependants();

        return app_state;
    }

    pub fn session(&self) -> Result<Session, ChatError> {
        return self.store.get(&self.session_id);
    }

    pub fn is_busy(&self) -> bool {
        return self
            .session()
            .map(|session| return session.busy)
            .unwrap_or(false);
    }

    pub fn selected_provider_label(&self) -> String {
        return self
            .session()
            .ok()
            .and_then(|session| return session.selected_provider)
            .map(|profile| return profile.label)
            .unwrap_or_else(|| return "No model".to_string());
    }

    /// Project banner plus the active generation settings.
    pub fn header_lines(&self) -> Vec<String> {
        let session = match self.session() {
            Ok(session) => session,
            Err(err) => return vec![err.to_string()],
        };

        return vec![
            session.project.headline(),
            format!(
                "Model: {} | Temperature: {:.1} | Window: {} turns",
                self.selected_provider_label(),
                session.temperature,
                self.history_window
            ),
        ];
    }

    fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.sync_dependants();
        self.scroll.last();
    }

    fn report(&mut self, err: ChatError) {
        tracing::debug!(session_id = self.session_id, error = err.to_string(), "Notice");
        self.set_notice(Notice::error(&err.to_string()));
    }

    fn list_projects(&self, current: Project) -> String {
        return Project::iter()
            .enumerate()
            .map(|(idx, project)| {
                let n = idx + 1;
                let mut marker = "";
                if project == current {
                    marker = " *";
                }
                return format!("- ({n}) {project}: {}{marker}", project.data());
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    fn model_set(&mut self, command: &SlashCommand) {
        let label = command.arg_text();
        if label.is_empty() {
            self.set_notice(Notice::error(
                "You must specify a model name with `/model` or `/m`. Run `/help` for more details.",
            ));
            return;
        }

        match self
            .store
            .select_provider(&self.session_id, &self.registry, &label)
        {
            Ok(profile) => {
                self.set_notice(Notice::info(&format!(
                    "{} has entered the chat.",
                    profile.label
                )));
            }
            Err(err) => self.report(err),
        }
    }

    fn temperature(&mut self, command: &SlashCommand) {
        let text = command.arg_text();
        if text.is_empty() {
            let message = match self.session() {
                Ok(session) => format!("Temperature is {:.1}.", session.temperature),
                Err(err) => err.to_string(),
            };
            self.set_notice(Notice::info(&message));
            return;
        }

        let temperature = match text.parse::<f32>() {
            Ok(temperature) => temperature,
            Err(_) => {
                self.report(ChatError::Validation(format!(
                    "Temperature must be a number between 0.0 and 2.0, got '{text}'."
                )));
                return;
            }
        };

        match self.store.set_temperature(&self.session_id, temperature) {
            Ok(()) => self.set_notice(Notice::info(&format!(
                "Temperature set to {temperature:.1}."
            ))),
            Err(err) => self.report(err),
        }
    }

    fn reset(&mut self) {
        let persona = self.persona.to_string();
        let res = self.store.with_session(&self.session_id, |session| {
            HistoryUpdater::reset(session, &persona);
        });

        match res {
            Ok(()) => self.set_notice(Notice::info("Conversation reset.")),
            Err(err) => self.report(err),
        }
    }

    fn project(&mut self, command: &SlashCommand) {
        let text = command.arg_text();
        let current = match self.session() {
            Ok(session) => session.project,
            Err(err) => {
                self.report(err);
                return;
            }
        };

        if text.is_empty() {
            let list = self.list_projects(current);
            self.set_notice(Notice::info(&list));
            return;
        }

        let project = match Project::parse(&text) {
            Some(project) => project,
            None => {
                self.report(ChatError::Validation(format!(
                    "No project named '{text}'. Run /project to list them."
                )));
                return;
            }
        };

        match self.store.set_project(&self.session_id, project) {
            Ok(()) => self.set_notice(Notice::info(&project.headline())),
            Err(err) => self.report(err),
        }
    }

    /// Returns `(should_break, handled)`. Commands never reach a backend.
    pub fn handle_slash_commands(&mut self, input_str: &str) -> (bool, bool) {
        let command = match SlashCommand::parse(input_str) {
            Some(command) => command,
            None => return (false, false),
        };

        if command.is_quit() {
            return (true, true);
        }

        if command.is_model_list() {
            let selected = self.selected_provider_label();
            let list = self.registry.describe(Some(&selected));
            self.set_notice(Notice::info(&list));
        } else if command.is_model_set() {
            self.model_set(&command);
        } else if command.is_temperature() {
            self.temperature(&command);
        } else if command.is_reset() {
            self.reset();
        } else if command.is_project() {
            self.project(&command);
        } else if command.is_help() {
            self.set_notice(Notice::info(&help_text()));
        }

        return (false, true);
    }

    /// Validates and assembles a request for the current session, marking it
    /// busy. Nothing is sent and history is untouched when this returns
    /// `None`.
    pub fn submit_prompt(&mut self, input_str: &str) -> Option<Exchange> {
        self.notice = None;

        let session = match self.session() {
            Ok(session) => session,
            Err(err) => {
                self.report(err);
                return None;
            }
        };

        let provider = match session.selected_provider {
            Some(provider) => provider,
            None => {
                self.report(ChatError::Configuration(
                    "No model is selected. Run /models and pick one with /model.".to_string(),
                ));
                return None;
            }
        };

        let windowed = window(&session.history, self.history_window);
        let request = match RequestAssembler::assemble(
            &windowed,
            input_str,
            session.temperature,
            &provider,
        ) {
            Ok(request) => request,
            Err(err) => {
                self.report(err);
                return None;
            }
        };

        if let Err(err) = self.store.begin_exchange(&self.session_id) {
            self.report(err);
            return None;
        }

        tracing::debug!(
            session_id = self.session_id,
            provider = provider.label,
            window = windowed.len(),
            "Submitting prompt"
        );

        self.sync_dependants();
        self.scroll.last();

        return Some(Exchange {
            session_id: self.session_id.to_string(),
            user_input: input_str.to_string(),
            provider,
            request,
        });
    }

    /// Writes a settled exchange back into the session. Returns the user's
    /// input when the exchange failed so it can be put back in the editor.
    pub fn handle_backend_response(&mut self, outcome: ExchangeOutcome) -> Option<String> {
        let res = self.store.with_session(&outcome.session_id, |session| {
            return HistoryUpdater::apply(session, &outcome.user_input, &outcome.result);
        });

        let err = match res {
            Ok(Ok(())) => {
                self.sync_dependants();
                self.scroll.last();
                return None;
            }
            Ok(Err(err)) => err,
            Err(err) => err,
        };

        self.report(err);
        return Some(outcome.user_input);
    }

    pub fn end_session(&self) {
        self.store.remove(&self.session_id);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let history = self
            .session()
            .map(|session| return session.history)
            .unwrap_or_default();

        self.chat_log.set_messages(
            &history,
            self.notice.as_ref(),
            &self.username,
            self.last_known_width.saturating_sub(2).into(),
        );
        self.scroll
            .set_state(self.chat_log.len(), self.last_known_height);
    }
}
