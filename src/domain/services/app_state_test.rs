use anyhow::bail;
use anyhow::Result;
use test_utils::persona_fixture;
use test_utils::turns_fixture;

use super::AppState;
use super::AppStateProps;
use crate::domain::models::ChatError;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionErrorKind;
use crate::domain::models::CompletionResult;
use crate::domain::models::ExchangeOutcome;
use crate::domain::models::Message;
use crate::domain::models::NoticeKind;
use crate::domain::models::Project;
use crate::domain::models::ProviderProfile;
use crate::domain::models::RequestStyle;
use crate::domain::services::ProviderEntry;
use crate::domain::services::ProviderRegistry;

fn entry(label: &str, model: &str, credential: &str, token_flag: &str) -> ProviderEntry {
    return ProviderEntry {
        profile: ProviderProfile {
            label: label.to_string(),
            wire_model_id: model.to_string(),
            endpoint: "http://localhost:1234".to_string(),
            credential: credential.to_string(),
            request_style: RequestStyle::OpenAI,
            price_per_input_token: 0.5e-6,
            price_per_output_token: 1.5e-6,
        },
        available: !credential.is_empty(),
        token_flag: token_flag.to_string(),
    };
}

fn turn(role: &str, content: &str) -> Message {
    if role == "user" {
        return Message::user(content);
    }
    return Message::assistant(content);
}

fn registry() -> ProviderRegistry {
    return ProviderRegistry::new(vec![
        entry("GPT-3.5", "gpt-3.5-turbo", "abc", "--openai-token"),
        entry("GPT-4", "gpt-4o", "abc", "--openai-token"),
        entry("Gemini 1.5 Pro", "gemini-1.5-pro-latest", "", "--gemini-token"),
    ]);
}

fn props(provider: &str) -> AppStateProps {
    return AppStateProps {
        persona: persona_fixture().to_string(),
        provider: provider.to_string(),
        temperature: 0.7,
        history_window: 3,
        project: "Home".to_string(),
        username: "tester".to_string(),
    };
}

impl Default for AppState {
    fn default() -> AppState {
        let mut app_state = AppState::new(registry(), props("GPT-3.5"));
        app_state.last_known_width = 100;
        app_state.last_known_height = 300;
        return app_state;
    }
}

fn history(app_state: &AppState) -> Vec<Message> {
    return app_state.session().unwrap().history;
}

fn success(app_state: &AppState, input: &str, text: &str) -> ExchangeOutcome {
    return ExchangeOutcome {
        session_id: app_state.session_id.to_string(),
        user_input: input.to_string(),
        result: CompletionResult::Success {
            text: text.to_string(),
        },
    };
}

fn failure(app_state: &AppState, input: &str) -> ExchangeOutcome {
    return ExchangeOutcome {
        session_id: app_state.session_id.to_string(),
        user_input: input.to_string(),
        result: CompletionResult::Error(CompletionError::new(
            CompletionErrorKind::Transport,
            "connection refused",
        )),
    };
}

mod new {
    use super::*;

    #[test]
    fn it_starts_with_the_persona() {
        let app_state = AppState::default();

        assert_eq!(history(&app_state), vec![Message::system(persona_fixture())]);
        assert_eq!(app_state.selected_provider_label(), "GPT-3.5");
        assert!(app_state.notice.is_none());
        assert!(!app_state.is_busy());
    }

    #[test]
    fn it_warns_when_the_startup_provider_is_unavailable() {
        let app_state = AppState::new(registry(), props("Gemini 1.5 Pro"));
        let notice = app_state.notice.unwrap();

        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice
            .text
            .starts_with("Model unavailable: Gemini 1.5 Pro has no credential configured"));
    }

    #[test]
    fn it_shows_project_and_settings_in_the_header() {
        let mut p = props("GPT-4");
        p.project = "2".to_string();
        let app_state = AppState::new(registry(), p);

        assert_eq!(
            app_state.header_lines(),
            vec![
                "金融調査員 - this project uses データ1: 金融レポート".to_string(),
                "Model: GPT-4 | Temperature: 0.7 | Window: 3 turns".to_string(),
            ]
        );
    }
}

mod submit_prompt {
    use super::*;

    #[test]
    fn it_completes_a_first_exchange() -> Result<()> {
        let mut app_state = AppState::default();

        let exchange = match app_state.submit_prompt("Hello") {
            Some(exchange) => exchange,
            None => bail!("Expected an exchange"),
        };
        assert!(app_state.is_busy());
        assert_eq!(
            exchange.request.messages,
            vec![Message::system(persona_fixture()), Message::user("Hello")]
        );
        assert_eq!(exchange.request.temperature, 0.7);
        assert_eq!(exchange.request.max_output_tokens, 200);
        assert_eq!(exchange.request.model_id, "gpt-3.5-turbo");

        let restored = app_state.handle_backend_response(success(&app_state, "Hello", "Hi there!"));
        assert!(restored.is_none());
        assert!(!app_state.is_busy());
        assert_eq!(
            history(&app_state),
            vec![
                Message::system(persona_fixture()),
                Message::user("Hello"),
                Message::assistant("Hi there!"),
            ]
        );

        return Ok(());
    }

    #[test]
    fn it_leaves_history_on_failure() -> Result<()> {
        let mut app_state = AppState::default();

        if app_state.submit_prompt("Hello").is_none() {
            bail!("Expected an exchange");
        }
        let restored = app_state.handle_backend_response(failure(&app_state, "Hello"));

        assert_eq!(restored, Some("Hello".to_string()));
        assert_eq!(history(&app_state), vec![Message::system(persona_fixture())]);
        assert!(!app_state.is_busy());

        let notice = app_state.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(
            notice.text,
            "The model request failed with network error: connection refused"
        );

        return Ok(());
    }

    #[test]
    fn it_sends_only_the_window() -> Result<()> {
        let mut app_state = AppState::default();
        app_state.store.with_session(&app_state.session_id, |session| {
            for (role, content) in turns_fixture(10) {
                session
                    .history
                    .push(turn(role, &content));
            }
        })?;

        let exchange = match app_state.submit_prompt("Question 6") {
            Some(exchange) => exchange,
            None => bail!("Expected an exchange"),
        };

        let contents = exchange
            .request
            .messages
            .iter()
            .map(|message| return message.content.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(
            contents,
            vec!["Answer 4", "Question 5", "Answer 5", "Question 6"]
        );

        return Ok(());
    }

    #[test]
    fn it_ignores_blank_input() {
        let mut app_state = AppState::default();

        for input in ["", "   "] {
            assert!(app_state.submit_prompt(input).is_none());
            assert!(!app_state.is_busy());
            assert_eq!(history(&app_state), vec![Message::system(persona_fixture())]);
            assert_eq!(
                app_state.notice.clone().unwrap().text,
                "Please enter a message."
            );
        }
    }

    #[test]
    fn it_rejects_a_second_prompt_while_busy() {
        let mut app_state = AppState::default();

        assert!(app_state.submit_prompt("Hello").is_some());
        assert!(app_state.submit_prompt("Hello again").is_none());
        assert_eq!(
            app_state.notice.clone().unwrap().text,
            ChatError::Busy.to_string()
        );
    }

    #[test]
    fn it_requires_a_model() {
        let mut app_state = AppState::new(registry(), props("Gemini 1.5 Pro"));

        assert!(app_state.submit_prompt("Hello").is_none());
        assert_eq!(
            app_state.notice.clone().unwrap().text,
            "Model unavailable: No model is selected. Run /models and pick one with /model."
        );
    }

    #[test]
    fn it_grows_history_by_two_per_exchange() {
        let mut app_state = AppState::default();

        for idx in 1..=4 {
            let input = format!("Question {idx}");
            assert!(app_state.submit_prompt(&input).is_some());
            app_state.handle_backend_response(success(&app_state, &input, "Answer"));
            assert_eq!(history(&app_state).len(), 1 + 2 * idx);
        }
    }
}

mod handle_slash_commands {
    use super::*;

    #[test]
    fn it_breaks_on_quit() {
        let mut app_state = AppState::default();
        let (should_break, handled) = app_state.handle_slash_commands("/q");

        assert!(should_break);
        assert!(handled);
    }

    #[test]
    fn it_skips_plain_text() {
        let mut app_state = AppState::default();
        let (should_break, handled) = app_state.handle_slash_commands("What is /model?");

        assert!(!should_break);
        assert!(!handled);
    }

    #[test]
    fn it_lists_models() {
        let mut app_state = AppState::default();
        app_state.handle_slash_commands("/models");

        let notice = app_state.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert!(notice.text.contains("- (1) GPT-3.5 [gpt-3.5-turbo] available"));
        assert!(notice.text.contains("unavailable, set --gemini-token"));
    }

    #[test]
    fn it_sets_the_model_by_index() {
        let mut app_state = AppState::default();
        app_state.handle_slash_commands("/model 2");

        assert_eq!(app_state.selected_provider_label(), "GPT-4");
        assert_eq!(
            app_state.notice.clone().unwrap().text,
            "GPT-4 has entered the chat."
        );
    }

    #[test]
    fn it_keeps_the_model_on_bad_selection() {
        let mut app_state = AppState::default();
        app_state.handle_slash_commands("/m Gemini 1.5 Pro");

        assert_eq!(app_state.selected_provider_label(), "GPT-3.5");
        assert_eq!(app_state.notice.clone().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn it_requires_a_model_name() {
        let mut app_state = AppState::default();
        app_state.handle_slash_commands("/model");

        insta::assert_snapshot!(app_state.notice.clone().unwrap().text, @"You must specify a model name with `/model` or `/m`. Run `/help` for more details.");
    }

    #[test]
    fn it_sets_temperature() -> Result<()> {
        let mut app_state = AppState::default();
        app_state.handle_slash_commands("/temperature 1.2");

        assert_eq!(app_state.session()?.temperature, 1.2);
        assert_eq!(
            app_state.notice.clone().unwrap().text,
            "Temperature set to 1.2."
        );

        return Ok(());
    }

    #[test]
    fn it_rejects_bad_temperature() -> Result<()> {
        let mut app_state = AppState::default();

        for command in ["/t 2.5", "/t warm"] {
            app_state.handle_slash_commands(command);
            assert_eq!(app_state.session()?.temperature, 0.7);
            assert_eq!(app_state.notice.clone().unwrap().kind, NoticeKind::Error);
        }

        return Ok(());
    }

    #[test]
    fn it_resets_history() {
        let mut app_state = AppState::default();
        app_state.submit_prompt("Hello");
        app_state.handle_backend_response(success(&app_state, "Hello", "Hi there!"));

        app_state.handle_slash_commands("/reset");
        let once = history(&app_state);
        app_state.handle_slash_commands("/clear");

        assert_eq!(once, vec![Message::system(persona_fixture())]);
        assert_eq!(history(&app_state), once);
    }

    #[test]
    fn it_lists_projects() {
        let mut app_state = AppState::default();
        app_state.handle_slash_commands("/project");

        insta::assert_snapshot!(app_state.notice.clone().unwrap().text, @r###"
        - (1) Home: エンジニアファイル *
        - (2) 金融調査員: データ1: 金融レポート
        - (3) 医者: データ2: 医療論文
        - (4) プロエンジニア: データ3: Pythonチュートリアル
        "###);
    }

    #[test]
    fn it_selects_a_project() -> Result<()> {
        let mut app_state = AppState::default();
        app_state.handle_slash_commands("/p 医者");

        assert_eq!(app_state.session()?.project, Project::Doctor);
        assert_eq!(
            app_state.notice.clone().unwrap().text,
            "医者 - this project uses データ2: 医療論文"
        );

        return Ok(());
    }

    #[test]
    fn it_shows_help() {
        let mut app_state = AppState::default();
        let (should_break, handled) = app_state.handle_slash_commands("/help");

        assert!(!should_break);
        assert!(handled);
        assert!(app_state.notice.clone().unwrap().text.starts_with("COMMANDS:"));
    }

    #[test]
    fn it_never_touches_history() {
        let mut app_state = AppState::default();
        for command in ["/models", "/model 2", "/t 1.0", "/project 3", "/help"] {
            app_state.handle_slash_commands(command);
        }

        assert_eq!(history(&app_state), vec![Message::system(persona_fixture())]);
    }
}

#[test]
fn it_removes_the_session_on_end() {
    let app_state = AppState::default();
    app_state.end_session();

    assert!(app_state.session().is_err());
}
