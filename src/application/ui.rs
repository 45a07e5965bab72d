use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::ProviderRegistry;

fn render_header<B: Backend>(frame: &mut Frame<B>, rect: Rect, app_state: &AppState) {
    let lines = app_state
        .header_lines()
        .into_iter()
        .map(Line::from)
        .collect::<Vec<Line>>();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("ALTAM")
                .padding(Padding::new(1, 1, 0, 0)),
        ),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    #[cfg(feature = "dev")]
    {
        textarea = TextArea::with_text("Explain the difference between a stack and a heap in two sentences.");
    }

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(4),
                    Constraint::Min(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            render_header(frame, layout[0], app_state);

            if layout[1].width != app_state.last_known_width
                || layout[1].height != app_state.last_known_height
            {
                app_state.set_rect(layout[1]);
            }

            app_state
                .chat_log
                .render(frame, layout[1], app_state.scroll.position);
            if !app_state.chat_log.is_empty() {
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    layout[1].inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            if app_state.is_busy() {
                loading.render(frame, layout[2], &app_state.selected_provider_label());
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::BackendResponse(outcome) => {
                if let Some(input_str) = app_state.handle_backend_response(outcome) {
                    textarea = TextArea::with_text(&input_str);
                }
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.is_busy() {
                    textarea.input(input);
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if app_state.is_busy() {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                let (should_break, handled) = app_state.handle_slash_commands(&input_str);
                if should_break {
                    break;
                }
                if handled {
                    textarea = TextArea::default();
                    continue;
                }

                if let Some(exchange) = app_state.submit_prompt(&input_str) {
                    textarea = TextArea::default();
                    tx.send(Action::BackendRequest(exchange))?;
                }
            }
            Event::KeyboardPaste(text) => {
                if app_state.is_busy() {
                    continue;
                }
                for char in text.replace('\r', "").chars() {
                    if char == '\n' {
                        textarea.insert_newline();
                    } else {
                        textarea.insert_char(char);
                    }
                }
            }
            Event::UIResize() => {}
            Event::UITick() => {}
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
        }
    }

    app_state.end_session();

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

fn app_state_props() -> Result<AppStateProps> {
    return Ok(AppStateProps {
        persona: Config::get(ConfigKey::Persona),
        provider: Config::get(ConfigKey::Provider),
        temperature: Config::get(ConfigKey::Temperature).parse::<f32>()?,
        history_window: Config::get(ConfigKey::HistoryWindow).parse::<usize>()?,
        project: Config::get(ConfigKey::Project),
        username: Config::get(ConfigKey::Username),
    });
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let props = app_state_props()?;
    let mut app_state = AppState::new(ProviderRegistry::from_config(), props);

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
