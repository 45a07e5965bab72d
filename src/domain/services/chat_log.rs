#[cfg(test)]
#[path = "chat_log_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::wrap_lines;
use crate::domain::models::Message;
use crate::domain::models::Notice;
use crate::domain::models::NoticeKind;
use crate::domain::models::Role;

const ASSISTANT_NAME: &str = "AI";

/// Wrapped, styled lines for the chat pane: the conversation without its
/// system turn, followed by the current notice if there is one.
#[derive(Default)]
pub struct ChatLog {
    lines: Vec<Line<'static>>,
}

impl ChatLog {
    pub fn set_messages(
        &mut self,
        history: &[Message],
        notice: Option<&Notice>,
        username: &str,
        line_width: usize,
    ) {
        let mut lines: Vec<Line<'static>> = vec![];

        for message in history {
            let (name, color) = match message.role {
                Role::System => continue,
                Role::User => (username, Color::Cyan),
                Role::Assistant => (ASSISTANT_NAME, Color::Green),
            };

            lines.push(Line::from(Span::styled(
                format!("{name}:"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            for line in message.as_string_lines(line_width) {
                lines.push(Line::from(line));
            }
            lines.push(Line::from(""));
        }

        if let Some(notice) = notice {
            let color = match notice.kind {
                NoticeKind::Info => Color::Gray,
                NoticeKind::Error => Color::Red,
            };
            for line in wrap_lines(&notice.text, line_width) {
                lines.push(Line::from(Span::styled(line, Style::default().fg(color))));
            }
        }

        self.lines = lines;
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    /// Plain text of every line, without styling.
    pub fn text_lines(&self) -> Vec<String> {
        return self
            .lines
            .iter()
            .map(|line| {
                return line
                    .spans
                    .iter()
                    .map(|span| return span.content.to_string())
                    .collect::<String>();
            })
            .collect();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default().borders(Borders::NONE))
                .scroll((scroll, 0)),
            rect,
        );
    }
}
