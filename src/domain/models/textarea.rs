use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        return TextArea::with_text("");
    }

    /// Used to put a failed prompt back into the input so it can be resent.
    pub fn with_text(text: &str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::from(
            text.split('\n')
                .map(|line| return line.to_string())
                .collect::<Vec<String>>(),
        );
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title("Message (Enter to send, /help for commands)")
                .padding(Padding::new(1, 1, 0, 0)),
        );
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);

        return textarea;
    }
}
