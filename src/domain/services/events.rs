#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_RATE: time::Duration = time::Duration::from_millis(500);

/// Hotkeys of the chat screen. Anything not listed here is text for the
/// input box.
fn map_key(input: Input) -> Event {
    return match (&input.key, input.ctrl) {
        (Key::Char('c'), true) => Event::KeyboardCTRLC(),
        (Key::Char('d'), true) | (Key::PageDown, _) => Event::UIScrollPageDown(),
        (Key::Char('u'), true) | (Key::PageUp, _) => Event::UIScrollPageUp(),
        (Key::Down | Key::MouseScrollDown, _) => Event::UIScrollDown(),
        (Key::Up | Key::MouseScrollUp, _) => Event::UIScrollUp(),
        (Key::Enter, _) => Event::KeyboardEnter(),
        _ => Event::KeyboardCharInput(input),
    };
}

fn map_mouse(kind: MouseEventKind) -> Option<Event> {
    return match kind {
        MouseEventKind::ScrollDown => Some(Event::UIScrollDown()),
        MouseEventKind::ScrollUp => Some(Event::UIScrollUp()),
        _ => None,
    };
}

fn translate(event: CrosstermEvent) -> Option<Event> {
    return match event {
        CrosstermEvent::Key(key_event) => Some(map_key(key_event.into())),
        CrosstermEvent::Mouse(mouse_event) => map_mouse(mouse_event.kind),
        CrosstermEvent::Paste(text) => Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Resize(_, _) => Some(Event::UIResize()),
        _ => None,
    };
}

/// Merges terminal input, worker responses and a redraw tick into one stream
/// for the UI loop.
pub struct EventsService {
    terminal: EventStream,
    worker: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(worker: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            terminal: EventStream::new(),
            worker,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let event = tokio::select! {
                event = self.worker.recv() => event,
                Some(Ok(event)) = self.terminal.next() => translate(event),
                _ = time::sleep(TICK_RATE) => Some(Event::UITick()),
            };

            if let Some(event) = event {
                return Ok(event);
            }
        }
    }
}
