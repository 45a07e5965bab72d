use tui_textarea::Input;

use super::ExchangeOutcome;

#[derive(Debug)]
pub enum Event {
    BackendResponse(ExchangeOutcome),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
