#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// UI-only message. Notices are shown under the chat log and never enter the
/// conversation history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: &str) -> Notice {
        return Notice {
            kind: NoticeKind::Info,
            text: text.to_string(),
        };
    }

    pub fn error(text: &str) -> Notice {
        return Notice {
            kind: NoticeKind::Error,
            text: text.to_string(),
        };
    }
}
