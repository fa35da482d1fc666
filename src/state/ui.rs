#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Severity of a transient notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient toast-style notice.
#[derive(Clone, Debug)]
pub struct Notice {
    pub id: String,
    pub kind: NoticeKind,
    pub text: String,
}

/// Cross-page UI state: the notice stack.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub notices: Vec<Notice>,
}

impl UiState {
    pub fn push_success(&mut self, text: &str) {
        self.push(NoticeKind::Success, text);
    }

    pub fn push_error(&mut self, text: &str) {
        self.push(NoticeKind::Error, text);
    }

    fn push(&mut self, kind: NoticeKind, text: &str) {
        self.notices.push(Notice {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            text: text.to_owned(),
        });
    }

    pub fn dismiss(&mut self, id: &str) {
        self.notices.retain(|n| n.id != id);
    }
}
