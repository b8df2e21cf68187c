use strum_macros::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A transient user-visible notification. Every error of the booking flow ends
/// up as one of these; none of them is fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    message: String,
}

impl Notice {
    pub fn info<S: Into<String>>(message: S) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn warning<S: Into<String>>(message: S) -> Self {
        Self { kind: NoticeKind::Warning, message: message.into() }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn kind(&self) -> NoticeKind { self.kind }
    pub fn message(&self) -> &str { &self.message }
}
