//! User-facing notifications.
//!
//! The core reports outcomes through a [`Notifier`] and never prints. The CLI decides
//! how messages look; tests and embedders can collect them with a [`MessageLog`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == MessageLevel::Error
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier {
    fn notify(&mut self, message: CmdMessage);

    fn notify_success(&mut self, message: &str) {
        self.notify(CmdMessage::success(message));
    }

    fn notify_error(&mut self, message: &str) {
        self.notify(CmdMessage::error(message));
    }
}

/// Collects every notification in order.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<CmdMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[CmdMessage] {
        &self.messages
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(CmdMessage::is_error)
    }

    pub fn last(&self) -> Option<&CmdMessage> {
        self.messages.last()
    }

    /// Hands the collected messages over and leaves the log empty.
    pub fn drain(&mut self) -> Vec<CmdMessage> {
        std::mem::take(&mut self.messages)
    }
}

impl Notifier for MessageLog {
    fn notify(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}
