//! Status messages shown after user actions.

use serde::Serialize;

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// The latest status message of a view.
///
/// Remote failures in the listing end up here instead of propagating as
/// fatal errors (e.g. "Failed to delete 3 documents: ...").
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    message: Option<(StatusLevel, String)>,
}

impl StatusMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, level: StatusLevel, msg: impl Into<String>) {
        self.message = Some((level, msg.into()));
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.set(StatusLevel::Info, msg);
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.set(StatusLevel::Success, msg);
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.set(StatusLevel::Error, msg);
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_ref().map(|(_, msg)| msg.as_str())
    }

    #[must_use]
    pub fn level(&self) -> Option<StatusLevel> {
        self.message.as_ref().map(|(level, _)| *level)
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level() == Some(StatusLevel::Error)
    }

    /// Take the message, clearing it.
    pub fn take(&mut self) -> Option<String> {
        self.message.take().map(|(_, msg)| msg)
    }
}
