//! User-facing notifications
//!
//! The controller and the save path never talk to the windowing toolkit
//! directly; they hand a [`Notice`] to whatever [`Notifier`] the caller wires
//! in. The GUI uses an inline banner for display-time problems and modal
//! dialogs for save results; tests use plain collectors.

use std::fmt;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation of a completed action
    Info,
    /// User action needed
    Warning,
    /// Operation failed
    Error,
}

/// A single message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Short heading (dialog title)
    pub title: String,
    /// Human-readable body
    pub message: String,
}

impl Notice {
    /// Informational notice titled "Success"
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    /// Warning notice titled "Warning"
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: "Warning".to_string(),
            message: message.into(),
        }
    }

    /// Error notice titled "Error"
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Sink for notices
pub trait Notifier {
    /// Deliver a notice to the user.
    fn notify(&mut self, notice: Notice);

    /// Withdraw whatever is currently shown, if the sink keeps anything around.
    fn dismiss(&mut self) {}
}

/// Non-blocking notifier that keeps the most recent notice for an inline banner
#[derive(Debug, Default)]
pub struct InlineNotifier {
    current: Option<Notice>,
}

impl InlineNotifier {
    /// Create an empty banner
    pub fn new() -> Self {
        Self::default()
    }

    /// Notice currently on display, if any
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

impl Notifier for InlineNotifier {
    fn notify(&mut self, notice: Notice) {
        self.current = Some(notice);
    }

    fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}
