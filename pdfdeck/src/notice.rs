//! User-facing notifications from background work.
//!
//! Operations the user triggers directly report failure through their
//! `Result`. Work that runs on its own (first-page thumbnails, per-page
//! preview renders) has no caller to return to, so it posts a [`Notice`]
//! instead. Notices never block and never change the list.

use std::fmt;
use tokio::sync::mpsc;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational.
    Info,
    /// Something failed but the session is unaffected.
    Warning,
}

/// One notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Create an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Create a warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sending half of the notice channel.
pub type NoticeSender = mpsc::UnboundedSender<Notice>;

/// Receiving half of the notice channel.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Create a notice channel.
pub fn channel() -> (NoticeSender, NoticeReceiver) {
    mpsc::unbounded_channel()
}

/// Post a notice, ignoring a closed channel (nobody is listening any more).
pub(crate) fn post(sender: &NoticeSender, notice: Notice) {
    if sender.send(notice).is_err() {
        log::debug!("Notice dropped: receiver closed");
    }
}

/// Take every notice currently queued without waiting.
pub fn drain(receiver: &mut NoticeReceiver) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = receiver.try_recv() {
        notices.push(notice);
    }
    notices
}
