//! Transient user-facing notices (the toast layer's input).
//!
//! Controllers push exactly one notice per completed action. The view
//! drains them with [`Notices::take`].

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Notices {
    pending: Vec<Notice>,
}

impl Notices {
    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Notice");
        self.pending.push(Notice {
            level: NoticeLevel::Success,
            message,
        });
    }

    pub fn error(&mut self, err: &AppError) {
        let message = err.notice_message();
        tracing::warn!(error = %err, %message, "Action failed");
        self.pending.push(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every pending notice, oldest first.
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}
