//! Transient notifications
//!
//! Bounded log of the toast-style messages produced by submissions.
//! Validation errors never land here; they stay inline on the form.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// How many notices are retained before the oldest is dropped
pub const NOTICE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Bounded, newest-last notice history
#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: VecDeque<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        if self.entries.len() == NOTICE_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(notice);
    }

    /// Most recent notice, if any
    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_newest() {
        let mut log = NoticeLog::new();
        log.push(Notice::info("first"));
        log.push(Notice::error("second"));
        assert_eq!(log.latest().unwrap().message, "second");
        assert_eq!(log.latest().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = NoticeLog::new();
        for i in 0..NOTICE_CAPACITY + 3 {
            log.push(Notice::info(format!("notice {}", i)));
        }
        assert_eq!(log.len(), NOTICE_CAPACITY);
        assert_eq!(log.iter().next().unwrap().message, "notice 3");
    }
}
