//! Inline, auto-dismissing notifications.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub raised_at: Instant,
}

/// Notices expire `ttl` after they are raised; nothing blocks on them.
#[derive(Clone, Debug)]
pub struct Notices {
    ttl: Duration,
    items: Vec<Notice>,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_NOTICE_TTL_SECS))
    }
}

impl Notices {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, items: Vec::new() }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.raise(NoticeLevel::Info, text.into(), Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.raise(NoticeLevel::Error, text.into(), Instant::now());
    }

    pub fn raise(&mut self, level: NoticeLevel, text: String, raised_at: Instant) {
        self.items.push(Notice { level, text, raised_at });
    }

    /// Notices still visible at `now`.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        let ttl = self.ttl;
        self.items
            .iter()
            .filter(move |n| now.saturating_duration_since(n.raised_at) < ttl)
    }

    /// Drop expired notices.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
