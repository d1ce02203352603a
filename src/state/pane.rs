//! Message pane contents for the active thread.
//!
//! DESIGN
//! ======
//! The pane is rebuilt from a complete snapshot on every thread switch and
//! only ever appended to in between. `loaded_thread` records which backend
//! thread the snapshot came from so re-selecting it can be skipped.

#[cfg(test)]
#[path = "pane_test.rs"]
mod pane_test;

use crate::net::types::{MessageKind, WireMessage};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    Human,
    Assistant,
}

impl From<MessageKind> for Sender {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Human => Self::Human,
            MessageKind::Ai => Self::Assistant,
        }
    }
}

/// A rendered chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaneMessage {
    pub sender: Sender,
    /// Main answer text, with any thinking trace removed.
    pub content: String,
    /// Reasoning trace shown collapsed beneath the answer.
    pub thinking: Option<String>,
    /// `HH:MM` wall-clock time when the message entered the pane.
    pub display_time: String,
}

impl PaneMessage {
    #[must_use]
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Human,
            content: content.into(),
            thinking: None,
            display_time: display_time_now(),
        }
    }

    /// Assistant message; an inline `<think>` block is split out when no explicit trace is given.
    #[must_use]
    pub fn assistant(content: &str, thinking: Option<String>) -> Self {
        let (answer, inline) = split_thinking(content);
        Self {
            sender: Sender::Assistant,
            content: answer,
            thinking: thinking.filter(|t| !t.trim().is_empty()).or(inline),
            display_time: display_time_now(),
        }
    }

    #[must_use]
    pub fn from_wire(message: &WireMessage) -> Self {
        match Sender::from(message.kind) {
            Sender::Human => Self::human(message.content.clone()),
            Sender::Assistant => Self::assistant(&message.content, None),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessagePane {
    messages: Vec<PaneMessage>,
    loaded_thread: Option<String>,
    /// True while a send is awaiting its reply (typing indicator).
    pub awaiting_reply: bool,
}

impl MessagePane {
    #[must_use]
    pub fn messages(&self) -> &[PaneMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True when the pane holds a completed snapshot of `thread_id`.
    #[must_use]
    pub fn is_loaded_for(&self, thread_id: &str) -> bool {
        self.loaded_thread.as_deref() == Some(thread_id)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.loaded_thread = None;
        self.awaiting_reply = false;
    }

    /// Replace everything with a backend snapshot of `thread_id`.
    pub fn replace(&mut self, thread_id: &str, messages: Vec<PaneMessage>) {
        self.messages = messages;
        self.loaded_thread = Some(thread_id.to_owned());
        self.awaiting_reply = false;
    }

    /// Mark the current contents as belonging to a newly materialized thread.
    pub fn adopt(&mut self, thread_id: &str) {
        self.loaded_thread = Some(thread_id.to_owned());
    }

    pub fn push(&mut self, message: PaneMessage) {
        self.messages.push(message);
    }
}

/// Split an inline `<think>…</think>` block out of `content`.
///
/// Returns the answer (text around the block, trimmed) and the trimmed trace.
/// Content without a complete block is returned unchanged.
#[must_use]
pub fn split_thinking(content: &str) -> (String, Option<String>) {
    let Some(open) = content.find(THINK_OPEN) else {
        return (content.to_owned(), None);
    };
    let body_start = open + THINK_OPEN.len();
    let Some(close_rel) = content[body_start..].find(THINK_CLOSE) else {
        return (content.to_owned(), None);
    };
    let close = body_start + close_rel;

    let trace = content[body_start..close].trim();
    let before = content[..open].trim();
    let after = content[close + THINK_CLOSE.len()..].trim();
    let answer = match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_owned(),
        (false, true) => before.to_owned(),
        (false, false) => format!("{before}\n{after}"),
    };
    let trace = (!trace.is_empty()).then(|| trace.to_owned());
    (answer, trace)
}

/// Current wall-clock time as `HH:MM` (UTC). Cosmetic only.
#[must_use]
pub fn display_time_now() -> String {
    let now = time::OffsetDateTime::now_utc();
    format!("{:02}:{:02}", now.hour(), now.minute())
}
