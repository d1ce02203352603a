//! Pure view models and terminal formatting for the session state.
//!
//! Nothing here mutates state. The sidebar and pane views are plain data so
//! any front end can draw them; the `format_*` helpers are what the terminal
//! binary prints.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;
use std::time::Instant;

use crate::net::types::{DEFAULT_THREAD_ICON, ThreadSummary};
use crate::state::SessionState;
use crate::state::notice::{NoticeLevel, Notices};
use crate::state::pane::{MessagePane, Sender};
use crate::state::thread::{ActiveThread, PLACEHOLDER_ICON, PLACEHOLDER_TITLE};

pub const ACTIVE_LABEL: &str = "Active";
pub const THINKING_COLLAPSED: &str = "[thinking hidden; /think to expand]";
pub const TYPING_LINE: &str = "assistant is typing...";

// =============================================================================
// SIDEBAR
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarItem {
    /// `None` for the placeholder.
    pub thread_id: Option<String>,
    pub title: String,
    pub icon: String,
    pub label: Option<String>,
    pub pinned: bool,
    pub active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarView {
    pub pinned: Vec<SidebarItem>,
    pub recent: Vec<SidebarItem>,
}

impl SidebarView {
    #[must_use]
    pub fn items(&self) -> impl Iterator<Item = &SidebarItem> {
        self.pinned.iter().chain(self.recent.iter())
    }
}

fn thread_item(thread: &ThreadSummary, active: bool) -> SidebarItem {
    let label = thread
        .last_activity
        .clone()
        .or_else(|| active.then(|| ACTIVE_LABEL.to_owned()));
    SidebarItem {
        thread_id: Some(thread.thread_id.clone()),
        title: thread.title.clone(),
        icon: thread.icon.clone(),
        label,
        pinned: thread.is_pinned,
        active,
    }
}

/// Group threads into pinned and recent, keeping backend order.
///
/// The placeholder, when active, leads the recent group. An active thread the
/// list does not know yet (still loading) is shown under its id so exactly one
/// item is always marked active once the session has started.
#[must_use]
pub fn sidebar(state: &SessionState) -> SidebarView {
    let mut view = SidebarView::default();

    match &state.active {
        ActiveThread::Placeholder => view.recent.push(SidebarItem {
            thread_id: None,
            title: PLACEHOLDER_TITLE.to_owned(),
            icon: PLACEHOLDER_ICON.to_owned(),
            label: Some(ACTIVE_LABEL.to_owned()),
            pinned: false,
            active: true,
        }),
        ActiveThread::Real(id) if state.thread(id).is_none() => view.recent.push(SidebarItem {
            thread_id: Some(id.clone()),
            title: id.clone(),
            icon: DEFAULT_THREAD_ICON.to_owned(),
            label: Some(ACTIVE_LABEL.to_owned()),
            pinned: false,
            active: true,
        }),
        _ => {}
    }

    for thread in &state.threads {
        let item = thread_item(thread, state.active.is_real(&thread.thread_id));
        if item.pinned {
            view.pinned.push(item);
        } else {
            view.recent.push(item);
        }
    }
    view
}

#[must_use]
pub fn format_sidebar(view: &SidebarView) -> String {
    let mut out = String::new();
    let groups = [("Pinned", &view.pinned), ("Recent", &view.recent)];
    for (heading, items) in groups {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{heading}");
        for item in items {
            let marker = if item.active { '>' } else { ' ' };
            let id = item.thread_id.as_deref().unwrap_or("-");
            let _ = write!(out, "{marker} {} {} [{id}]", item.icon, item.title);
            if let Some(label) = &item.label {
                let _ = write!(out, "  {label}");
            }
            out.push('\n');
        }
    }
    out
}

// =============================================================================
// MESSAGE PANE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaneLine {
    Message { sender: Sender, time: String, text: String },
    /// Reasoning trace; `text` is `None` while collapsed.
    Thinking { text: Option<String> },
    Typing,
}

#[must_use]
pub fn pane(pane: &MessagePane, show_thinking: bool) -> Vec<PaneLine> {
    let mut lines = Vec::with_capacity(pane.messages().len() + 1);
    for message in pane.messages() {
        lines.push(PaneLine::Message {
            sender: message.sender,
            time: message.display_time.clone(),
            text: message.content.clone(),
        });
        if let Some(trace) = &message.thinking {
            lines.push(PaneLine::Thinking { text: show_thinking.then(|| trace.clone()) });
        }
    }
    if pane.awaiting_reply {
        lines.push(PaneLine::Typing);
    }
    lines
}

#[must_use]
pub fn format_pane(lines: &[PaneLine]) -> String {
    let mut out = String::new();
    for line in lines {
        match line {
            PaneLine::Message { sender, time, text } => {
                let who = match sender {
                    Sender::Human => "you",
                    Sender::Assistant => "assistant",
                };
                let _ = writeln!(out, "[{time}] {who}: {text}");
            }
            PaneLine::Thinking { text: None } => {
                let _ = writeln!(out, "    {THINKING_COLLAPSED}");
            }
            PaneLine::Thinking { text: Some(trace) } => {
                for row in trace.lines() {
                    let _ = writeln!(out, "    | {row}");
                }
            }
            PaneLine::Typing => {
                let _ = writeln!(out, "{TYPING_LINE}");
            }
        }
    }
    out
}

// =============================================================================
// NOTICES
// =============================================================================

#[must_use]
pub fn format_notices(notices: &Notices, now: Instant) -> String {
    let mut out = String::new();
    for notice in notices.visible(now) {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        let _ = writeln!(out, "({tag}) {}", notice.text);
    }
    out
}
