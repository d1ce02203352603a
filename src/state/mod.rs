//! Client-side session state.
//!
//! DESIGN
//! ======
//! State is split by concern (`thread`, `history`, `pane`, `notice`,
//! `models`) so the renderers and the controller can depend on small focused
//! models. `SessionState` aggregates them. Only the controller mutates it;
//! rendering reads it.

pub mod history;
pub mod models;
pub mod notice;
pub mod pane;
pub mod thread;

use std::time::Duration;

use crate::net::types::ThreadSummary;
use history::InputHistory;
use models::ModelSettingsState;
use notice::Notices;
use pane::MessagePane;
use thread::ActiveThread;

/// Everything the view shows, for the lifetime of one session.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Threads in backend order, as last received.
    pub threads: Vec<ThreadSummary>,
    pub active: ActiveThread,
    pub history: InputHistory,
    pub pane: MessagePane,
    pub notices: Notices,
    pub models: ModelSettingsState,
}

impl SessionState {
    #[must_use]
    pub fn with_notice_ttl(ttl: Duration) -> Self {
        Self { notices: Notices::new(ttl), ..Self::default() }
    }

    #[must_use]
    pub fn thread(&self, thread_id: &str) -> Option<&ThreadSummary> {
        self.threads.iter().find(|t| t.thread_id == thread_id)
    }
}
