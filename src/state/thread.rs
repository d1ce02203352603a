//! Active-thread pointer and the placeholder conversation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The placeholder is a variant, not a reserved id string, so it can never
//! collide with or leak into a backend thread list.

#[cfg(test)]
#[path = "thread_test.rs"]
mod thread_test;

/// Sidebar title of the not-yet-materialized conversation.
pub const PLACEHOLDER_TITLE: &str = "New Conversation";
/// Sidebar icon of the not-yet-materialized conversation.
pub const PLACEHOLDER_ICON: &str = "📝";

/// Which conversation the view is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveThread {
    /// Cold start, before the bootstrap has been applied.
    #[default]
    Empty,
    /// A new conversation that exists only client-side.
    Placeholder,
    /// A backend thread.
    Real(String),
}

impl ActiveThread {
    /// The backend id, if the active thread is persisted.
    #[must_use]
    pub fn thread_id(&self) -> Option<&str> {
        match self {
            Self::Real(id) => Some(id),
            Self::Empty | Self::Placeholder => None,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    #[must_use]
    pub fn is_real(&self, thread_id: &str) -> bool {
        self.thread_id() == Some(thread_id)
    }

    /// Key for per-thread client data. `Empty` has none.
    #[must_use]
    pub fn key(&self) -> Option<ThreadKey> {
        match self {
            Self::Empty => None,
            Self::Placeholder => Some(ThreadKey::Placeholder),
            Self::Real(id) => Some(ThreadKey::Thread(id.clone())),
        }
    }
}

/// Map key for client-side per-thread data such as input history.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ThreadKey {
    Placeholder,
    Thread(String),
}

impl From<&str> for ThreadKey {
    fn from(thread_id: &str) -> Self {
        Self::Thread(thread_id.to_owned())
    }
}
