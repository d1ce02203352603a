//! Wire DTOs for the chat backend endpoints.
//!
//! DESIGN
//! ======
//! Request bodies borrow their strings so callers never clone just to send.
//! Reply types tolerate missing optional fields with `#[serde(default)]`
//! because the backend omits keys rather than sending `null` in several
//! responses. The `error` key is stripped by the HTTP layer before these
//! types are decoded, so it does not appear here.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Icon shown for a thread the backend sent without one.
pub const DEFAULT_THREAD_ICON: &str = "📄";

/// A conversation as listed in the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    /// Opaque backend identifier.
    pub thread_id: String,
    /// Human-readable title; the backend may rewrite it after the first exchange.
    pub title: String,
    /// Short display glyph.
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Pinned threads are grouped separately in the sidebar.
    #[serde(default)]
    pub is_pinned: bool,
    /// Opaque activity label provided by the backend (not a timestamp).
    #[serde(rename = "time", default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
}

fn default_icon() -> String {
    DEFAULT_THREAD_ICON.to_owned()
}

/// Body of `POST /chat`. `thread_id: None` asks the backend to materialize a thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub thread_id: Option<&'a str>,
}

/// Reply of `POST /chat`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub has_thinking: bool,
    #[serde(default)]
    pub thinking: Option<String>,
    #[serde(default)]
    pub newly_created_thread_id: Option<String>,
    #[serde(default)]
    pub chats: Option<Vec<ThreadSummary>>,
    #[serde(default)]
    pub active_thread_id: Option<String>,
}

/// Author of a stored message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Human,
    Ai,
}

/// One stored message as returned by `POST /switch_chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

/// Body shared by the single-thread mutations (`/switch_chat`, `/toggle_pin_chat`, `/delete_chat`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThreadRef<'a> {
    pub thread_id: &'a str,
}

/// Body of `POST /rename_chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenameRequest<'a> {
    pub thread_id: &'a str,
    pub new_title: &'a str,
}

/// Reply of `POST /switch_chat`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SwitchReply {
    #[serde(default)]
    pub messages: Vec<WireMessage>,
    #[serde(default)]
    pub chats: Vec<ThreadSummary>,
    #[serde(default)]
    pub active_thread_id: Option<String>,
}

/// Reply of `POST /rename_chat` and `POST /toggle_pin_chat`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ThreadListReply {
    #[serde(default)]
    pub chats: Vec<ThreadSummary>,
    #[serde(default)]
    pub active_thread_id: Option<String>,
}

/// Reply of `POST /delete_chat`. `active_thread_id: None` means no threads remain.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeleteReply {
    #[serde(default)]
    pub chats: Vec<ThreadSummary>,
    #[serde(default)]
    pub active_thread_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ModelEntry {
    pub name: String,
}

/// Reply of `GET /get_ollama_models`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ModelsReply {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

/// Model provider the backend can route to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Ollama,
}

impl Provider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }
}

/// Body of `POST /update_model_settings`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelSettingsRequest<'a> {
    pub provider: Provider,
    pub model_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

/// Reply of `POST /update_model_settings`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ModelSettingsReply {
    #[serde(default)]
    pub message: Option<String>,
}
