//! The backend seam.

use super::error::ServiceError;
use super::types::{
    ChatReply, ChatRequest, DeleteReply, ModelSettingsReply, ModelSettingsRequest, SwitchReply, ThreadListReply,
};

/// Request/response contract with the chat backend. Enables mocking in tests.
///
/// Each method is a single round trip with no retries. Implementations must
/// map an `error` field in an otherwise successful reply to
/// [`ServiceError::Backend`].
#[async_trait::async_trait]
pub trait ChatService: Send + Sync {
    /// `POST /chat`.
    async fn send_message(&self, request: &ChatRequest<'_>) -> Result<ChatReply, ServiceError>;

    /// `POST /switch_chat`.
    async fn switch_chat(&self, thread_id: &str) -> Result<SwitchReply, ServiceError>;

    /// `POST /rename_chat`.
    async fn rename_chat(&self, thread_id: &str, new_title: &str) -> Result<ThreadListReply, ServiceError>;

    /// `POST /toggle_pin_chat`.
    async fn toggle_pin_chat(&self, thread_id: &str) -> Result<ThreadListReply, ServiceError>;

    /// `POST /delete_chat`.
    async fn delete_chat(&self, thread_id: &str) -> Result<DeleteReply, ServiceError>;

    /// `POST /delete_all_chats`. The reply body carries nothing the client uses.
    async fn delete_all_chats(&self) -> Result<(), ServiceError>;

    /// `GET /get_ollama_models`, flattened to model names.
    async fn list_ollama_models(&self) -> Result<Vec<String>, ServiceError>;

    /// `POST /update_model_settings`.
    async fn update_model_settings(
        &self,
        request: &ModelSettingsRequest<'_>,
    ) -> Result<ModelSettingsReply, ServiceError>;
}
