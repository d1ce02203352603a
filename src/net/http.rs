//! reqwest implementation of [`ChatService`].
//!
//! ERROR HANDLING
//! ==============
//! The backend reports application errors two ways: a non-2xx status, or a
//! 2xx body carrying an `error` string. Both become
//! [`ServiceError::Backend`] here so the controller sees one shape.
//! `/delete_all_chats` has no reply payload, so any successful body without
//! an `error` field is accepted there, JSON or not.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::{ServiceError, status_failed_message};
use super::service::ChatService;
use super::types::{
    ChatReply, ChatRequest, DeleteReply, ModelSettingsReply, ModelSettingsRequest, ModelsReply, RenameRequest,
    SwitchReply, ThreadListReply, ThreadRef,
};
use crate::config::ClientConfig;

pub const CHAT_PATH: &str = "/chat";
pub const SWITCH_CHAT_PATH: &str = "/switch_chat";
pub const RENAME_CHAT_PATH: &str = "/rename_chat";
pub const TOGGLE_PIN_CHAT_PATH: &str = "/toggle_pin_chat";
pub const DELETE_CHAT_PATH: &str = "/delete_chat";
pub const DELETE_ALL_CHATS_PATH: &str = "/delete_all_chats";
pub const OLLAMA_MODELS_PATH: &str = "/get_ollama_models";
pub const UPDATE_MODEL_SETTINGS_PATH: &str = "/update_model_settings";

pub struct HttpChatService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChatService {
    /// Build a client for the backend named by `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::HttpClientBuild`] if the reqwest client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ServiceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        let value = self.execute(path, request).await?;
        decode_reply(value)
    }

    async fn execute(&self, path: &str, request: reqwest::RequestBuilder) -> Result<Value, ServiceError> {
        let (status, text) = self.fetch(path, request).await?;
        decode_body(status, &text)
    }

    async fn fetch(&self, path: &str, request: reqwest::RequestBuilder) -> Result<(u16, String), ServiceError> {
        debug!(path, "backend request");
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        debug!(path, status, "backend response");
        Ok((status, text))
    }
}

#[async_trait::async_trait]
impl ChatService for HttpChatService {
    async fn send_message(&self, request: &ChatRequest<'_>) -> Result<ChatReply, ServiceError> {
        self.post_json(CHAT_PATH, request).await
    }

    async fn switch_chat(&self, thread_id: &str) -> Result<SwitchReply, ServiceError> {
        self.post_json(SWITCH_CHAT_PATH, &ThreadRef { thread_id }).await
    }

    async fn rename_chat(&self, thread_id: &str, new_title: &str) -> Result<ThreadListReply, ServiceError> {
        self.post_json(RENAME_CHAT_PATH, &RenameRequest { thread_id, new_title })
            .await
    }

    async fn toggle_pin_chat(&self, thread_id: &str) -> Result<ThreadListReply, ServiceError> {
        self.post_json(TOGGLE_PIN_CHAT_PATH, &ThreadRef { thread_id })
            .await
    }

    async fn delete_chat(&self, thread_id: &str) -> Result<DeleteReply, ServiceError> {
        self.post_json(DELETE_CHAT_PATH, &ThreadRef { thread_id }).await
    }

    async fn delete_all_chats(&self) -> Result<(), ServiceError> {
        let request = self.http.post(self.url(DELETE_ALL_CHATS_PATH));
        let (status, text) = self.fetch(DELETE_ALL_CHATS_PATH, request).await?;
        accept_body(status, &text)
    }

    async fn list_ollama_models(&self) -> Result<Vec<String>, ServiceError> {
        let request = self.http.get(self.url(OLLAMA_MODELS_PATH));
        let value = self.execute(OLLAMA_MODELS_PATH, request).await?;
        let reply: ModelsReply = decode_reply(value)?;
        Ok(reply.models.into_iter().map(|m| m.name).collect())
    }

    async fn update_model_settings(
        &self,
        request: &ModelSettingsRequest<'_>,
    ) -> Result<ModelSettingsReply, ServiceError> {
        self.post_json(UPDATE_MODEL_SETTINGS_PATH, request).await
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Classify a raw reply into a JSON body or a [`ServiceError`].
fn decode_body(status: u16, text: &str) -> Result<Value, ServiceError> {
    let success = (200..300).contains(&status);
    let value = if text.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(e) if success => return Err(ServiceError::Decode(e.to_string())),
            Err(_) => Value::Null,
        }
    };

    let error_field = value
        .get("error")
        .and_then(Value::as_str)
        .filter(|msg| !msg.trim().is_empty())
        .map(str::to_owned);

    if !success {
        let message = error_field.unwrap_or_else(|| status_failed_message(status));
        return Err(ServiceError::Backend { status, message });
    }
    if let Some(message) = error_field {
        return Err(ServiceError::Backend { status, message });
    }
    Ok(value)
}

/// Like [`decode_body`] for endpoints whose successful body is ignored.
fn accept_body(status: u16, text: &str) -> Result<(), ServiceError> {
    match decode_body(status, text) {
        Ok(_) | Err(ServiceError::Decode(_)) => Ok(()),
        Err(err) => Err(err),
    }
}

fn decode_reply<R: DeserializeOwned>(value: Value) -> Result<R, ServiceError> {
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()))
}
