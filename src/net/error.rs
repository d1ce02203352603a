//! Backend call errors.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and application errors are kept apart because the UI
//! shows them differently: transport failures get a generic message, backend
//! errors are shown verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not communicate with the server.";

/// Errors produced by [`ChatService`](super::ChatService) calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request never completed (connect failure, timeout, reset).
    #[error("transport failed: {0}")]
    Transport(String),

    /// Non-2xx status or an `error` field in the reply body.
    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    /// The reply body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ServiceError {
    /// Text to surface inline to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::HttpClientBuild(_) => TRANSPORT_FAILURE_MESSAGE.to_owned(),
            Self::Backend { message, .. } => message.clone(),
            Self::Decode(_) => "The server sent an unexpected response.".to_owned(),
        }
    }
}

pub(crate) fn status_failed_message(status: u16) -> String {
    format!("request failed with status {status}")
}
