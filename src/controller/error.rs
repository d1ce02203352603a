//! Controller errors.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures are caught before any network call. Every variant is
//! also raised as an inline notice by the controller, so callers may log
//! and move on.

use crate::net::ServiceError;

/// Local input checks that stop an operation before it reaches the backend.
/// `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Chat title cannot be empty")]
    EmptyTitle,
    #[error("Chat title is unchanged")]
    UnchangedTitle,
    #[error("Unknown chat: {0}")]
    UnknownThread(String),
    #[error("This conversation has not been saved yet")]
    NotPersisted,
    #[error("API key cannot be empty")]
    EmptyApiKey,
    #[error("No model selected")]
    NoModelSelected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A previous message is still awaiting its reply.
    #[error("A message is already being sent")]
    SendInFlight,
}
