//! Thread metadata mutations: rename, pin, delete.
//!
//! Every reply carries the authoritative thread list, which replaces the
//! local one. Only deleting the active thread moves the active pointer.

#[cfg(test)]
#[path = "mutate_test.rs"]
mod mutate_test;

use tracing::info;

use super::{ConversationController, ControllerError, Outcome, SwitchTicket, Target, ValidationError};
use crate::net::types::{DeleteReply, ThreadListReply};
use crate::net::{ChatService, ServiceError};
use crate::state::thread::{ActiveThread, ThreadKey};

/// Pending `delete_chat`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteTicket {
    thread_id: String,
}

impl DeleteTicket {
    #[must_use]
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }
}

impl ConversationController {
    // =========================================================================
    // RENAME
    // =========================================================================

    /// Validate a rename and return `(thread_id, trimmed title)`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty or unchanged title, or an
    /// unknown or unsaved target. No request should be made in that case.
    pub fn begin_rename(&mut self, target: Target, title: &str) -> Result<(String, String), ControllerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(self.reject(ValidationError::EmptyTitle));
        }
        let thread_id = self.resolve(target)?;
        if self
            .state
            .thread(&thread_id)
            .is_some_and(|t| t.title == title)
        {
            return Err(self.reject(ValidationError::UnchangedTitle));
        }
        Ok((thread_id, title.to_owned()))
    }

    /// Rename a thread.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any call, or the service error.
    pub async fn rename_chat<S>(&mut self, service: &S, target: Target, title: &str) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let (thread_id, title) = self.begin_rename(target, title)?;
        let result = service.rename_chat(&thread_id, &title).await;
        self.complete_thread_list("Could not rename chat.", result)
    }

    // =========================================================================
    // PIN
    // =========================================================================

    /// Validate a pin toggle and return the thread id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown or unsaved target.
    pub fn begin_toggle_pin(&mut self, target: Target) -> Result<String, ControllerError> {
        self.resolve(target)
    }

    /// Toggle a thread's pinned flag. The active thread never changes.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any call, or the service error.
    pub async fn toggle_pin<S>(&mut self, service: &S, target: Target) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let thread_id = self.begin_toggle_pin(target)?;
        let result = service.toggle_pin_chat(&thread_id).await;
        self.complete_thread_list("Could not update pin.", result)
    }

    /// Adopt the thread list from a rename or pin reply.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the call failed; state is unchanged.
    pub fn complete_thread_list(
        &mut self,
        context: &'static str,
        result: Result<ThreadListReply, ServiceError>,
    ) -> Result<Outcome, ControllerError> {
        match result {
            Ok(reply) => {
                self.state.threads = reply.chats;
                Ok(Outcome::Applied)
            }
            Err(err) => Err(self.fail(context, err)),
        }
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Validate a delete.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown or unsaved target.
    pub fn begin_delete(&mut self, target: Target) -> Result<DeleteTicket, ControllerError> {
        let thread_id = self.resolve(target)?;
        Ok(DeleteTicket { thread_id })
    }

    /// Reconcile a `delete_chat` reply.
    ///
    /// When the deleted thread was active, the backend's new active id is
    /// entered: `None` means the placeholder, otherwise the returned ticket
    /// loads the new thread. If that load fails the placeholder is entered.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the call failed; state is unchanged.
    pub fn complete_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<DeleteReply, ServiceError>,
    ) -> Result<Option<SwitchTicket>, ControllerError> {
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => return Err(self.fail("Could not delete chat.", err)),
        };

        self.state.threads = reply.chats;
        self.state
            .history
            .remove(&ThreadKey::from(ticket.thread_id.as_str()));

        if !self.state.active.is_real(&ticket.thread_id) {
            return Ok(None);
        }
        info!(thread_id = %ticket.thread_id, next = ?reply.active_thread_id, "active thread deleted");
        match reply.active_thread_id {
            None => {
                self.enter_placeholder();
                Ok(None)
            }
            Some(next) => {
                self.state.pane.clear();
                self.set_active(ActiveThread::Real(next.clone()));
                let mut switch = self.dispatch_switch(next);
                switch.replacement = true;
                Ok(Some(switch))
            }
        }
    }

    /// Delete a thread, loading the backend's replacement if it was active.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any call, or the service error.
    pub async fn delete_chat<S>(&mut self, service: &S, target: Target) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let ticket = self.begin_delete(target)?;
        let result = service.delete_chat(ticket.thread_id()).await;
        match self.complete_delete(ticket, result)? {
            None => Ok(Outcome::Applied),
            Some(switch) => {
                let result = service.switch_chat(switch.thread_id()).await;
                self.complete_switch(switch, result)
            }
        }
    }

    /// Reconcile `delete_all_chats`. Success always means "no threads".
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the call failed; state is unchanged.
    pub fn complete_delete_all(&mut self, result: Result<(), ServiceError>) -> Result<Outcome, ControllerError> {
        if let Err(err) = result {
            return Err(self.fail("Could not delete chats.", err));
        }
        info!("all chats deleted");
        self.state.threads.clear();
        self.state.history.clear();
        self.enter_placeholder();
        Ok(Outcome::Applied)
    }

    /// Delete every thread.
    ///
    /// # Errors
    ///
    /// Returns the service error.
    pub async fn delete_all_chats<S>(&mut self, service: &S) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let result = service.delete_all_chats().await;
        self.complete_delete_all(result)
    }
}
