//! Sending messages and placeholder materialization.

#[cfg(test)]
#[path = "send_test.rs"]
mod send_test;

use tracing::{debug, info, warn};

use super::{ConversationController, ControllerError, Outcome, ValidationError};
use crate::net::types::{ChatReply, ChatRequest};
use crate::net::{ChatService, ServiceError};
use crate::state::pane::{PaneMessage, Sender};
use crate::state::thread::{ActiveThread, ThreadKey};

/// A send that has been rendered optimistically and awaits its reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendTicket {
    view: u64,
    /// `None` when sent from the placeholder.
    target: Option<String>,
    text: String,
}

impl SendTicket {
    #[must_use]
    pub fn request(&self) -> ChatRequest<'_> {
        ChatRequest { message: &self.text, thread_id: self.target.as_deref() }
    }

    #[must_use]
    pub fn thread_id(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

/// The optimistic message of the send awaiting its reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct InFlightSend {
    view: u64,
    text: String,
}

impl ConversationController {
    /// Render `text` as sent, record it in input history, and issue a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMessage`] for blank input, or
    /// [`ControllerError::SendInFlight`] while another send awaits its reply.
    pub fn begin_send(&mut self, text: &str) -> Result<SendTicket, ControllerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(self.reject(ValidationError::EmptyMessage));
        }
        if self.in_flight.is_some() {
            self.state
                .notices
                .error(ControllerError::SendInFlight.to_string());
            return Err(ControllerError::SendInFlight);
        }
        if self.state.active == ActiveThread::Empty {
            self.enter_placeholder();
        }

        let target = self.state.active.thread_id().map(str::to_owned);
        let key = self
            .state
            .active
            .key()
            .unwrap_or(ThreadKey::Placeholder);

        self.state.pane.push(PaneMessage::human(text));
        self.state.pane.awaiting_reply = true;
        self.state.history.push(key, text.to_owned());
        self.in_flight = Some(InFlightSend { view: self.view, text: text.to_owned() });

        debug!(thread_id = ?target, view = self.view, "dispatching send");
        Ok(SendTicket { view: self.view, target, text: text.to_owned() })
    }

    /// Reconcile a `/chat` reply.
    ///
    /// The reply is stale only when the active thread changed since
    /// [`begin_send`](Self::begin_send); a stale reply only refreshes the
    /// thread list. A failed call keeps the optimistic user message.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the call failed.
    pub fn complete_send(
        &mut self,
        ticket: SendTicket,
        result: Result<ChatReply, ServiceError>,
    ) -> Result<Outcome, ControllerError> {
        self.in_flight = None;
        if ticket.view != self.view {
            debug!(thread_id = ?ticket.target, view = ticket.view, "discarding stale send result");
            if let Ok(ChatReply { chats: Some(chats), .. }) = result {
                self.state.threads = chats;
            }
            return Ok(Outcome::Stale);
        }

        self.state.pane.awaiting_reply = false;
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => return Err(self.fail("Could not send message.", err)),
        };

        let thinking = if reply.has_thinking { reply.thinking } else { None };
        self.state
            .pane
            .push(PaneMessage::assistant(&reply.response, thinking));

        if ticket.target.is_none() {
            match reply.newly_created_thread_id.or(reply.active_thread_id) {
                Some(thread_id) => self.materialize(&thread_id),
                None => warn!("send from placeholder returned no thread id"),
            }
        }
        if let Some(chats) = reply.chats {
            self.state.threads = chats;
        }
        Ok(Outcome::Applied)
    }

    /// Send `text` to the active thread and wait for the reply.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any call, or the service error.
    pub async fn send_message<S>(&mut self, service: &S, text: &str) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let ticket = self.begin_send(text)?;
        let result = service.send_message(&ticket.request()).await;
        self.complete_send(ticket, result)
    }

    /// Keep the in-flight send visible across a reload of the thread it was
    /// sent to. Returns whether the pane still awaits its reply.
    pub(super) fn carry_in_flight(&self, inputs: &mut Vec<String>, messages: &mut Vec<PaneMessage>) -> bool {
        let Some(pending) = self.in_flight.as_ref().filter(|p| p.view == self.view) else {
            return false;
        };
        let echoed = messages
            .iter()
            .rev()
            .take(2)
            .any(|m| m.sender == Sender::Human && m.content == pending.text);
        if !echoed {
            messages.push(PaneMessage::human(pending.text.clone()));
            inputs.push(pending.text.clone());
        }
        true
    }

    fn materialize(&mut self, thread_id: &str) {
        info!(thread_id, "placeholder materialized");
        self.state
            .history
            .promote(&ThreadKey::Placeholder, ThreadKey::from(thread_id));
        self.set_active(ActiveThread::Real(thread_id.to_owned()));
        self.state.pane.adopt(thread_id);
    }
}
