//! Conversation view controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the one [`SessionState`] of a session and reconciles it against the
//! backend through [`ChatService`]. Rendering reads the state; only this
//! module writes it.
//!
//! DESIGN
//! ======
//! Each backend operation is split into a synchronous `begin_*` (validate,
//! apply optimistic effects, issue a ticket), the awaited service call, and
//! a synchronous `complete_*` that reconciles the reply. The async drivers
//! (`switch_chat`, `send_message`, ...) chain the three for callers that
//! await one action at a time. Embedders that interleave actions hold the
//! tickets themselves.
//!
//! STALENESS
//! =========
//! `epoch` is bumped whenever the active thread is set and whenever a switch
//! is dispatched. Switch tickets carry the epoch they were issued at, and a
//! completion whose epoch no longer matches is discarded. This is logical
//! cancellation: the request still runs, its result is ignored.
//!
//! Sends are keyed to `view` instead, which only moves when the active
//! thread actually changes (or a fresh placeholder is entered). A reply for
//! the thread still on screen is applied even if switches were dispatched,
//! failed or completed for that same thread in the meantime.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

#[cfg(test)]
#[path = "helpers_test.rs"]
pub(crate) mod test_helpers;

pub mod error;
mod models;
mod mutate;
mod send;

use std::time::{Duration, Instant};

use tracing::{debug, warn};

pub use error::{ControllerError, ValidationError};
pub use models::{ModelSettingsForm, ModelSettingsUpdate};
pub use mutate::DeleteTicket;
pub use send::SendTicket;
use send::InFlightSend;

use crate::config::ClientConfig;
use crate::net::types::{MessageKind, SwitchReply, ThreadSummary};
use crate::net::{ChatService, ServiceError};
use crate::state::SessionState;
use crate::state::pane::PaneMessage;
use crate::state::thread::{ActiveThread, ThreadKey};

/// Thread list and active id known at page load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bootstrap {
    pub chats: Vec<ThreadSummary>,
    pub active_thread_id: Option<String>,
}

/// How a completed operation affected the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State was reconciled with the reply.
    Applied,
    /// Nothing to do; no request was made.
    Unchanged,
    /// The reply arrived for a view that is no longer current and was ignored.
    Stale,
}

/// Which thread a metadata operation targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Active,
    Thread(String),
}

/// Named user actions the controller reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    NewChat,
    Select(String),
    Send(String),
    Rename { target: Target, title: String },
    TogglePin(Target),
    Delete(Target),
    DeleteAll,
    RefreshModels,
    UpdateModelSettings(ModelSettingsForm),
}

/// Pending `switch_chat` issued at a given epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchTicket {
    epoch: u64,
    thread_id: String,
    /// Loads the backend's pick after the active thread was deleted.
    replacement: bool,
}

impl SwitchTicket {
    #[must_use]
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }
}

pub struct ConversationController {
    state: SessionState,
    epoch: u64,
    view: u64,
    switch_pending: bool,
    in_flight: Option<InFlightSend>,
}

impl ConversationController {
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self { state, epoch: 0, view: 0, switch_pending: false, in_flight: None }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(SessionState::with_notice_ttl(Duration::from_secs(config.notice_ttl_secs)))
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn send_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Apply the cold-start bootstrap.
    ///
    /// With no thread to show, the placeholder becomes active. Otherwise the
    /// reported active thread (or the first listed one) becomes active and
    /// the returned ticket loads its messages.
    pub fn start(&mut self, bootstrap: Bootstrap) -> Option<SwitchTicket> {
        self.state.threads = bootstrap.chats;
        let target = bootstrap
            .active_thread_id
            .or_else(|| self.state.threads.first().map(|t| t.thread_id.clone()));
        match target {
            None => {
                self.enter_placeholder();
                None
            }
            Some(thread_id) => {
                self.state.pane.clear();
                self.set_active(ActiveThread::Real(thread_id.clone()));
                Some(self.dispatch_switch(thread_id))
            }
        }
    }

    /// [`start`](Self::start), then load the initial thread.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if loading the initial thread fails.
    pub async fn start_with<S>(&mut self, service: &S, bootstrap: Bootstrap) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        match self.start(bootstrap) {
            None => Ok(Outcome::Applied),
            Some(ticket) => {
                let result = service.switch_chat(ticket.thread_id()).await;
                self.complete_switch(ticket, result)
            }
        }
    }

    /// Show a fresh placeholder conversation. No backend call.
    pub fn new_chat(&mut self) {
        self.enter_placeholder();
    }

    // =========================================================================
    // SWITCHING
    // =========================================================================

    /// Start switching to `thread_id`. Returns `None` when it is already the
    /// active thread and its messages are loaded; a switch still pending
    /// elsewhere is cancelled in that case.
    pub fn begin_switch(&mut self, thread_id: &str) -> Option<SwitchTicket> {
        if self.state.active.is_real(thread_id) && self.state.pane.is_loaded_for(thread_id) {
            if self.switch_pending {
                self.switch_pending = false;
                self.epoch += 1;
                debug!(thread_id, epoch = self.epoch, "reselected active thread; pending switch cancelled");
            }
            return None;
        }
        Some(self.dispatch_switch(thread_id.to_owned()))
    }

    /// Reconcile a `switch_chat` reply.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the call failed. State is
    /// unchanged, except that a failed replacement load after deleting the
    /// active thread falls back to the placeholder.
    pub fn complete_switch(
        &mut self,
        ticket: SwitchTicket,
        result: Result<SwitchReply, ServiceError>,
    ) -> Result<Outcome, ControllerError> {
        if ticket.epoch != self.epoch {
            debug!(thread_id = %ticket.thread_id, epoch = ticket.epoch, "discarding stale switch result");
            return Ok(Outcome::Stale);
        }
        self.switch_pending = false;
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                let err = self.fail("Could not switch chat.", err);
                if ticket.replacement && self.state.active.is_real(&ticket.thread_id) {
                    warn!(thread_id = %ticket.thread_id, "replacement thread failed to load");
                    self.enter_placeholder();
                }
                return Err(err);
            }
        };

        let thread_id = reply.active_thread_id.unwrap_or(ticket.thread_id);
        let mut inputs: Vec<String> = reply
            .messages
            .iter()
            .filter(|m| m.kind == MessageKind::Human)
            .map(|m| m.content.clone())
            .collect();
        let mut messages: Vec<PaneMessage> = reply.messages.iter().map(PaneMessage::from_wire).collect();

        self.state.threads = reply.chats;
        self.set_active(ActiveThread::Real(thread_id.clone()));
        let awaiting_reply = self.carry_in_flight(&mut inputs, &mut messages);
        self.state
            .history
            .rebuild(ThreadKey::from(thread_id.as_str()), inputs);
        self.state.pane.replace(&thread_id, messages);
        self.state.pane.awaiting_reply = awaiting_reply;
        Ok(Outcome::Applied)
    }

    /// Switch to `thread_id` and wait for its history.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Service`] if the backend call fails.
    pub async fn switch_chat<S>(&mut self, service: &S, thread_id: &str) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        let Some(ticket) = self.begin_switch(thread_id) else {
            return Ok(Outcome::Unchanged);
        };
        let result = service.switch_chat(ticket.thread_id()).await;
        self.complete_switch(ticket, result)
    }

    // =========================================================================
    // INPUT HISTORY
    // =========================================================================

    /// Older submitted input of the active thread, if any.
    pub fn recall_previous(&mut self) -> Option<&str> {
        self.state.history.previous()
    }

    /// Newer submitted input; `None` once back at fresh input.
    pub fn recall_next(&mut self) -> Option<&str> {
        self.state.history.next()
    }

    /// Drop notices that have auto-dismissed by `now`.
    pub fn expire_notices(&mut self, now: Instant) {
        self.state.notices.prune(now);
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Dispatch a named event to its driver.
    ///
    /// # Errors
    ///
    /// Propagates the driver's validation or service error.
    pub async fn handle<S>(&mut self, service: &S, event: Event) -> Result<Outcome, ControllerError>
    where
        S: ChatService + ?Sized,
    {
        match event {
            Event::NewChat => {
                self.new_chat();
                Ok(Outcome::Applied)
            }
            Event::Select(thread_id) => self.switch_chat(service, &thread_id).await,
            Event::Send(text) => self.send_message(service, &text).await,
            Event::Rename { target, title } => self.rename_chat(service, target, &title).await,
            Event::TogglePin(target) => self.toggle_pin(service, target).await,
            Event::Delete(target) => self.delete_chat(service, target).await,
            Event::DeleteAll => self.delete_all_chats(service).await,
            Event::RefreshModels => self.refresh_models(service).await,
            Event::UpdateModelSettings(form) => self.update_model_settings(service, form).await,
        }
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn set_active(&mut self, active: ActiveThread) {
        self.epoch += 1;
        if active != self.state.active || active == ActiveThread::Placeholder {
            self.view += 1;
        }
        self.switch_pending = false;
        self.state.history.focus(active.key());
        self.state.active = active;
    }

    fn enter_placeholder(&mut self) {
        self.state.history.remove(&ThreadKey::Placeholder);
        self.set_active(ActiveThread::Placeholder);
        self.state.pane.clear();
    }

    fn dispatch_switch(&mut self, thread_id: String) -> SwitchTicket {
        self.epoch += 1;
        self.switch_pending = true;
        debug!(%thread_id, epoch = self.epoch, "dispatching switch");
        SwitchTicket { epoch: self.epoch, thread_id, replacement: false }
    }

    /// Resolve a target to a persisted, known thread id.
    fn resolve(&mut self, target: Target) -> Result<String, ControllerError> {
        let thread_id = match target {
            Target::Thread(id) => id,
            Target::Active => match self.state.active.thread_id() {
                Some(id) => id.to_owned(),
                None => return Err(self.reject(ValidationError::NotPersisted)),
            },
        };
        if self.state.thread(&thread_id).is_none() {
            return Err(self.reject(ValidationError::UnknownThread(thread_id)));
        }
        Ok(thread_id)
    }

    fn reject(&mut self, err: ValidationError) -> ControllerError {
        self.state.notices.error(err.to_string());
        ControllerError::Validation(err)
    }

    fn fail(&mut self, context: &'static str, err: ServiceError) -> ControllerError {
        warn!(error = %err, context, "backend call failed");
        self.state
            .notices
            .error(format!("{context} {}", err.user_message()));
        ControllerError::Service(err)
    }
}
