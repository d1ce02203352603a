//! Client-side conversation state for a multi-thread chat backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend owns threads, titles and message history. This crate keeps
//! the view consistent with it: which thread is active, what the message
//! pane shows, the sidebar list, per-thread input history, and a
//! client-only placeholder conversation that becomes a real thread on its
//! first message.
//!
//! LAYOUT
//! ======
//! - [`net`]: wire types, the [`net::ChatService`] contract, reqwest client
//! - [`state`]: session data, mutated only by the controller
//! - [`controller`]: state transitions and reconciliation
//! - [`render`]: pure views over the state
//! - [`command`]: terminal line parsing for the `threadline` binary

pub mod command;
pub mod config;
pub mod controller;
pub mod net;
pub mod render;
pub mod state;
