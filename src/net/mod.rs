//! Backend contract and its HTTP implementation.
//!
//! DESIGN
//! ======
//! The controller depends only on the [`ChatService`] trait; the reqwest
//! client is one implementation and test mocks are another.

pub mod error;
pub mod http;
pub mod service;
pub mod types;

pub use error::ServiceError;
pub use http::HttpChatService;
pub use service::ChatService;
