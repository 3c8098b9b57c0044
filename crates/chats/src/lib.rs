//! Parley chat service
//!
//! Chats are created and deleted with an audit-log row in the same
//! transaction; messages are recorded to the log only (no message table yet).

pub mod api;
pub mod services;
pub mod types;

pub use api::{build_router, ChatApiState};
pub use services::ChatService;
pub use types::{ChatServiceError, IncomingMessage};
