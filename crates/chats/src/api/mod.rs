mod chats;
mod error;

pub use chats::{build_router, ChatApiState};
pub use error::{ApiError, ErrorResponse};
