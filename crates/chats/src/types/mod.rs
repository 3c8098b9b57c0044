pub mod errors;
pub mod messages;

pub use errors::ChatServiceError;
pub use messages::IncomingMessage;
