pub mod commands;
pub mod errors;

pub use commands::CreateUserCommand;
pub use errors::UserServiceError;
