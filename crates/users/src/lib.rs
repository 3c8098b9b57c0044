//! Parley user service
//!
//! CRUD over user accounts with an audit-log row written in the same
//! transaction as every mutation.

pub mod api;
pub mod services;
pub mod types;
pub mod utils;

pub use api::{build_router, UserApiState};
pub use services::UserService;
pub use types::{CreateUserCommand, UserServiceError};
