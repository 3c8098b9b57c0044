//! Commands accepted by the user service.

use parley_database::UserRole;

/// Create a user. Carries the plaintext credential and its confirmation; the
/// service validates and hashes them, they are never stored.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub role: UserRole,
}
