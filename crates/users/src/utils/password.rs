//! Password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

use crate::types::UserServiceError;

/// Hash a plaintext password using Argon2 with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, UserServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| UserServiceError::PasswordHash)?
        .to_string();

    Ok(password_hash)
}
