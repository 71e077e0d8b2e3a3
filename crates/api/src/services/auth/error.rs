//! Authentication error types.

use thiserror::Error;

use artfolio_core::EmailError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password doesn't meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// A user with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Email/password combination is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The user doesn't exist.
    #[error("user not found")]
    UserNotFound,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// The session token is missing, malformed, or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Signing a new session token failed.
    #[error("token creation failed")]
    TokenCreation,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
