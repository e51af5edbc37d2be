//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format (registration only).
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] wealth_ledger_core::EmailError),

    /// Wrong password or no such user. Deliberately one variant: callers
    /// must not be able to tell the two cases apart.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Correct credentials, but the confirmation link has not been followed.
    #[error("email address has not been confirmed")]
    EmailNotConfirmed,

    /// A user with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
