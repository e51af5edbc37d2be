//! Authentication service.
//!
//! Registration, login, and email confirmation over the user repository.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use wealth_ledger_core::{Currency, Email};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Outcome of a confirmation attempt.
///
/// Confirmation is idempotent; the non-`Confirmed` outcomes are reported to
/// the user but are not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The flag flipped from unconfirmed to confirmed.
    Confirmed,
    /// The user had already confirmed this address.
    AlreadyConfirmed,
    /// No account exists for this address.
    UnknownEmail,
}

/// Authentication service.
///
/// Handles registration, password login, and email confirmation.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new, unconfirmed user.
    ///
    /// The caller is responsible for dispatching the confirmation email;
    /// registration succeeds regardless of whether that email can be sent.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&email, &password_hash, Currency::default())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the user is absent or
    /// the password is wrong (one error for both, matching the original
    /// behavior and avoiding account enumeration).
    /// Returns `AuthError::EmailNotConfirmed` when the password matches but
    /// the confirmation link has not been followed.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // Malformed addresses cannot match any account; fold them into the
        // same error as a failed lookup.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .find_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if !user.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }

        Ok(user)
    }

    /// Confirm the email address embedded in a verified token.
    ///
    /// Idempotent: repeat confirmations and unknown addresses are reported
    /// via [`ConfirmOutcome`], never as errors.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if a query fails.
    pub async fn confirm(&self, email: &Email) -> Result<ConfirmOutcome, AuthError> {
        if self.users.mark_confirmed(email).await? {
            return Ok(ConfirmOutcome::Confirmed);
        }

        let outcome = if self.users.find_by_email(email).await?.is_some() {
            ConfirmOutcome::AlreadyConfirmed
        } else {
            ConfirmOutcome::UnknownEmail
        };

        Ok(outcome)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(matches!(
            validate_password("1234567"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_garbage_hash_maps_to_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same input").unwrap();
        let b = hash_password("same input").unwrap();
        assert_ne!(a, b);
    }
}
