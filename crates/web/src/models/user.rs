//! User domain type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use wealth_ledger_core::{Currency, Email, UserId};

/// A registered user.
///
/// The password hash never leaves the repository layer; this type carries
/// only the fields route handlers are allowed to see.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique, lowercased).
    pub email: Email,
    /// Currency preselected in entry forms.
    pub default_currency: Currency,
    /// Whether the confirmation link for this email has been followed.
    pub confirmed: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
