//! Database operations for the `wealth_ledger` PostgreSQL database.
//!
//! ## Tables
//!
//! - `users` - Registered accounts (email, password hash, confirmed flag)
//! - `finance_data` - Expense entries, one owner per row
//! - `portfolios` - Investment portfolios, one owner per row
//! - `stocks` - Holdings, owned transitively through their portfolio
//! - `tower_sessions.session` - Session storage (created by the store's own
//!   migration)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p wealth-ledger-cli -- migrate
//! ```

pub mod expenses;
pub mod portfolios;
pub mod stocks;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use expenses::ExpenseRepository;
pub use portfolios::PortfolioRepository;
pub use stocks::StockRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Entity exists but is owned by a different user.
    #[error("forbidden")]
    Forbidden,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a PostgreSQL connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
