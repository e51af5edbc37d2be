//! CLI command implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use wealth_ledger_web::db::RepositoryError;
use wealth_ledger_web::services::auth::AuthError;

/// Errors shared by all CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] wealth_ledger_core::EmailError),

    #[error("No user found with email: {0}")]
    UnknownUser(String),
}

/// Connect to the application database using the same environment
/// variables as the web binary.
pub async fn connect() -> Result<PgPool, CliError> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("LEDGER_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("LEDGER_DATABASE_URL"))?;

    let pool = wealth_ledger_web::db::create_pool(&SecretString::from(database_url)).await?;

    Ok(pool)
}
