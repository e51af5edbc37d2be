//! Wealth Ledger CLI - Database migrations and user maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (including the session store)
//! wl-cli migrate
//!
//! # Manually confirm a user's email
//! wl-cli user confirm -e someone@example.com
//!
//! # Delete all expenses, portfolios, and stocks owned by a user
//! wl-cli user clear-data -e someone@example.com
//!
//! # Show a user's record and data counts
//! wl-cli user show -e someone@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `LEDGER_DATABASE_URL` - PostgreSQL connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wl-cli")]
#[command(author, version, about = "Wealth Ledger CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Maintain user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Mark a user's email as confirmed
    Confirm {
        /// Email address of the account
        #[arg(short, long)]
        email: String,
    },
    /// Delete every expense, portfolio, and stock the user owns
    ClearData {
        /// Email address of the account
        #[arg(short, long)]
        email: String,
    },
    /// Show the user's record and data counts
    Show {
        /// Email address of the account
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wl_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::User { action } => match action {
            UserAction::Confirm { email } => commands::user::confirm(&email).await,
            UserAction::ClearData { email } => commands::user::clear_data(&email).await,
            UserAction::Show { email } => commands::user::show(&email).await,
        },
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}
