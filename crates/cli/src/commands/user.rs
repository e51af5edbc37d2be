//! User maintenance commands.
//!
//! Operational equivalents of the manual fixes support occasionally needs:
//! confirming an address whose email never arrived, wiping a user's data,
//! and inspecting an account.

use wealth_ledger_core::Email;
use wealth_ledger_web::db::{
    ExpenseRepository, PortfolioRepository, UserRepository,
};
use wealth_ledger_web::services::auth::{AuthService, ConfirmOutcome};

use super::CliError;

/// Mark a user's email as confirmed, bypassing the token flow.
///
/// # Errors
///
/// Returns `CliError` on connection or query failure, or if the email is
/// malformed.
pub async fn confirm(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let pool = super::connect().await?;

    let outcome = AuthService::new(&pool).confirm(&email).await?;

    #[allow(clippy::print_stdout)]
    match outcome {
        ConfirmOutcome::Confirmed => println!("Email {email} confirmed successfully."),
        ConfirmOutcome::AlreadyConfirmed => println!("Email {email} was already confirmed."),
        ConfirmOutcome::UnknownEmail => println!("No user found with email: {email}"),
    }

    Ok(())
}

/// Delete every expense, portfolio, and stock owned by the user.
///
/// The account itself is kept.
///
/// # Errors
///
/// Returns `CliError::UnknownUser` if no account matches the email.
pub async fn clear_data(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let pool = super::connect().await?;

    let user = UserRepository::new(&pool)
        .find_by_email(&email)
        .await?
        .ok_or_else(|| CliError::UnknownUser(email.to_string()))?;

    let mut tx = pool.begin().await?;

    let stocks = sqlx::query(
        "DELETE FROM stocks WHERE portfolio_id IN \
         (SELECT id FROM portfolios WHERE user_id = $1)",
    )
    .bind(user.id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let portfolios = sqlx::query("DELETE FROM portfolios WHERE user_id = $1")
        .bind(user.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let expenses = sqlx::query("DELETE FROM finance_data WHERE user_id = $1")
        .bind(user.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Cleared data for {email}: {expenses} expenses, {portfolios} portfolios, {stocks} stocks."
        );
    }

    Ok(())
}

/// Print the user's record and how much data they own.
///
/// # Errors
///
/// Returns `CliError::UnknownUser` if no account matches the email.
pub async fn show(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let pool = super::connect().await?;

    let user = UserRepository::new(&pool)
        .find_by_email(&email)
        .await?
        .ok_or_else(|| CliError::UnknownUser(email.to_string()))?;

    let expenses = ExpenseRepository::new(&pool)
        .count_for_owner(user.id)
        .await?;
    let portfolios = PortfolioRepository::new(&pool)
        .count_for_owner(user.id)
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!("User #{} <{}>", user.id, user.email);
        println!("  confirmed:        {}", user.confirmed);
        println!("  default currency: {}", user.default_currency);
        println!("  registered:       {}", user.created_at);
        println!("  expenses:         {expenses}");
        println!("  portfolios:       {portfolios}");
    }

    Ok(())
}
