//! Domain models for the web application.

pub mod expense;
pub mod portfolio;
pub mod session;
pub mod user;

pub use expense::{Expense, ExpenseFields};
pub use portfolio::{Portfolio, Stock, StockFields};
pub use session::{CurrentUser, session_keys};
pub use user::User;

use thiserror::Error;

/// Field-shape validation failures for user-submitted records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A numeric amount was negative.
    #[error("amount must not be negative")]
    NegativeAmount,

    /// A stock quantity was zero or negative.
    #[error("quantity must be a positive integer")]
    NonPositiveQuantity,

    /// A required text field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),
}
