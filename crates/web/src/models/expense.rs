//! Expense entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::FromRow;

use wealth_ledger_core::{Currency, ExpenseCategory, ExpenseId, UserId};

use super::ValidationError;

/// A single expense entry, owned by exactly one user.
#[derive(Debug, Clone, FromRow)]
pub struct Expense {
    /// Unique expense ID.
    pub id: ExpenseId,
    /// Owning user.
    pub user_id: UserId,
    /// Date the expense occurred.
    pub date: NaiveDate,
    /// Category from the fixed set.
    pub category: ExpenseCategory,
    /// Non-negative amount in `currency` units.
    pub amount: Decimal,
    /// Currency of the amount.
    pub currency: Currency,
    /// Free-text notes.
    pub notes: String,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

/// User-submitted expense fields, used for both create and full update.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseFields {
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub currency: Currency,
    pub notes: String,
}

impl ExpenseFields {
    /// Check field shape: amount must not be negative, notes must be
    /// present. Category and currency membership is enforced by the types.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount.is_sign_negative() {
            return Err(ValidationError::NegativeAmount);
        }
        if self.notes.trim().is_empty() {
            return Err(ValidationError::MissingField("notes"));
        }
        Ok(())
    }
}
