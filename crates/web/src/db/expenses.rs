//! Expense repository.
//!
//! Every mutating operation performs an ownership check before touching the
//! row: `NotFound` when the expense does not exist, `Forbidden` when it is
//! owned by another user. Failed checks leave the row unchanged.

use sqlx::PgPool;

use wealth_ledger_core::{ExpenseId, UserId};

use super::RepositoryError;
use crate::models::{Expense, ExpenseFields};

const EXPENSE_COLUMNS: &str =
    "id, user_id, date, category, amount, currency, notes, created_at";

/// Repository for expense database operations.
pub struct ExpenseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ExpenseRepository<'a> {
    /// Create a new expense repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new expense for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        fields: &ExpenseFields,
    ) -> Result<Expense, RepositoryError> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "INSERT INTO finance_data (user_id, date, category, amount, currency, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {EXPENSE_COLUMNS}"
        ))
        .bind(owner)
        .bind(fields.date)
        .bind(fields.category)
        .bind(fields.amount)
        .bind(fields.currency)
        .bind(&fields.notes)
        .fetch_one(self.pool)
        .await?;

        Ok(expense)
    }

    /// List every expense belonging to `owner`, newest first.
    ///
    /// Returns an empty `Vec` when the owner has no expenses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Expense>, RepositoryError> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM finance_data \
             WHERE user_id = $1 \
             ORDER BY date DESC, id DESC"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(expenses)
    }

    /// Fetch a single expense, verifying it belongs to `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such expense exists.
    /// Returns `RepositoryError::Forbidden` if it is owned by someone else.
    pub async fn fetch_owned(
        &self,
        id: ExpenseId,
        owner: UserId,
    ) -> Result<Expense, RepositoryError> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM finance_data WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if expense.user_id != owner {
            return Err(RepositoryError::Forbidden);
        }

        Ok(expense)
    }

    /// Replace the user-editable fields of an expense owned by `owner`.
    ///
    /// # Errors
    ///
    /// Same ownership errors as [`Self::fetch_owned`]; the row is unchanged
    /// when an error is returned.
    pub async fn update(
        &self,
        id: ExpenseId,
        owner: UserId,
        fields: &ExpenseFields,
    ) -> Result<Expense, RepositoryError> {
        self.fetch_owned(id, owner).await?;

        let expense = sqlx::query_as::<_, Expense>(&format!(
            "UPDATE finance_data \
             SET date = $2, category = $3, amount = $4, currency = $5, notes = $6 \
             WHERE id = $1 \
             RETURNING {EXPENSE_COLUMNS}"
        ))
        .bind(id)
        .bind(fields.date)
        .bind(fields.category)
        .bind(fields.amount)
        .bind(fields.currency)
        .bind(&fields.notes)
        .fetch_one(self.pool)
        .await?;

        Ok(expense)
    }

    /// Delete an expense owned by `owner`.
    ///
    /// # Errors
    ///
    /// Same ownership errors as [`Self::fetch_owned`].
    pub async fn delete(&self, id: ExpenseId, owner: UserId) -> Result<(), RepositoryError> {
        self.fetch_owned(id, owner).await?;

        sqlx::query("DELETE FROM finance_data WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Count the expenses belonging to `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_owner(&self, owner: UserId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM finance_data WHERE user_id = $1")
                .bind(owner)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
