//! Portfolio repository.

use sqlx::PgPool;

use wealth_ledger_core::{PortfolioId, UserId};

use super::RepositoryError;
use crate::models::Portfolio;

const PORTFOLIO_COLUMNS: &str = "id, user_id, name, description, created_at";

/// Repository for portfolio database operations.
pub struct PortfolioRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PortfolioRepository<'a> {
    /// Create a new portfolio repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new portfolio for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        name: &str,
        description: &str,
    ) -> Result<Portfolio, RepositoryError> {
        let portfolio = sqlx::query_as::<_, Portfolio>(&format!(
            "INSERT INTO portfolios (user_id, name, description) \
             VALUES ($1, $2, $3) \
             RETURNING {PORTFOLIO_COLUMNS}"
        ))
        .bind(owner)
        .bind(name)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        Ok(portfolio)
    }

    /// List every portfolio belonging to `owner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Portfolio>, RepositoryError> {
        let portfolios = sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios \
             WHERE user_id = $1 \
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(portfolios)
    }

    /// Fetch a portfolio without an ownership check.
    ///
    /// Used by the add-stock flow, which does not re-verify the caller owns
    /// the target portfolio.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch(&self, id: PortfolioId) -> Result<Option<Portfolio>, RepositoryError> {
        let portfolio = sqlx::query_as::<_, Portfolio>(&format!(
            "SELECT {PORTFOLIO_COLUMNS} FROM portfolios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(portfolio)
    }

    /// Fetch a single portfolio, verifying it belongs to `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such portfolio exists.
    /// Returns `RepositoryError::Forbidden` if it is owned by someone else.
    pub async fn fetch_owned(
        &self,
        id: PortfolioId,
        owner: UserId,
    ) -> Result<Portfolio, RepositoryError> {
        let portfolio = self.fetch(id).await?.ok_or(RepositoryError::NotFound)?;

        if portfolio.user_id != owner {
            return Err(RepositoryError::Forbidden);
        }

        Ok(portfolio)
    }

    /// Delete a portfolio owned by `owner`, cascading to its stocks.
    ///
    /// Both deletes run in one transaction, so a stock added concurrently
    /// either survives with its portfolio (the transaction lost the race and
    /// the caller retries) or is removed with it; no orphan can remain.
    ///
    /// Returns the number of stocks removed alongside the portfolio.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` / `RepositoryError::Forbidden`
    /// per the ownership check, and `RepositoryError::Database` on failure.
    pub async fn delete(
        &self,
        id: PortfolioId,
        owner: UserId,
    ) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(UserId,)> =
            sqlx::query_as("SELECT user_id FROM portfolios WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let (portfolio_owner,) = row.ok_or(RepositoryError::NotFound)?;
        if portfolio_owner != owner {
            return Err(RepositoryError::Forbidden);
        }

        let stocks_removed = sqlx::query("DELETE FROM stocks WHERE portfolio_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(stocks_removed)
    }

    /// Count the portfolios belonging to `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_owner(&self, owner: UserId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM portfolios WHERE user_id = $1")
                .bind(owner)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
