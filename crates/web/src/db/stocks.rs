//! Stock repository.
//!
//! Stocks have no direct owner column; ownership is resolved transitively
//! by joining the enclosing portfolio and comparing its `user_id` to the
//! caller.

use sqlx::{FromRow, PgPool};

use wealth_ledger_core::{PortfolioId, StockId, UserId};

use super::RepositoryError;
use crate::models::{Stock, StockFields};

const STOCK_COLUMNS: &str = "id, portfolio_id, market, symbol, name, quantity, \
                             purchase_price, purchase_date, currency, notes";

/// Row shape for transitive ownership lookups.
#[derive(FromRow)]
struct StockWithOwnerRow {
    #[sqlx(flatten)]
    stock: Stock,
    owner_id: UserId,
}

/// Repository for stock database operations.
pub struct StockRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StockRepository<'a> {
    /// Create a new stock repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new stock into `portfolio_id`.
    ///
    /// Deliberately performs no ownership check against the caller; the
    /// portfolio only has to exist (enforced by the foreign key).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the portfolio is gone.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        portfolio_id: PortfolioId,
        fields: &StockFields,
    ) -> Result<Stock, RepositoryError> {
        let stock = sqlx::query_as::<_, Stock>(&format!(
            "INSERT INTO stocks \
             (portfolio_id, market, symbol, name, quantity, purchase_price, purchase_date, currency, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {STOCK_COLUMNS}"
        ))
        .bind(portfolio_id)
        .bind(&fields.market)
        .bind(&fields.symbol)
        .bind(&fields.name)
        .bind(fields.quantity)
        .bind(fields.purchase_price)
        .bind(fields.purchase_date)
        .bind(fields.currency)
        .bind(&fields.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(stock)
    }

    /// List every stock in `portfolio_id`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> Result<Vec<Stock>, RepositoryError> {
        let stocks = sqlx::query_as::<_, Stock>(&format!(
            "SELECT {STOCK_COLUMNS} FROM stocks \
             WHERE portfolio_id = $1 \
             ORDER BY id ASC"
        ))
        .bind(portfolio_id)
        .fetch_all(self.pool)
        .await?;

        Ok(stocks)
    }

    /// Fetch a stock, verifying the transitive owner is `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such stock exists.
    /// Returns `RepositoryError::Forbidden` if its portfolio belongs to
    /// someone else.
    pub async fn fetch_owned(
        &self,
        id: StockId,
        owner: UserId,
    ) -> Result<Stock, RepositoryError> {
        let row = sqlx::query_as::<_, StockWithOwnerRow>(
            "SELECT s.id, s.portfolio_id, s.market, s.symbol, s.name, s.quantity, \
                    s.purchase_price, s.purchase_date, s.currency, s.notes, \
                    p.user_id AS owner_id \
             FROM stocks s \
             JOIN portfolios p ON p.id = s.portfolio_id \
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if row.owner_id != owner {
            return Err(RepositoryError::Forbidden);
        }

        Ok(row.stock)
    }

    /// Replace the user-editable fields of a stock owned (transitively) by
    /// `owner`.
    ///
    /// # Errors
    ///
    /// Same ownership errors as [`Self::fetch_owned`]; the row is unchanged
    /// when an error is returned.
    pub async fn update(
        &self,
        id: StockId,
        owner: UserId,
        fields: &StockFields,
    ) -> Result<Stock, RepositoryError> {
        self.fetch_owned(id, owner).await?;

        let stock = sqlx::query_as::<_, Stock>(&format!(
            "UPDATE stocks \
             SET market = $2, symbol = $3, name = $4, quantity = $5, \
                 purchase_price = $6, purchase_date = $7, currency = $8, notes = $9 \
             WHERE id = $1 \
             RETURNING {STOCK_COLUMNS}"
        ))
        .bind(id)
        .bind(&fields.market)
        .bind(&fields.symbol)
        .bind(&fields.name)
        .bind(fields.quantity)
        .bind(fields.purchase_price)
        .bind(fields.purchase_date)
        .bind(fields.currency)
        .bind(&fields.notes)
        .fetch_one(self.pool)
        .await?;

        Ok(stock)
    }

    /// Delete a stock owned (transitively) by `owner`.
    ///
    /// # Errors
    ///
    /// Same ownership errors as [`Self::fetch_owned`].
    pub async fn delete(&self, id: StockId, owner: UserId) -> Result<(), RepositoryError> {
        self.fetch_owned(id, owner).await?;

        sqlx::query("DELETE FROM stocks WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
