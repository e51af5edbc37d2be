//! Portfolio and stock holding domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::FromRow;

use wealth_ledger_core::{Currency, PortfolioId, StockId, UserId};

use super::ValidationError;

/// An investment portfolio, owned by exactly one user.
///
/// Deleting a portfolio removes every stock that references it.
#[derive(Debug, Clone, FromRow)]
pub struct Portfolio {
    /// Unique portfolio ID.
    pub id: PortfolioId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// When the portfolio was created.
    pub created_at: DateTime<Utc>,
}

/// A stock holding inside a portfolio.
///
/// Ownership of the enclosing user is transitive through the portfolio.
#[derive(Debug, Clone, FromRow)]
pub struct Stock {
    /// Unique stock ID.
    pub id: StockId,
    /// Enclosing portfolio.
    pub portfolio_id: PortfolioId,
    /// Market/country code (e.g. "US", "IN").
    pub market: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Number of units held (positive).
    pub quantity: i32,
    /// Price paid per unit (non-negative).
    pub purchase_price: Decimal,
    /// Date of purchase.
    pub purchase_date: NaiveDate,
    /// Currency of the purchase price.
    pub currency: Currency,
    /// Free-text notes.
    pub notes: String,
}

impl Stock {
    /// Total position value: quantity times purchase price.
    ///
    /// No currency conversion is applied anywhere in the application;
    /// totals over mixed-currency holdings are plain sums.
    #[must_use]
    pub fn position_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.purchase_price
    }
}

/// User-submitted stock fields, used for both create and full update.
#[derive(Debug, Clone, Deserialize)]
pub struct StockFields {
    pub market: String,
    pub symbol: String,
    pub name: String,
    pub quantity: i32,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub currency: Currency,
    pub notes: String,
}

impl StockFields {
    /// Check field shape: quantity must be positive, price non-negative,
    /// and the identifying text fields non-empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }
        if self.purchase_price.is_sign_negative() {
            return Err(ValidationError::NegativeAmount);
        }
        if self.market.trim().is_empty() {
            return Err(ValidationError::MissingField("market"));
        }
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wealth_ledger_core::{PortfolioId, StockId};

    fn stock(quantity: i32, price: Decimal) -> Stock {
        Stock {
            id: StockId::new(1),
            portfolio_id: PortfolioId::new(1),
            market: "US".to_owned(),
            symbol: "AAPL".to_owned(),
            name: "Apple Inc.".to_owned(),
            quantity,
            purchase_price: price,
            purchase_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            currency: Currency::USD,
            notes: String::new(),
        }
    }

    fn fields() -> StockFields {
        StockFields {
            market: "US".to_owned(),
            symbol: "AAPL".to_owned(),
            name: "Apple Inc.".to_owned(),
            quantity: 10,
            purchase_price: Decimal::new(18950, 2),
            purchase_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            currency: Currency::USD,
            notes: String::new(),
        }
    }

    #[test]
    fn test_position_value() {
        let stock = stock(10, Decimal::new(18950, 2));
        assert_eq!(stock.position_value(), Decimal::new(189_500, 2));
    }

    #[test]
    fn test_validate_accepts_zero_price() {
        let mut f = fields();
        f.purchase_price = Decimal::ZERO;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_quantity() {
        let mut f = fields();
        f.quantity = 0;
        assert_eq!(f.validate(), Err(ValidationError::NonPositiveQuantity));
        f.quantity = -3;
        assert_eq!(f.validate(), Err(ValidationError::NonPositiveQuantity));
    }

    #[test]
    fn test_validate_rejects_blank_symbol() {
        let mut f = fields();
        f.symbol = "  ".to_owned();
        assert_eq!(f.validate(), Err(ValidationError::MissingField("symbol")));
    }
}
