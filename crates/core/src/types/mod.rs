//! Core types for Wealth Ledger.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod currency;
pub mod email;
pub mod id;

pub use category::{ExpenseCategory, ParseCategoryError};
pub use currency::{Currency, ParseCurrencyError};
pub use email::{Email, EmailError};
pub use id::*;
