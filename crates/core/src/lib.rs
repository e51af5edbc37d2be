//! Wealth Ledger Core - Shared types library.
//!
//! This crate provides common types used across all Wealth Ledger components:
//! - `web` - The finance/portfolio tracking web application
//! - `cli` - Command-line tools for migrations and user maintenance
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email addresses, currencies, and expense categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
