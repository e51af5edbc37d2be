//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Auth
//! GET  /register               - Registration page
//! POST /register               - Registration action (sends confirmation email)
//! GET  /confirm_email/{token}  - Email confirmation link
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//!
//! # Expenses (require auth)
//! GET  /dashboard              - Expense table + portfolio summary
//! GET  /form                   - New expense form
//! POST /form                   - Create expense
//! GET  /edit/{id}              - Edit expense form (owner only)
//! POST /edit/{id}              - Update expense (owner only)
//! POST /delete/{id}            - Delete expense (owner only)
//!
//! # Portfolios & stocks (require auth)
//! GET  /add_portfolio          - New portfolio form
//! POST /add_portfolio          - Create portfolio
//! GET  /portfolio/{id}         - Portfolio detail with holdings (owner only)
//! POST /portfolio/{id}/delete  - Delete portfolio + its stocks (owner only)
//! GET  /portfolio/{id}/add_stock - Add stock form
//! POST /portfolio/{id}/add_stock - Add stock
//! GET  /stock/{id}/edit        - Edit stock form (transitive owner only)
//! POST /stock/{id}/edit        - Update stock (transitive owner only)
//! POST /stock/{id}/delete      - Delete stock (transitive owner only)
//!
//! # Misc
//! GET  /unauthorized           - 401 page
//! GET  /debug                  - Session/data diagnostics (requires auth)
//! ```

pub mod auth;
pub mod expenses;
pub mod pages;
pub mod portfolio;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/confirm_email/{token}", get(auth::confirm_email))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the expense routes router.
pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(expenses::dashboard))
        .route("/form", get(expenses::form_page).post(expenses::create))
        .route("/edit/{id}", get(expenses::edit_page).post(expenses::update))
        .route("/delete/{id}", post(expenses::delete))
}

/// Create the portfolio and stock routes router.
pub fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/add_portfolio",
            get(portfolio::new_page).post(portfolio::create),
        )
        .route("/portfolio/{id}", get(portfolio::show))
        .route("/portfolio/{id}/delete", post(portfolio::delete))
        .route(
            "/portfolio/{id}/add_stock",
            get(portfolio::add_stock_page).post(portfolio::add_stock),
        )
        .route(
            "/stock/{id}/edit",
            get(portfolio::edit_stock_page).post(portfolio::update_stock),
        )
        .route("/stock/{id}/delete", post(portfolio::delete_stock))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/unauthorized", get(pages::unauthorized))
        .route("/debug", get(pages::debug))
        .merge(auth_routes())
        .merge(expense_routes())
        .merge(portfolio_routes())
}
