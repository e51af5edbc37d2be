//! Portfolio and stock route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use wealth_ledger_core::{Currency, PortfolioId, StockId};

use crate::db::{PortfolioRepository, StockRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Portfolio, Stock, StockFields};
use crate::routes::auth::MessageQuery;
use crate::routes::expenses::{form_error_message, validation_code};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// New-portfolio form data.
#[derive(Debug, Deserialize)]
pub struct PortfolioForm {
    pub name: String,
    pub description: String,
}

// =============================================================================
// Templates
// =============================================================================

/// New-portfolio form template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolio/new.html")]
pub struct PortfolioFormTemplate {
    pub error: Option<String>,
}

/// Portfolio detail template: holdings plus the unconverted value total.
#[derive(Template, WebTemplate)]
#[template(path = "portfolio/show.html")]
pub struct PortfolioShowTemplate {
    pub portfolio: Portfolio,
    pub stocks: Vec<Stock>,
    /// Sum of position values with no currency normalization.
    pub total: Decimal,
}

/// Add-stock form template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolio/add_stock.html")]
pub struct StockFormTemplate {
    pub portfolio: Portfolio,
    pub error: Option<String>,
    pub currencies: &'static [Currency],
}

/// Edit-stock form template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolio/edit_stock.html")]
pub struct StockEditTemplate {
    pub stock: Stock,
    pub error: Option<String>,
    pub currencies: &'static [Currency],
}

// =============================================================================
// Portfolio Routes
// =============================================================================

/// Display the new-portfolio form.
pub async fn new_page(
    RequireAuth(_user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    PortfolioFormTemplate {
        error: query.error.as_deref().map(form_error_message),
    }
}

/// Handle new-portfolio form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PortfolioForm>,
) -> Result<Response> {
    // Both fields are required, matching the original form contract
    if form.name.trim().is_empty() || form.description.trim().is_empty() {
        return Ok(Redirect::to("/add_portfolio?error=missing_field").into_response());
    }

    let portfolio = PortfolioRepository::new(state.pool())
        .create(user.id, form.name.trim(), form.description.trim())
        .await?;

    Ok(Redirect::to(&format!("/portfolio/{}", portfolio.id)).into_response())
}

/// Display one portfolio with its holdings and value total.
///
/// Fails with 404 for unknown IDs and 403 for portfolios owned by another
/// user.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PortfolioId>,
) -> Result<impl IntoResponse> {
    let portfolio = PortfolioRepository::new(state.pool())
        .fetch_owned(id, user.id)
        .await?;
    let stocks = StockRepository::new(state.pool())
        .list_for_portfolio(id)
        .await?;

    let total: Decimal = stocks.iter().map(Stock::position_value).sum();

    Ok(PortfolioShowTemplate {
        portfolio,
        stocks,
        total,
    })
}

/// Delete a portfolio and, in the same transaction, every stock in it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PortfolioId>,
) -> Result<Redirect> {
    let stocks_removed = PortfolioRepository::new(state.pool())
        .delete(id, user.id)
        .await?;

    tracing::info!(portfolio_id = %id, stocks_removed, "Portfolio deleted");

    Ok(Redirect::to("/dashboard"))
}

// =============================================================================
// Stock Routes
// =============================================================================

/// Display the add-stock form.
///
/// Requires a login and an existing portfolio; portfolio ownership is not
/// checked here, only on read, update, and delete.
pub async fn add_stock_page(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<PortfolioId>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let portfolio = PortfolioRepository::new(state.pool())
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("portfolio {id}")))?;

    Ok(StockFormTemplate {
        portfolio,
        error: query.error.as_deref().map(form_error_message),
        currencies: &Currency::ALL,
    })
}

/// Handle add-stock form submission. Same (absent) ownership rule as
/// [`add_stock_page`].
pub async fn add_stock(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<PortfolioId>,
    Form(fields): Form<StockFields>,
) -> Result<Response> {
    if let Err(e) = fields.validate() {
        let target = format!("/portfolio/{id}/add_stock?error={}", validation_code(&e));
        return Ok(Redirect::to(&target).into_response());
    }

    StockRepository::new(state.pool()).add(id, &fields).await?;

    Ok(Redirect::to(&format!("/portfolio/{id}")).into_response())
}

/// Display the edit form for one stock.
///
/// Ownership is transitive: the stock's portfolio must belong to the
/// caller. Fails with 404 for unknown IDs and 403 otherwise.
pub async fn edit_stock_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<StockId>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let stock = StockRepository::new(state.pool())
        .fetch_owned(id, user.id)
        .await?;

    Ok(StockEditTemplate {
        stock,
        error: query.error.as_deref().map(form_error_message),
        currencies: &Currency::ALL,
    })
}

/// Handle stock edit form submission. Ownership rules match
/// [`edit_stock_page`].
pub async fn update_stock(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<StockId>,
    Form(fields): Form<StockFields>,
) -> Result<Response> {
    if let Err(e) = fields.validate() {
        let target = format!("/stock/{id}/edit?error={}", validation_code(&e));
        return Ok(Redirect::to(&target).into_response());
    }

    let stock = StockRepository::new(state.pool())
        .update(id, user.id, &fields)
        .await?;

    Ok(Redirect::to(&format!("/portfolio/{}", stock.portfolio_id)).into_response())
}

/// Delete one stock. Ownership rules match [`edit_stock_page`].
pub async fn delete_stock(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<StockId>,
) -> Result<Redirect> {
    let repo = StockRepository::new(state.pool());
    let stock = repo.fetch_owned(id, user.id).await?;
    repo.delete(id, user.id).await?;

    Ok(Redirect::to(&format!("/portfolio/{}", stock.portfolio_id)))
}
