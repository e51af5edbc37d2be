//! Expense route handlers: dashboard, entry form, edit, delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

use wealth_ledger_core::{Currency, ExpenseCategory, ExpenseId};

use crate::db::{ExpenseRepository, PortfolioRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Expense, ExpenseFields, Portfolio, ValidationError};
use crate::routes::auth::MessageQuery;
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Dashboard template: the expense table plus a portfolio summary.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub email: String,
    pub expenses: Vec<Expense>,
    pub portfolios: Vec<Portfolio>,
}

/// New-expense form template.
#[derive(Template, WebTemplate)]
#[template(path = "expense/form.html")]
pub struct ExpenseFormTemplate {
    pub error: Option<String>,
    pub categories: &'static [ExpenseCategory],
    pub currencies: &'static [Currency],
}

/// Edit-expense form template.
#[derive(Template, WebTemplate)]
#[template(path = "expense/edit.html")]
pub struct ExpenseEditTemplate {
    pub expense: Expense,
    pub error: Option<String>,
    pub categories: &'static [ExpenseCategory],
    pub currencies: &'static [Currency],
}

// =============================================================================
// Flash Messages
// =============================================================================

/// Stable query-string code for a validation failure.
pub(crate) const fn validation_code(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::NegativeAmount => "negative_amount",
        ValidationError::NonPositiveQuantity => "bad_quantity",
        ValidationError::MissingField(_) => "missing_field",
    }
}

pub(crate) fn form_error_message(code: &str) -> String {
    match code {
        "negative_amount" => "Amount must not be negative".to_owned(),
        "bad_quantity" => "Quantity must be a positive whole number".to_owned(),
        "missing_field" => "Please fill in all required fields".to_owned(),
        _ => "Please check the form and try again".to_owned(),
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the dashboard: every expense the user owns (newest first) and
/// their portfolios.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let expenses = ExpenseRepository::new(state.pool())
        .list_for_owner(user.id)
        .await?;
    let portfolios = PortfolioRepository::new(state.pool())
        .list_for_owner(user.id)
        .await?;

    Ok(DashboardTemplate {
        email: user.email.to_string(),
        expenses,
        portfolios,
    })
}

/// Display the new-expense form.
pub async fn form_page(
    RequireAuth(_user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ExpenseFormTemplate {
        error: query.error.as_deref().map(form_error_message),
        categories: &ExpenseCategory::ALL,
        currencies: &Currency::ALL,
    }
}

/// Handle new-expense form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(fields): Form<ExpenseFields>,
) -> Result<Response> {
    if let Err(e) = fields.validate() {
        let target = format!("/form?error={}", validation_code(&e));
        return Ok(Redirect::to(&target).into_response());
    }

    ExpenseRepository::new(state.pool())
        .create(user.id, &fields)
        .await?;

    Ok(Redirect::to("/dashboard").into_response())
}

/// Display the edit form for one expense.
///
/// Fails with 404 for unknown IDs and 403 for records owned by another
/// user.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ExpenseId>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let expense = ExpenseRepository::new(state.pool())
        .fetch_owned(id, user.id)
        .await?;

    Ok(ExpenseEditTemplate {
        expense,
        error: query.error.as_deref().map(form_error_message),
        categories: &ExpenseCategory::ALL,
        currencies: &Currency::ALL,
    })
}

/// Handle edit form submission. Ownership rules match [`edit_page`].
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ExpenseId>,
    Form(fields): Form<ExpenseFields>,
) -> Result<Response> {
    if let Err(e) = fields.validate() {
        let target = format!("/edit/{id}?error={}", validation_code(&e));
        return Ok(Redirect::to(&target).into_response());
    }

    ExpenseRepository::new(state.pool())
        .update(id, user.id, &fields)
        .await?;

    Ok(Redirect::to("/dashboard").into_response())
}

/// Delete one expense. Ownership rules match [`edit_page`].
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ExpenseId>,
) -> Result<Redirect> {
    ExpenseRepository::new(state.pool())
        .delete(id, user.id)
        .await?;

    Ok(Redirect::to("/dashboard"))
}
