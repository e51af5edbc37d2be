//! Public page route handlers (home, unauthorized, debug).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::db::{ExpenseRepository, PortfolioRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub logged_in: bool,
}

/// 401 page template.
#[derive(Template, WebTemplate)]
#[template(path = "unauthorized.html")]
pub struct UnauthorizedTemplate;

/// Diagnostic page template.
#[derive(Template, WebTemplate)]
#[template(path = "debug.html")]
pub struct DebugTemplate {
    pub email: String,
    pub user_id: String,
    pub expense_count: i64,
    pub portfolio_count: i64,
}

/// Display the home page.
pub async fn home(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    IndexTemplate {
        logged_in: user.is_some(),
    }
}

/// Display the unauthorized page with a 401 status.
pub async fn unauthorized() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, UnauthorizedTemplate)
}

/// Display per-session diagnostics: who is logged in and how much data
/// they own.
pub async fn debug(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let expense_count = ExpenseRepository::new(state.pool())
        .count_for_owner(user.id)
        .await?;
    let portfolio_count = PortfolioRepository::new(state.pool())
        .count_for_owner(user.id)
        .await?;

    Ok(DebugTemplate {
        email: user.email.to_string(),
        user_id: user.id.to_string(),
        expense_count,
        portfolio_count,
    })
}
