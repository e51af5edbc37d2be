//! Authentication route handlers.
//!
//! Registration, email confirmation, login, and logout. Form failures are
//! reported by redirecting back with an `?error=` code, which the page
//! handler turns into a flash message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use wealth_ledger_core::Email;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService, ConfirmOutcome};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Registration success page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register_success.html")]
pub struct RegisterSuccessTemplate {
    pub email: String,
}

// =============================================================================
// Flash Messages
// =============================================================================

fn login_error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password".to_owned(),
        "unconfirmed" => "Please confirm your email address first".to_owned(),
        "invalid_token" => "That confirmation link is invalid or has expired".to_owned(),
        "unknown_account" => "No account matches that confirmation link".to_owned(),
        "session" => "Session error, please try again".to_owned(),
        _ => "Login failed".to_owned(),
    }
}

fn login_success_message(code: &str) -> String {
    match code {
        "confirmed" => "Email confirmed. You can log in now.".to_owned(),
        "already_confirmed" => "This email was already confirmed. You can log in.".to_owned(),
        _ => "Done.".to_owned(),
    }
}

fn register_error_message(code: &str) -> String {
    match code {
        "password_mismatch" => "Passwords do not match".to_owned(),
        "password_too_short" => "Password must be at least 8 characters".to_owned(),
        "email_taken" => {
            "Email already registered. Please log in or use a different email.".to_owned()
        }
        "invalid_email" => "Please enter a valid email address".to_owned(),
        _ => "Registration failed".to_owned(),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(register_error_message),
    }
}

/// Handle registration form submission.
///
/// Creates an unconfirmed account and dispatches the confirmation email.
/// Email delivery failures are logged and swallowed: registration has
/// already succeeded, the user is just left unconfirmed.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/register?error=password_mismatch").into_response();
    }

    let auth = AuthService::new(state.pool());
    match auth.register(&form.email, &form.password).await {
        Ok(user) => {
            dispatch_confirmation_email(&state, &user.email).await;

            RegisterSuccessTemplate {
                email: user.email.to_string(),
            }
            .into_response()
        }
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/register?error=email_taken").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/register?error=password_too_short").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/register?error=invalid_email").into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Issue a confirmation token for `email` and send the link.
async fn dispatch_confirmation_email(state: &AppState, email: &Email) {
    let token = state.tokens().issue(email);
    let link = format!(
        "{}/confirm_email/{token}",
        state.config().base_url.trim_end_matches('/')
    );

    match state.mailer() {
        Some(mailer) => {
            if let Err(e) = mailer.send_confirmation_email(email, &link).await {
                tracing::error!(error = %e, to = %email, "Failed to send confirmation email");
            } else {
                tracing::info!(to = %email, "Confirmation email sent");
            }
        }
        None => {
            tracing::warn!(to = %email, "Mail disabled; confirmation email not sent");
        }
    }
}

/// Handle a confirmation link.
///
/// Verification is stateless; a link may be followed more than once within
/// its window, and repeat confirmations are reported rather than rejected.
pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Redirect> {
    let Ok(email) = state.tokens().verify(&token) else {
        return Ok(Redirect::to("/login?error=invalid_token"));
    };

    let auth = AuthService::new(state.pool());
    let target = match auth.confirm(&email).await? {
        ConfirmOutcome::Confirmed => "/login?success=confirmed",
        ConfirmOutcome::AlreadyConfirmed => "/login?success=already_confirmed",
        ConfirmOutcome::UnknownEmail => "/login?error=unknown_account",
    };

    Ok(Redirect::to(target))
}

// =============================================================================
// Login / Logout Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(login_error_message),
        success: query.success.as_deref().map(login_success_message),
    }
}

/// Handle login form submission.
///
/// On success the user identity is written to the session; every later
/// ownership check reads it from there.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());
    match auth.authenticate(&form.email, &form.password).await {
        Ok(user) => {
            let current = CurrentUser {
                id: user.id,
                email: user.email,
            };

            if let Err(e) = set_current_user(&session, &current).await {
                tracing::error!(error = %e, "Failed to set session");
                return Redirect::to("/login?error=session").into_response();
            }

            Redirect::to("/dashboard").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(AuthError::EmailNotConfirmed) => {
            Redirect::to("/login?error=unconfirmed").into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Handle logout.
///
/// Clears the session identity and destroys the session itself.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session");
    }

    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to flush session");
    }

    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_messages_cover_known_codes() {
        assert_eq!(login_error_message("credentials"), "Invalid email or password");
        assert_eq!(
            login_error_message("unconfirmed"),
            "Please confirm your email address first"
        );
        assert_eq!(login_error_message("anything-else"), "Login failed");
    }

    #[test]
    fn test_register_error_messages_cover_known_codes() {
        assert_eq!(register_error_message("password_mismatch"), "Passwords do not match");
        assert_eq!(register_error_message("nonsense"), "Registration failed");
    }
}
