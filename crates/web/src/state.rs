//! Application state shared across handlers.
//!
//! All process-wide handles (pool, mailer, token signer) live here and are
//! constructed once at startup; nothing is reachable through module-level
//! globals.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::LedgerConfig;
use crate::services::email::Mailer;
use crate::services::token::ConfirmationTokens;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: LedgerConfig,
    pool: PgPool,
    tokens: ConfirmationTokens,
    mailer: Option<Mailer>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// A broken SMTP configuration downgrades to no outbound mail with a
    /// logged warning; everything else about the app keeps working.
    #[must_use]
    pub fn new(config: LedgerConfig, pool: PgPool) -> Self {
        let tokens = ConfirmationTokens::new(&config.token_secret);

        let mailer = config.mail.as_ref().and_then(|mail| match Mailer::new(mail) {
            Ok(mailer) => Some(mailer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build SMTP transport; outbound mail disabled");
                None
            }
        });

        if mailer.is_none() {
            tracing::warn!("Outbound mail disabled; confirmation links will not be delivered");
        }

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                mailer,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the confirmation-token signer.
    #[must_use]
    pub fn tokens(&self) -> &ConfirmationTokens {
        &self.inner.tokens
    }

    /// Get the mailer, if outbound mail is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&Mailer> {
        self.inner.mailer.as_ref()
    }
}
