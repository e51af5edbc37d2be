//! Integration tests for Wealth Ledger.
//!
//! # Running Tests
//!
//! These tests drive a running server over HTTP and are `#[ignore]`d by
//! default:
//!
//! ```bash
//! # 1. Migrate a test database and start the server
//! cargo run -p wealth-ledger-cli -- migrate
//! cargo run -p wealth-ledger-web
//!
//! # 2. Run the tests against it
//! LEDGER_BASE_URL=http://localhost:5000 \
//! LEDGER_TOKEN_SECRET=<same secret as the server> \
//!     cargo test -p wealth-ledger-integration-tests -- --ignored
//! ```
//!
//! `LEDGER_TOKEN_SECRET` must match the server so the tests can mint
//! confirmation links without intercepting outbound email.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use reqwest::Client;
use secrecy::SecretString;

use wealth_ledger_core::Email;
use wealth_ledger_web::services::token::ConfirmationTokens;

/// One browser-like client (cookie jar included) talking to the server
/// under test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Create a fresh context with its own cookie jar.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("LEDGER_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_owned());

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Absolute URL for a path on the server under test.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Submit the registration form.
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/register"))
            .form(&[
                ("email", email),
                ("password", password),
                ("password_confirm", password),
            ])
            .send()
            .await
            .expect("register request failed")
    }

    /// Submit the login form.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .expect("login request failed")
    }

    /// Follow a freshly minted confirmation link for `email`.
    pub async fn confirm(&self, email: &str) -> reqwest::Response {
        let token = mint_confirmation_token(email);
        self.client
            .get(self.url(&format!("/confirm_email/{token}")))
            .send()
            .await
            .expect("confirm request failed")
    }

    /// Register, confirm, and log in a brand new user; returns the email.
    pub async fn signed_in_user(&self, password: &str) -> String {
        let email = unique_email("it");
        self.register(&email, password).await;
        self.confirm(&email).await;
        let resp = self.login(&email, password).await;
        assert!(
            resp.url().path().ends_with("/dashboard"),
            "expected login to land on /dashboard, got {}",
            resp.url()
        );
        email
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Mint a confirmation token with the server's signing secret.
#[must_use]
pub fn mint_confirmation_token(email: &str) -> String {
    let secret = std::env::var("LEDGER_TOKEN_SECRET")
        .expect("LEDGER_TOKEN_SECRET must be set for integration tests");
    let tokens = ConfirmationTokens::new(&SecretString::from(secret));
    let email = Email::parse(email).expect("valid test email");
    tokens.issue(&email)
}

/// A unique throwaway email address for one test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}+{}@example.com", uuid::Uuid::new_v4().simple())
}

/// Pull the first integer that follows `prefix` out of an HTML body.
///
/// Used to discover record IDs from rendered edit/delete links.
#[must_use]
pub fn extract_id_after(body: &str, prefix: &str) -> Option<i64> {
    let start = body.find(prefix)? + prefix.len();
    let digits: String = body
        .get(start..)?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
