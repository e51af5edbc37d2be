//! Signed email-confirmation tokens.
//!
//! Tokens are stateless: an HMAC-SHA256 tag over the email and issuance
//! time, with the key derived from a dedicated signing secret and a fixed
//! salt. Nothing is persisted, so a token may be redeemed more than once
//! within its window; the only guarantee is "this email was offered a
//! confirmation link recently".

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

use wealth_ledger_core::Email;

type HmacSha256 = Hmac<Sha256>;

/// Namespaces the derived signing key to the confirmation flow.
const KEY_SALT: &[u8] = b"email-confirm";

/// Maximum token age in seconds (1 hour).
pub const MAX_AGE_SECS: i64 = 3600;

/// The single verification failure: callers cannot tell a bad signature,
/// a malformed token, and an expired token apart.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("confirmation token is invalid or expired")]
pub struct TokenInvalidOrExpired;

/// Issues and verifies signed confirmation tokens.
#[derive(Clone)]
pub struct ConfirmationTokens {
    key: Vec<u8>,
}

impl ConfirmationTokens {
    /// Derive the signing key from the configured secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        // Salted derivation keeps confirmation tokens distinct from any
        // other use of the same secret.
        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .expect("HMAC can take a key of any size");
        mac.update(KEY_SALT);
        let key = mac.finalize().into_bytes().to_vec();

        Self { key }
    }

    /// Issue a token binding `email` to the current instant.
    #[must_use]
    pub fn issue(&self, email: &Email) -> String {
        self.issue_at(email, Utc::now().timestamp())
    }

    /// Verify a token and return the embedded email address.
    ///
    /// # Errors
    ///
    /// Returns [`TokenInvalidOrExpired`] if the token is malformed, the
    /// signature does not verify, or the token is older than
    /// [`MAX_AGE_SECS`].
    pub fn verify(&self, token: &str) -> Result<Email, TokenInvalidOrExpired> {
        self.verify_at(token, Utc::now().timestamp())
    }

    fn issue_at(&self, email: &Email, issued_at: i64) -> String {
        let payload = format!("{}.{issued_at}", URL_SAFE_NO_PAD.encode(email.as_bytes()));
        let tag = self.sign(payload.as_bytes());
        format!("{payload}.{}", URL_SAFE_NO_PAD.encode(tag))
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<Email, TokenInvalidOrExpired> {
        let parts: Vec<&str> = token.split('.').collect();
        let [email_b64, issued_at_str, tag_b64] = parts.as_slice() else {
            return Err(TokenInvalidOrExpired);
        };

        let payload = format!("{email_b64}.{issued_at_str}");
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| TokenInvalidOrExpired)?;

        // Constant-time comparison via the Mac verifier.
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC can take a key of any size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&tag).map_err(|_| TokenInvalidOrExpired)?;

        let issued_at: i64 = issued_at_str.parse().map_err(|_| TokenInvalidOrExpired)?;
        let age = now - issued_at;
        if !(0..=MAX_AGE_SECS).contains(&age) {
            return Err(TokenInvalidOrExpired);
        }

        let email_bytes = URL_SAFE_NO_PAD
            .decode(email_b64)
            .map_err(|_| TokenInvalidOrExpired)?;
        let email_str = String::from_utf8(email_bytes).map_err(|_| TokenInvalidOrExpired)?;

        Email::parse(&email_str).map_err(|_| TokenInvalidOrExpired)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC can take a key of any size");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tokens() -> ConfirmationTokens {
        ConfirmationTokens::new(&SecretString::from("a-unit-test-signing-key-0123456789"))
    }

    fn email() -> Email {
        Email::parse("user@example.com").unwrap()
    }

    #[test]
    fn test_roundtrip_within_window() {
        let service = tokens();
        let token = service.issue_at(&email(), 1_000_000);

        assert_eq!(service.verify_at(&token, 1_000_000).unwrap(), email());
        assert_eq!(service.verify_at(&token, 1_000_000 + MAX_AGE_SECS).unwrap(), email());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = tokens();
        let token = service.issue_at(&email(), 1_000_000);

        assert_eq!(
            service.verify_at(&token, 1_000_000 + MAX_AGE_SECS + 1),
            Err(TokenInvalidOrExpired)
        );
    }

    #[test]
    fn test_future_token_rejected() {
        let service = tokens();
        let token = service.issue_at(&email(), 1_000_000);

        assert_eq!(service.verify_at(&token, 999_999), Err(TokenInvalidOrExpired));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = tokens();
        let token = service.issue_at(&email(), 1_000_000);

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(
            service.verify_at(&tampered, 1_000_000),
            Err(TokenInvalidOrExpired)
        );
    }

    #[test]
    fn test_tampered_email_rejected() {
        let service = tokens();
        let token = service.issue_at(&email(), 1_000_000);

        let other_email = URL_SAFE_NO_PAD.encode(b"attacker@example.com");
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[0] = &other_email;
        let forged = parts.join(".");

        assert_eq!(
            service.verify_at(&forged, 1_000_000),
            Err(TokenInvalidOrExpired)
        );
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = tokens().issue_at(&email(), 1_000_000);
        let other = ConfirmationTokens::new(&SecretString::from("another-signing-key-abcdefghij"));

        assert_eq!(other.verify_at(&token, 1_000_000), Err(TokenInvalidOrExpired));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let service = tokens();

        for garbage in ["", "abc", "a.b", "a.b.c.d", "!!.12.??", "YQ.notanumber.YQ"] {
            assert_eq!(
                service.verify_at(garbage, 1_000_000),
                Err(TokenInvalidOrExpired),
                "expected rejection for {garbage:?}"
            );
        }
    }
}
