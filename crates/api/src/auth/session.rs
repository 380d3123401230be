//! Opaque session tokens carried in an HttpOnly cookie.
//!
//! The token is a random UUID handed to the browser. Only its SHA-256 hash is
//! stored in `user_sessions`, so a database leak does not expose live sessions.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use chrono::Duration;
use sha2::{Digest, Sha256};
use uuid::Uuid;

const DEFAULT_COOKIE_NAME: &str = "storefront_session";
const DEFAULT_LIFETIME_MINS: i64 = 120;
const DEFAULT_REMEMBER_DAYS: i64 = 30;

/// Session cookie configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Lifetime of a normal login.
    pub lifetime_mins: i64,
    /// Lifetime of a login with `remember` set.
    pub remember_days: i64,
    /// Add the `Secure` attribute (HTTPS deployments).
    pub secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Default              |
    /// |-------------------------|----------------------|
    /// | `SESSION_COOKIE_NAME`   | `storefront_session` |
    /// | `SESSION_LIFETIME_MINS` | `120`                |
    /// | `SESSION_REMEMBER_DAYS` | `30`                 |
    /// | `SESSION_COOKIE_SECURE` | `false`              |
    pub fn from_env() -> Self {
        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.into());

        let lifetime_mins: i64 = std::env::var("SESSION_LIFETIME_MINS")
            .unwrap_or_else(|_| DEFAULT_LIFETIME_MINS.to_string())
            .parse()
            .expect("SESSION_LIFETIME_MINS must be a valid i64");

        let remember_days: i64 = std::env::var("SESSION_REMEMBER_DAYS")
            .unwrap_or_else(|_| DEFAULT_REMEMBER_DAYS.to_string())
            .parse()
            .expect("SESSION_REMEMBER_DAYS must be a valid i64");

        let secure: bool = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");

        Self {
            cookie_name,
            lifetime_mins,
            remember_days,
            secure,
        }
    }

    /// How long a new session stays valid.
    pub fn lifetime(&self, remember: bool) -> Duration {
        if remember {
            Duration::days(self.remember_days)
        } else {
            Duration::minutes(self.lifetime_mins)
        }
    }
}

/// Generate a new session token.
///
/// Returns `(plaintext_token, sha256_hex_hash)`. The plaintext goes into the
/// cookie; only the hash is persisted.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `Set-Cookie` value that stores `token` for `max_age`.
pub fn session_cookie(config: &SessionConfig, token: &str, max_age: Duration) -> String {
    build_cookie(config, token, max_age.num_seconds())
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_session_cookie(config: &SessionConfig) -> String {
    build_cookie(config, "", 0)
}

fn build_cookie(config: &SessionConfig, value: &str, max_age_secs: i64) -> String {
    let mut cookie = format!(
        "{}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax",
        config.cookie_name
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Read the session token from the request's `Cookie` headers.
pub fn session_token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
