//! OAuth2 password-grant token lifecycle.
//!
//! [`TokenSession`] owns the credentials and the current access token.
//! Construction performs one immediate token request; afterwards,
//! [`TokenSession::bearer_token`] hands out the current token, refreshing it
//! first whenever it is missing or past its expiry window.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use xbrlus_core::{Result, XbrlError};

/// Token endpoint of the XBRL US OAuth2 server (distinct from the API base).
pub const TOKEN_URL: &str = "https://api.xbrl.us/oauth2/token";

/// Tokens are treated as expired this many seconds before their actual
/// expiry, so an in-flight request cannot straddle the boundary.
const EXPIRY_MARGIN_SECS: i64 = 300;

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// HTTP request timeout for token requests.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OAuth2 password-grant credentials for the XBRL US API.
///
/// Immutable once constructed; owned by the [`TokenSession`] for its
/// lifetime.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    platform: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            platform: platform.into(),
        }
    }

    /// Returns the form fields for a password-grant token request.
    fn token_request_form(&self) -> [(&'static str, &str); 6] {
        [
            ("grant_type", "password"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
            ("platform", &self.platform),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("platform", &self.platform)
            .finish()
    }
}

/// Response body of a successful token request.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Default)]
struct TokenState {
    access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl TokenState {
    fn valid_token(&self) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expiry)) if Utc::now() < expiry => Some(token),
            _ => None,
        }
    }
}

/// A self-refreshing bearer-token session against the XBRL US OAuth2 server.
///
/// The token and its expiry are shared mutable state; a mutex guards them so
/// concurrent callers cannot issue duplicate refreshes.
#[derive(Debug)]
pub struct TokenSession {
    http: reqwest::Client,
    token_url: String,
    credentials: Credentials,
    state: Mutex<TokenState>,
}

impl TokenSession {
    /// Creates a session and performs one immediate token request.
    ///
    /// Fails with [`XbrlError::Auth`] if no usable token can be obtained;
    /// no session exists unauthenticated.
    pub async fn connect(credentials: Credentials) -> Result<Self> {
        Self::connect_to(TOKEN_URL, credentials).await
    }

    /// Like [`TokenSession::connect`], against a custom token endpoint.
    pub async fn connect_to(token_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| XbrlError::Network(e.to_string()))?;

        let session = Self {
            http,
            token_url: token_url.into(),
            credentials,
            state: Mutex::new(TokenState::default()),
        };
        session.refresh().await?;
        Ok(session)
    }

    /// Returns a token guaranteed to be inside its validity window,
    /// refreshing first if the current one is missing or expired.
    pub async fn bearer_token(&self) -> Result<String> {
        let mut state = self.state.lock().await;
        if let Some(token) = state.valid_token() {
            return Ok(token.to_string());
        }
        self.refresh_locked(&mut state).await
    }

    /// Unconditionally requests a new token and stores it.
    pub async fn refresh(&self) -> Result<String> {
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state).await
    }

    /// Returns the absolute expiry instant of the current token, if any.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.expires_at
    }

    async fn refresh_locked(&self, state: &mut TokenState) -> Result<String> {
        debug!(token_url = %self.token_url, "requesting new access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&self.credentials.token_request_form())
            .send()
            .await
            .map_err(|e| XbrlError::Auth(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(XbrlError::Auth(format!(
                "token endpoint returned HTTP {status}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| XbrlError::Auth(format!("unreadable token response: {e}")))?;

        if token.access_token.is_empty() {
            return Err(XbrlError::Auth(
                "token endpoint returned an empty access token".to_string(),
            ));
        }

        let expires_in = token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = Utc::now() + Duration::seconds(expires_in - EXPIRY_MARGIN_SECS);

        info!(%expires_at, "access token refreshed");
        state.access_token = Some(token.access_token.clone());
        state.expires_at = Some(expires_at);
        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials::new("id", "sekrit-0xc0ffee", "user@example.com", "hunter2", "rust")
    }

    async fn session_against(server: &MockServer) -> TokenSession {
        TokenSession::connect_to(server.url("/oauth2/token"), credentials())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn connect_posts_password_grant_form() {
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/oauth2/token")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_includes("grant_type=password")
                    .body_includes("client_id=id")
                    .body_includes("username=user%40example.com")
                    .body_includes("platform=rust");
                then.status(200)
                    .json_body(json!({"access_token": "tok-1", "expires_in": 3600}));
            })
            .await;

        let session = session_against(&server).await;
        assert_eq!(session.bearer_token().await.unwrap(), "tok-1");
        // connect refreshed once; bearer_token reused the stored token
        assert_eq!(token_mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn expiry_sits_300s_before_actual_expiry() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200)
                    .json_body(json!({"access_token": "tok-1", "expires_in": 3600}));
            })
            .await;

        let before = Utc::now();
        let session = session_against(&server).await;
        let after = Utc::now();
        let expires_at = session.expires_at().await.unwrap();

        // expiry is 3600 - 300 seconds after whenever the token was issued
        assert!(expires_at >= before + Duration::seconds(3300));
        assert!(expires_at <= after + Duration::seconds(3300));
    }

    #[tokio::test]
    async fn missing_expires_in_defaults_to_one_hour() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(json!({"access_token": "tok-1"}));
            })
            .await;

        let before = Utc::now();
        let session = session_against(&server).await;
        let after = Utc::now();
        let expires_at = session.expires_at().await.unwrap();

        assert!(expires_at >= before + Duration::seconds(3300));
        assert!(expires_at <= after + Duration::seconds(3300));
    }

    #[tokio::test]
    async fn expired_token_triggers_a_single_new_request() {
        let server = MockServer::start_async().await;
        // expires_in of 300 cancels out the safety margin, so the token is
        // already outside its validity window on the next call
        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200)
                    .json_body(json!({"access_token": "tok-1", "expires_in": 300}));
            })
            .await;

        let session = session_against(&server).await;
        assert_eq!(token_mock.hits_async().await, 1);

        session.bearer_token().await.unwrap();
        assert_eq!(token_mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn non_2xx_token_response_fails_construction() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(400).json_body(json!({"error": "invalid_grant"}));
            })
            .await;

        let err = TokenSession::connect_to(server.url("/oauth2/token"), credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, XbrlError::Auth(_)));
    }

    #[tokio::test]
    async fn empty_access_token_fails_construction() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200)
                    .json_body(json!({"access_token": "", "expires_in": 3600}));
            })
            .await;

        let err = TokenSession::connect_to(server.url("/oauth2/token"), credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, XbrlError::Auth(_)));
    }

    #[test]
    fn debug_redacts_secrets() {
        let debug_str = format!("{:?}", credentials());
        assert!(!debug_str.contains("sekrit-0xc0ffee"));
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
