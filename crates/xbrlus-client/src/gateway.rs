//! Authenticated gateway to the XBRL US data API.
//!
//! [`ApiGateway`] is the only component that issues data requests. Every
//! call obtains a valid bearer token from the wrapped [`TokenSession`]
//! first, so no request can go out with a missing or expired token.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use xbrlus_core::{Gateway, Result, XbrlError};

use crate::auth::TokenSession;

/// Base URL for the XBRL US data API.
pub const API_BASE_URL: &str = "https://api.xbrl.us/api/v1";

/// HTTP request timeout for data requests.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The [`Gateway`] implementation backed by a [`TokenSession`].
#[derive(Debug)]
pub struct ApiGateway {
    http: reqwest::Client,
    session: TokenSession,
    base_url: String,
}

impl ApiGateway {
    /// Creates a gateway against the production API base URL.
    #[must_use]
    pub fn new(session: TokenSession) -> Self {
        Self::with_base_url(session, API_BASE_URL)
    }

    /// Creates a gateway against a custom base URL.
    #[must_use]
    pub fn with_base_url(session: TokenSession, base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self::with_client(session, base_url, http)
    }

    /// Creates a gateway with a custom HTTP client.
    #[must_use]
    pub fn with_client(
        session: TokenSession,
        base_url: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            session,
            base_url: base_url.into(),
        }
    }

    /// Returns the wrapped token session.
    #[must_use]
    pub fn session(&self) -> &TokenSession {
        &self.session
    }
}

#[async_trait]
impl Gateway for ApiGateway {
    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        let token = self.session.bearer_token().await?;
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(endpoint, "API request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|e| XbrlError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body: Value = match response.json().await {
                Ok(body) => body,
                Err(_) => json!({"error": "could not parse error body"}),
            };
            let detail = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_owned);

            if status == reqwest::StatusCode::UNAUTHORIZED {
                // Best-effort recovery signal for a token that expired
                // server-side; the failed request itself is not replayed.
                warn!(endpoint, "401 from API, refreshing access token");
                if let Err(e) = self.session.refresh().await {
                    warn!(error = %e, "token refresh after 401 failed");
                }
            }

            return Err(XbrlError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| XbrlError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use httpmock::prelude::*;
    use httpmock::Mock;

    async fn token_mock(server: &MockServer) -> Mock<'_> {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/oauth2/token");
                then.status(200).json_body(
                    serde_json::json!({"access_token": "tok-1", "expires_in": 3600}),
                );
            })
            .await
    }

    async fn gateway_against(server: &MockServer) -> ApiGateway {
        let credentials = Credentials::new("id", "secret", "user", "pass", "rust");
        let session = TokenSession::connect_to(server.url("/oauth2/token"), credentials)
            .await
            .unwrap();
        ApiGateway::with_base_url(session, server.url("/api/v1"))
    }

    #[tokio::test]
    async fn get_carries_bearer_token_and_params() {
        let server = MockServer::start_async().await;
        token_mock(&server).await;
        let data_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/report/search")
                    .header("authorization", "Bearer tok-1")
                    .query_param("entity.ticker", "BA");
                then.status(200)
                    .json_body(serde_json::json!({"data": [{"report.id": 1}]}));
            })
            .await;

        let gateway = gateway_against(&server).await;
        let body = gateway
            .get(
                "report/search",
                &[("entity.ticker".to_string(), "BA".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(data_mock.hits_async().await, 1);
        assert_eq!(body["data"][0]["report.id"], 1);
    }

    #[tokio::test]
    async fn http_error_with_json_body_becomes_api_error() {
        let server = MockServer::start_async().await;
        token_mock(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/fact/search");
                then.status(404)
                    .json_body(serde_json::json!({"error": "no facts here"}));
            })
            .await;

        let gateway = gateway_against(&server).await;
        let err = gateway.get("fact/search", &[]).await.unwrap_err();
        match err {
            XbrlError::Api {
                status,
                reason,
                detail,
            } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
                assert_eq!(detail.as_deref(), Some("no facts here"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_error_body_is_substituted() {
        let server = MockServer::start_async().await;
        token_mock(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/fact/search");
                then.status(500).body("<html>oops</html>");
            })
            .await;

        let gateway = gateway_against(&server).await;
        let err = gateway.get("fact/search", &[]).await.unwrap_err();
        match err {
            XbrlError::Api { status, detail, .. } => {
                assert_eq!(status, 500);
                assert_eq!(detail.as_deref(), Some("could not parse error body"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn hung_request_times_out_as_network_error() {
        let server = MockServer::start_async().await;
        token_mock(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/report/search");
                then.status(200)
                    .json_body(serde_json::json!({"data": []}))
                    .delay(std::time::Duration::from_secs(2));
            })
            .await;

        let credentials = Credentials::new("id", "secret", "user", "pass", "rust");
        let session = TokenSession::connect_to(server.url("/oauth2/token"), credentials)
            .await
            .unwrap();
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(100))
            .build()
            .unwrap();
        let gateway = ApiGateway::with_client(session, server.url("/api/v1"), http);

        let err = gateway.get("report/search", &[]).await.unwrap_err();
        assert!(matches!(err, XbrlError::Network(_)));
    }

    #[tokio::test]
    async fn http_401_refreshes_once_and_still_surfaces_the_error() {
        let server = MockServer::start_async().await;
        let token = token_mock(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/report/search");
                then.status(401)
                    .json_body(serde_json::json!({"error": "token expired"}));
            })
            .await;

        let gateway = gateway_against(&server).await;
        // one hit from session construction
        assert_eq!(token.hits_async().await, 1);

        let err = gateway.get("report/search", &[]).await.unwrap_err();
        assert!(matches!(err, XbrlError::Api { status: 401, .. }));
        // exactly one proactive refresh, the request was not retried
        assert_eq!(token.hits_async().await, 2);
    }
}
