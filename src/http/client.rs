/*
[INPUT]:  HTTP configuration (base URL, timeouts) and shared token store
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing dispatch behavior
*/

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::auth::TokenStore;
use crate::http::{Result, WalletError};

/// Base URL for the wallet backend
const API_BASE_URL: &str = "https://api.lumenpay.app";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Error envelope the backend uses for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client for the wallet backend.
///
/// An explicit, constructed instance injected into both managers. The
/// bearer token lives in the shared [`TokenStore`] and is attached to
/// every outbound request while present; the client never mutates it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
    tokens: TokenStore,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(tokens: TokenStore) -> Result<Self> {
        Self::with_config(ClientConfig::default(), tokens)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, tokens: TokenStore) -> Result<Self> {
        Self::with_config_and_base_url(config, API_BASE_URL, tokens)
    }

    /// Create a new client against an explicit base URL (mock servers in tests)
    pub fn with_config_and_base_url(
        config: ClientConfig,
        base_url: &str,
        tokens: TokenStore,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            tokens,
        })
    }

    /// Get the shared token store
    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Current bearer token, or `NotAuthenticated` when absent
    pub(crate) fn bearer_token(&self) -> Result<String> {
        self.tokens.token().ok_or(WalletError::NotAuthenticated)
    }

    /// Build a request builder with the bearer header attached when a token is set
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(endpoint)?;
        debug!(%method, %url, "dispatching API request");

        let mut builder = self.http_client.request(method, url);
        if let Some(token) = self.tokens.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send a request and decode the JSON body into `T`.
    ///
    /// Transport failures map to `Network`; non-2xx responses decode the
    /// backend's `{message|error}` envelope into `Server`; a 2xx body
    /// that does not match the schema maps to `Schema`.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WalletError::Server {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| WalletError::Schema(format!("{e} in body {:.200}", String::from_utf8_lossy(&bytes))))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|envelope| envelope.message.or(envelope.error))
        .unwrap_or_else(|| {
            format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(TokenStore::new());
        assert!(client.is_ok());
    }

    #[test]
    fn test_bearer_token_requires_login() {
        let tokens = TokenStore::new();
        let client = ApiClient::new(tokens.clone()).unwrap();
        assert!(matches!(
            client.bearer_token(),
            Err(WalletError::NotAuthenticated)
        ));

        tokens.set_token("tok1".to_string(), 3600);
        assert_eq!(client.bearer_token().unwrap(), "tok1");
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"wallet name taken"}"#,
        );
        assert_eq!(message, "wallet name taken");

        let fallback = error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(fallback, "HTTP 502 Bad Gateway");
    }
}
