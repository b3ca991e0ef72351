use super::error::SessionError;
use tracing::{debug, error};

/// Short-lived token authorizing one realtime session. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Where the session client gets its tokens from
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Result<SessionToken, SessionError>;
}

/// Fetches tokens from the broker's `POST /api/get-access-token`
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    url: String,
    http: reqwest::Client,
}

impl HttpTokenSource {
    /// `broker_url` is the broker's base URL, e.g. `http://127.0.0.1:3000`
    pub fn new(broker_url: &str) -> Self {
        Self {
            url: format!(
                "{}/api/get-access-token",
                broker_url.trim_end_matches('/')
            ),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl TokenSource for HttpTokenSource {
    async fn fetch_token(&self) -> Result<SessionToken, SessionError> {
        debug!("Fetching access token from {}", self.url);

        let res = self.http.post(&self.url).send().await.map_err(|e| {
            error!("Token request failed: {}", e);
            SessionError::TokenFetch(e.to_string())
        })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| SessionError::TokenFetch(e.to_string()))?;

        if !status.is_success() {
            return Err(SessionError::TokenFetch(body));
        }
        if body.is_empty() {
            return Err(SessionError::TokenFetch("empty token".to_string()));
        }

        Ok(SessionToken::new(body))
    }
}
