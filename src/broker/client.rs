use super::error::BrokerError;
use super::messages::CreateTokenResponse;
use crate::config::BrokerConfig;
use tracing::{error, info};

/// Issues streaming session tokens on behalf of callers that must never see
/// the API key.
///
/// Holds no per-request state; the inner `reqwest::Client` only pools
/// connections.
#[derive(Debug, Clone)]
pub struct TokenBroker {
    config: BrokerConfig,
    http: reqwest::Client,
}

impl TokenBroker {
    pub fn new(config: BrokerConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: BrokerConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn has_credential(&self) -> bool {
        self.config.credential.is_some()
    }

    /// Exchange the API key for a session token
    pub async fn issue_token(&self) -> Result<String, BrokerError> {
        let credential = self
            .config
            .credential
            .as_ref()
            .ok_or(BrokerError::MissingCredential)?;

        let endpoint = self.config.token_endpoint();
        info!("Requesting streaming token from {}", endpoint);

        let res = self
            .http
            .post(&endpoint)
            .header("x-api-key", credential.expose())
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            error!("Token endpoint error ({}): {}", status, body);
            return Err(BrokerError::Upstream {
                status,
                body,
            });
        }

        let response = match serde_json::from_str::<CreateTokenResponse>(&body) {
            Ok(response) => response,
            Err(e) => {
                error!("Error decoding token response: {} (body: {})", e, body);
                return Err(BrokerError::Decode { body });
            }
        };

        match response.into_token() {
            Some(token) => {
                info!("Streaming token issued");
                Ok(token)
            }
            None => {
                error!("Invalid response from token endpoint: {}", body);
                Err(BrokerError::Parse { body })
            }
        }
    }
}
