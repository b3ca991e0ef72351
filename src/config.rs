use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::session::{SessionSettings, SttProvider};

/// Environment variable holding the upstream API key (server only).
pub const API_KEY_ENV: &str = "HEYGEN_API_KEY";

/// Environment variable overriding the upstream base URL.
pub const BASE_API_URL_ENV: &str = "NEXT_PUBLIC_BASE_API_URL";

pub const DEFAULT_BASE_API_URL: &str = "https://api.heygen.com";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub upstream: UpstreamConfig,
    pub session: SessionSettings,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct UpstreamConfig {
    pub api_key: Option<String>,
    pub base_api_url: String,
}

// Keeps the key out of logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_api_url", &self.base_api_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the token broker the session client talks to
    pub broker_url: String,
}

impl Config {
    /// Load configuration from an optional file plus environment overrides.
    ///
    /// `path` is passed to `config::File::with_name`, so the extension may be
    /// omitted. A missing file is not an error; every key has a default.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(path: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .set_default("service.name", "heygen-stt")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 3000)?
            .set_default("upstream.base_api_url", DEFAULT_BASE_API_URL)?
            .set_default("session.avatar_name", "default")?
            .set_default("session.stt_provider", SttProvider::Deepgram.as_str())?
            .set_default("session.language", "hi")?
            .set_default("client.broker_url", "http://127.0.0.1:3000")?
            .add_source(config::File::with_name(path).required(false));

        if let Some(api_key) = env(API_KEY_ENV) {
            builder = builder.set_override("upstream.api_key", api_key)?;
        }
        if let Some(base_api_url) = env(BASE_API_URL_ENV) {
            builder = builder.set_override("upstream.base_api_url", base_api_url)?;
        }

        let settings = builder
            .build()
            .with_context(|| format!("Failed to load config from {}", path))?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate the upstream section into the broker's configuration.
    pub fn broker_config(&self) -> Result<BrokerConfig> {
        BrokerConfig::new(
            self.upstream.api_key.as_deref(),
            &self.upstream.base_api_url,
        )
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}

/// The secret API key. Never printed.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for empty or whitespace-only keys.
    pub fn new(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.is_empty() {
            None
        } else {
            Some(Self(key.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Validated configuration injected into the token broker.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// `None` when the key is not configured; token requests then fail fast
    pub credential: Option<Credential>,

    /// Upstream base URL without a trailing slash
    pub base_api_url: String,
}

impl BrokerConfig {
    pub fn new(api_key: Option<&str>, base_api_url: &str) -> Result<Self> {
        let base_api_url = base_api_url.trim().trim_end_matches('/').to_string();

        let parsed = reqwest::Url::parse(&base_api_url)
            .with_context(|| format!("Invalid upstream base URL: {}", base_api_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("Upstream base URL must be http or https: {}", base_api_url);
        }

        Ok(Self {
            credential: api_key.and_then(Credential::new),
            base_api_url,
        })
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/v1/streaming.create_token", self.base_api_url)
    }
}
