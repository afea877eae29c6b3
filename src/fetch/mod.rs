use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::HttpConfig;
use crate::{ResolveError, Result};

/// Source of page markup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url` and return its body as text
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP GET fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Fetcher with no timeout and no extra headers
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetcher honoring the optional timeout and user agent from config
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| ResolveError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = validate_url(url)?;

        tracing::debug!("Fetching page: {}", parsed);

        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                ResolveError::Fetch(format!("Timeout fetching: {}", url))
            } else {
                ResolveError::Fetch(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Fetch(format!("HTTP {} for: {}", status, url)));
        }

        // Decoded per the response charset, falling back to lossy UTF-8
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Fetch(e.to_string()))?;

        tracing::debug!("Fetched {} chars from: {}", body.len(), url);

        Ok(body)
    }
}

/// Validate that `url` is an absolute HTTP or HTTPS URL
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|_| ResolveError::Fetch(format!("Invalid URL format: {}", url)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ResolveError::Fetch(format!(
            "URL must use HTTP or HTTPS protocol: {}",
            url
        )));
    }

    Ok(parsed)
}
