use std::time::Duration;

use futures::StreamExt;
use reqwest::redirect::Policy;

use super::{CatalogPayload, CatalogSource, SourceError};
use crate::catalog::ProductRecord;

/// Maximum accepted response body size.
const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Build the HTTP client used for catalog requests.
///
/// No client-wide timeout: the per-request bound comes from
/// [`HttpSource::with_timeout`].
pub fn build_client() -> Result<reqwest::Client, SourceError> {
    let client = reqwest::Client::builder()
        .redirect(redirect_policy())
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .build()?;
    Ok(client)
}

fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

/// Catalog endpoint reached over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            timeout: None,
        }
    }

    /// Bound the request duration. Without this a hung request never resolves.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self) -> Result<reqwest::Response, SourceError> {
        let request = self.client.get(&self.url).send();
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| SourceError::Timeout)?
                .map_err(SourceError::Transport),
            None => request.await.map_err(SourceError::Transport),
        }
    }
}

impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<ProductRecord>, SourceError> {
        tracing::debug!(url = %self.url, "Fetching catalog");
        let response = self.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = read_limited_bytes(response, MAX_PAYLOAD_SIZE).await?;
        let records = CatalogPayload::from_slice(&bytes)?.into_records()?;
        tracing::info!(url = %self.url, count = records.len(), "Catalog fetched");
        Ok(records)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, SourceError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(SourceError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(SourceError::Transport)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(SourceError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
