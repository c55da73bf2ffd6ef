//! Catalog data sources.
//!
//! The catalog is fetched exactly once per session from a [`CatalogSource`].
//! Two implementations exist:
//!
//! - [`HttpSource`] - GET against the catalog endpoint
//! - [`FileSource`] - the same JSON envelope read from disk
//!
//! Every failure mode (transport, HTTP status, rejected payload) collapses
//! into a [`SourceError`] whose [`user_message`](SourceError::user_message)
//! is what the status line shows.

mod file;
mod http;
mod payload;

use std::future::Future;

use thiserror::Error;

use crate::catalog::ProductRecord;

pub use file::FileSource;
pub use http::{build_client, HttpSource};
pub use payload::CatalogPayload;

/// Something that can deliver the product list.
pub trait CatalogSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ProductRecord>, SourceError>> + Send;
}

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {status}")]
    HttpStatus { status: u16, reason: String },
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Payload reported `success: false`
    #[error("Catalog rejected: {0}")]
    Rejected(String),
    /// Payload reported success but carried no product list
    #[error("Payload has no product list")]
    MissingProducts,
    /// Body is not the expected JSON envelope
    #[error("Invalid payload: {0}")]
    Decode(#[source] serde_json::Error),
    /// Local catalog file could not be read
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Human-readable failure reason for the status line.
    ///
    /// Priority: the payload's `error` text, then the HTTP status text, then
    /// the underlying transport message.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::Rejected(reason) => reason.clone(),
            SourceError::HttpStatus { status, reason } if reason.is_empty() => {
                format!("HTTP {}", status)
            }
            SourceError::HttpStatus { reason, .. } => reason.clone(),
            SourceError::Transport(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}
