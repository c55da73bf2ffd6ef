use thiserror::Error;
use url::Url;

/// Reasons a product link is not handed to the OS opener.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The record had no link (placeholder `#`).
    #[error("No product link")]
    Missing,
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Validate a product link before passing it to `open::that`.
///
/// Links come from the catalog feed, so anything other than an absolute
/// http(s) URL is refused (a `file:` or shell-looking value must never reach
/// the platform opener).
///
/// # Examples
///
/// ```
/// use shelf::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://shop.example.com/p/1").is_ok());
/// assert!(validate_url_for_open("#").is_err());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() || trimmed == crate::catalog::PLACEHOLDER_LINK {
        return Err(UrlValidationError::Missing);
    }

    let url = Url::parse(trimmed)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}
