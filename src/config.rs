//! Configuration file parser for ~/.config/shelf/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog endpoint URL. The `--endpoint` flag takes precedence.
    pub endpoint: Option<String>,

    /// Request timeout in seconds. 0 = wait indefinitely.
    pub request_timeout_secs: u64,

    /// Rows from the last rendered product at which the next page loads.
    pub scroll_threshold: usize,

    /// Delay before the "loaded" status line is cleared.
    pub status_clear_ms: u64,

    /// How long the "copied" marker stays on a product.
    pub copy_feedback_ms: u64,

    /// Destination of the HTML export.
    pub export_path: String,

    /// Optional HTML page the exported cards are placed into, at the
    /// `<!-- PRODUTOS_AQUI -->` marker. Unset exports the bare card fragment.
    pub export_template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            request_timeout_secs: 0,
            scroll_threshold: 3,
            status_clear_ms: 2000,
            copy_feedback_ms: 2000,
            export_path: "catalog_export.html".to_string(),
            export_template: None,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "endpoint",
                "request_timeout_secs",
                "scroll_threshold",
                "status_clear_ms",
                "copy_feedback_ms",
                "export_path",
                "export_template",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            endpoint = ?config.endpoint,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Request timeout, or `None` when requests may hang forever.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn status_clear_delay(&self) -> Duration {
        Duration::from_millis(self.status_clear_ms)
    }

    pub fn copy_feedback_delay(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.request_timeout_secs, 0);
        assert!(config.request_timeout().is_none());
        assert_eq!(config.scroll_threshold, 3);
        assert_eq!(config.status_clear_delay(), Duration::from_millis(2000));
        assert_eq!(config.copy_feedback_delay(), Duration::from_millis(2000));
        assert_eq!(config.export_path, "catalog_export.html");
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/shelf_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.scroll_threshold, 3);
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("shelf_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "   \n  ").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.endpoint.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let dir = std::env::temp_dir().join("shelf_config_test_partial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "endpoint = \"https://example.com/api/produtos\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://example.com/api/produtos")
        );
        assert_eq!(config.status_clear_ms, 2000);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let dir = std::env::temp_dir().join("shelf_config_test_full");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let content = r#"
endpoint = "https://example.com/api/produtos"
request_timeout_secs = 30
scroll_threshold = 5
status_clear_ms = 1500
copy_feedback_ms = 1000
export_path = "/tmp/out.html"
export_template = "/tmp/email_base.html"
"#;
        std::fs::write(&path, content).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.scroll_threshold, 5);
        assert_eq!(config.status_clear_delay(), Duration::from_millis(1500));
        assert_eq!(config.copy_feedback_delay(), Duration::from_millis(1000));
        assert_eq!(config.export_path, "/tmp/out.html");
        assert_eq!(config.export_template.as_deref(), Some("/tmp/email_base.html"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let dir = std::env::temp_dir().join("shelf_config_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let dir = std::env::temp_dir().join("shelf_config_test_unknown");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "scroll_threshold = 2\npage_size = 50\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.scroll_threshold, 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let dir = std::env::temp_dir().join("shelf_config_test_wrongtype");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "scroll_threshold = \"lots\"\n").unwrap();

        assert!(Config::load(&path).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("shelf_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
