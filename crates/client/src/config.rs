//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKETPLACE_API_URL` - Base URL of the marketplace service
//!   (e.g., <https://marketplace.example.com/api>)
//!
//! ## Optional
//! - `MARKETPLACE_ADMIN_EMAIL` - Administrator email, used only as a fallback
//!   capability check when the auth payload carries no admin flag
//! - `MARKETPLACE_SESSION_FILE` - Path of the persisted session document
//!   (default: `$HOME/.marketplace/session.json`)
//! - `MARKETPLACE_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use marketplace_core::Email;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_FILE: &str = ".marketplace/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the marketplace service, without trailing slash
    pub api_url: String,
    /// Administrator email fallback for the session capability flag
    pub admin_email: Option<Email>,
    /// Path of the durable session document
    pub session_file: PathBuf,
    /// HTTP request timeout
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given service URL, with defaults for
    /// everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not a valid URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("MARKETPLACE_API_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_url: url.as_str().trim_end_matches('/').to_string(),
            admin_email: None,
            session_file: default_session_file(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut config = Self::new(&get_required_env("MARKETPLACE_API_URL")?)?;

        if let Some(raw) = get_optional_env("MARKETPLACE_ADMIN_EMAIL") {
            let email = Email::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("MARKETPLACE_ADMIN_EMAIL".to_string(), e.to_string())
            })?;
            config.admin_email = Some(email);
        }

        if let Some(path) = get_optional_env("MARKETPLACE_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }

        let timeout_secs = get_env_or_default(
            "MARKETPLACE_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("MARKETPLACE_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        config.http_timeout = Duration::from_secs(timeout_secs);

        Ok(config)
    }

    /// Replace the session file path.
    #[must_use]
    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = path;
        self
    }

    /// Replace the administrator email fallback.
    #[must_use]
    pub fn with_admin_email(mut self, email: Email) -> Self {
        self.admin_email = Some(email);
        self
    }
}

/// Default session file location, under `$HOME` when available.
fn default_session_file() -> PathBuf {
    std::env::var("HOME").map_or_else(
        |_| PathBuf::from(DEFAULT_SESSION_FILE),
        |home| PathBuf::from(home).join(DEFAULT_SESSION_FILE),
    )
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("https://marketplace.example.com/api/").unwrap();
        assert_eq!(config.api_url, "https://marketplace.example.com/api");
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = ClientConfig::new("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_new_defaults() {
        let config = ClientConfig::new("http://localhost:8080/api").unwrap();
        assert!(config.admin_email.is_none());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.session_file.ends_with(".marketplace/session.json"));
    }

    #[test]
    fn test_builders() {
        let email = Email::parse("admin@example.com").unwrap();
        let config = ClientConfig::new("http://localhost:8080/api")
            .unwrap()
            .with_admin_email(email.clone())
            .with_session_file(PathBuf::from("/tmp/session.json"));
        assert_eq!(config.admin_email, Some(email));
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
    }
}
