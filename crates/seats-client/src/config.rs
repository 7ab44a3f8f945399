//! Client configuration.
//!
//! - `SEATS_AERO_PARTNER_TOKEN`: partner API key, sent as `Partner-Authorization`.
//!   Read once when the configuration is built; a missing or blank value is
//!   reported as a configuration error on the first API call, not at startup.
//! - `SEATS_AERO_BASE_URL`: base URL override (default `https://seats.aero/partnerapi`).

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://seats.aero/partnerapi";
pub const TOKEN_ENV: &str = "SEATS_AERO_PARTNER_TOKEN";
pub const BASE_URL_ENV: &str = "SEATS_AERO_BASE_URL";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved configuration for [`crate::SeatsClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

// Keeps the partner token out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Build from process environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim().to_string();
            }
        }
        config.token = std::env::var(TOKEN_ENV).ok();
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    /// The partner token, trimmed. Fails when absent or blank.
    pub fn partner_token(&self) -> ClientResult<&str> {
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ClientError::config_error(format!(
                "Set the {TOKEN_ENV} environment variable with your partner API key."
            ))),
        }
    }

    /// Parse the base URL, requiring an http(s) scheme.
    pub fn parsed_base_url(&self) -> ClientResult<Url> {
        let url = Url::parse(self.base_url.trim()).map_err(|e| {
            ClientError::config_error(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ClientError::config_error(format!(
                "Base URL '{}' must be an absolute http(s) URL",
                self.base_url
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://seats.aero/partnerapi");
        assert!(config.token.is_none());
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::default().with_token("super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_partner_token_missing() {
        let err = ClientConfig::default().partner_token().unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn test_partner_token_blank() {
        let config = ClientConfig::default().with_token("   ");
        assert!(matches!(
            config.partner_token(),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_partner_token_trimmed() {
        let config = ClientConfig::default().with_token("  abc123\n");
        assert_eq!(config.partner_token().unwrap(), "abc123");
    }

    #[test]
    fn test_parsed_base_url_rejects_garbage() {
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(
            config.parsed_base_url(),
            Err(ClientError::Config(_))
        ));

        let config = ClientConfig::default().with_base_url("ftp://seats.aero/partnerapi");
        assert!(matches!(
            config.parsed_base_url(),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_token_and_base_url() {
        std::env::set_var(TOKEN_ENV, "env-token");
        std::env::set_var(BASE_URL_ENV, "http://localhost:9999/partnerapi");

        let config = ClientConfig::from_env();
        assert_eq!(config.partner_token().unwrap(), "env-token");
        assert_eq!(config.base_url, "http://localhost:9999/partnerapi");

        std::env::remove_var(TOKEN_ENV);
        std::env::remove_var(BASE_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables() {
        std::env::remove_var(TOKEN_ENV);
        std::env::set_var(BASE_URL_ENV, "  ");

        let config = ClientConfig::from_env();
        assert!(config.token.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        std::env::remove_var(BASE_URL_ENV);
    }
}
