//! # Client Configuration
//!
//! Settings for reaching the chat backend, loaded from the environment
//! (and a `.env` file, when present).

use crate::errors::ChatError;
use std::env;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "CLIMATECHAT_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "CLIMATECHAT_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the chat backend, without a trailing slash.
    pub api_url: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Loads the configuration from `CLIMATECHAT_API_URL` and
    /// `CLIMATECHAT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ChatError> {
        dotenvy::dotenv().ok();

        let api_url = env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ChatError::MissingApiUrl)?;

        let timeout_secs = match env::var(TIMEOUT_ENV) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ChatError::InvalidConfig(format!("{TIMEOUT_ENV}={raw:?} is not a number: {e}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(api_url).with_timeout_secs(timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_env(api_url: Option<&str>, timeout: Option<&str>) {
        match api_url {
            Some(v) => env::set_var(API_URL_ENV, v),
            None => env::remove_var(API_URL_ENV),
        }
        match timeout {
            Some(v) => env::set_var(TIMEOUT_ENV, v),
            None => env::remove_var(TIMEOUT_ENV),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_url() {
        set_env(None, None);
        assert!(matches!(ClientConfig::from_env(), Err(ChatError::MissingApiUrl)));

        set_env(Some("   "), None);
        assert!(matches!(ClientConfig::from_env(), Err(ChatError::MissingApiUrl)));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_timeout() {
        set_env(Some("http://localhost:9090"), Some("abc"));
        let err = ClientConfig::from_env().unwrap_err();
        set_env(None, None);

        match err {
            ChatError::InvalidConfig(msg) => assert!(msg.contains(TIMEOUT_ENV)),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_timeout_and_trims_url() {
        set_env(Some("http://localhost:9090/"), None);
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:9090");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        set_env(Some("http://localhost:9090"), Some(" 5 "));
        let config = ClientConfig::from_env().unwrap();
        set_env(None, None);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:9090/");
        assert_eq!(config.api_url, "http://localhost:9090");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
