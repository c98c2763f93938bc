//! Client configuration.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Public endpoint of the hosted API.
pub const DEFAULT_BASE_URL: &str = "https://api.webdevpack.com";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "WDP_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "WDP_BASE_URL";

/// Immutable settings for a `WebDevPackClient`.
///
/// Only `api_key` changes what goes over the wire. `base_url` exists so the
/// client can be aimed at a local server, and `timeout` is handed to the HTTP
/// agent as its global per-call limit.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    #[serde(deserialize_with = "timeout_secs::deserialize")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `WDP_API_KEY` and `WDP_BASE_URL` from the environment.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());
        Self {
            api_key: var(API_KEY_ENV),
            base_url: var(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL without a trailing slash.
    pub(crate) fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Timeouts are written as a number of seconds in config files.
mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<f64>::deserialize(deserializer)?;
        match secs {
            Some(secs) if secs.is_finite() && secs >= 0.0 => Ok(Some(Duration::from_secs_f64(secs))),
            Some(secs) => Err(serde::de::Error::custom(format!("invalid timeout: {secs}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_api_without_key() {
        let config = ClientConfig::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new().with_base_url("http://localhost:3000/");
        assert_eq!(config.normalized_base_url(), "http://localhost:3000");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::new().with_api_key("super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"apiKey":"k","timeout":2.5}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn rejects_negative_timeout() {
        let result: Result<ClientConfig, _> = serde_json::from_str(r#"{"timeout":-1}"#);
        assert!(result.is_err());
    }
}
