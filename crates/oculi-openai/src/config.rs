//! Configuration for the OpenAI-compatible client.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default values for configuration options.
mod defaults {
    /// Default request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Configuration for the OpenAI-compatible chat completion client.
///
/// The base endpoint and credential are environment-supplied external
/// configuration; both can also be passed as CLI arguments when the
/// `config` feature is enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct OpenAiConfig {
    /// Base URL of the OpenAI-compatible API.
    #[cfg_attr(
        feature = "config",
        arg(long = "api-base-url", env = "OPENAI_BASE_URL")
    )]
    pub api_base_url: Url,

    /// Bearer credential for the API.
    #[cfg_attr(
        feature = "config",
        arg(long = "api-key", env = "OPENAI_API_KEY", hide_env_values = true)
    )]
    pub api_key: String,

    /// Request timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "request-timeout-secs",
            env = "OPENAI_REQUEST_TIMEOUT_SECS",
            default_value_t = defaults::REQUEST_TIMEOUT_SECS
        )
    )]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header to send with requests.
    #[cfg_attr(feature = "config", arg(long = "user-agent", env = "OPENAI_USER_AGENT"))]
    pub user_agent: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

impl OpenAiConfig {
    /// Creates a new configuration with the given endpoint and credential.
    pub fn new(api_base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            api_base_url,
            api_key: api_key.into(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    /// Returns the effective user agent, using the default if unset.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("oculi/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Returns the chat completions endpoint for this configuration.
    pub fn completions_endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.api_base_url.as_str().trim_end_matches('/')
        )
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the credential is empty or the base
    /// URL scheme is not http(s).
    pub fn validate(&self) -> oculi_core::Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(oculi_core::Error::configuration().with_message("API key must not be empty"));
        }

        if !matches!(self.api_base_url.scheme(), "http" | "https") {
            return Err(oculi_core::Error::configuration().with_message(format!(
                "base URL must use http or https, got {}",
                self.api_base_url.scheme()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OpenAiConfig {
        OpenAiConfig::new("https://api.example.com/v1".parse().unwrap(), "sk-test")
    }

    #[test]
    fn test_config_defaults() {
        let config = config();
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert!(config.effective_user_agent().contains("oculi"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_completions_endpoint_handles_trailing_slash() {
        let config = OpenAiConfig::new("https://api.example.com/v1/".parse().unwrap(), "sk-test");
        assert_eq!(
            config.completions_endpoint(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let mut config = config();
        config.request_timeout_secs = 0;
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let mut config = config();
        config.api_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let mut config = config();
        config.api_base_url = "ftp://api.example.com".parse().unwrap();
        assert!(config.validate().is_err());
    }
}
