//! Remote service configuration.

use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint configuration for the invoice service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `https://host/api/`. Trailing slashes
    /// are tolerated.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from the environment: `INVCAP_API_BASE_URL`
    /// (required) and `INVCAP_API_TIMEOUT_SECS` (optional).
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("INVCAP_API_BASE_URL")
            .map_err(|_| anyhow::anyhow!("INVCAP_API_BASE_URL is not set"))?;
        let timeout = std::env::var("INVCAP_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(Self { base_url, timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_timeout() {
        let config = ApiConfig::new("https://host/api/");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_with_timeout_overrides_default() {
        let config = ApiConfig::new("https://host/api/").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
