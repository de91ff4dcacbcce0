use std::env;
use std::time::Duration;

use anyhow::{Context, Result, ensure};

use crate::error::LookupError;
use crate::registry::{self, API_BASE_URL, API_TIMEOUT_SECS};

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash
    pub api_base_url: String,
    pub api_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: API_BASE_URL.to_string(),
            api_timeout: Duration::from_secs(API_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("TRIAGE_API_BASE_URL") {
            config = config
                .with_base_url(&url)
                .context("Invalid TRIAGE_API_BASE_URL")?;
        }

        if let Some(secs) = lookup("TRIAGE_API_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .context("TRIAGE_API_TIMEOUT_SECS must be a whole number of seconds")?;
            config = config
                .with_timeout_secs(secs)
                .context("Invalid TRIAGE_API_TIMEOUT_SECS")?;
        }

        Ok(config)
    }

    /// Replace the base URL. Surrounding whitespace and trailing slashes are dropped.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let url = url.trim().trim_end_matches('/');
        ensure!(
            url.starts_with("http://") || url.starts_with("https://"),
            "Base URL must start with http:// or https://, got '{}'",
            url
        );
        self.api_base_url = url.to_string();
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self> {
        ensure!(secs > 0, "Timeout must be greater than 0 seconds");
        self.api_timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Full URL for an endpoint key against the configured base URL
    pub fn api_url(&self, endpoint_key: Option<&str>) -> Result<String, LookupError> {
        registry::api_url_for(&self.api_base_url, endpoint_key)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Backend API: {}", self.api_base_url);
        tracing::info!("  Request timeout: {}s", self.api_timeout.as_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_with_all_vars() {
        let config = config_from(&[
            ("TRIAGE_API_BASE_URL", "https://triage.example.org/"),
            ("TRIAGE_API_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.api_base_url, "https://triage.example.org");
        assert_eq!(config.api_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_with_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.api_base_url, API_BASE_URL);
        assert_eq!(config.api_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = config_from(&[("TRIAGE_API_TIMEOUT_SECS", "soon")]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("TRIAGE_API_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_timeout() {
        let result = config_from(&[("TRIAGE_API_TIMEOUT_SECS", "0")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = config_from(&[("TRIAGE_API_BASE_URL", "localhost:8000")]);
        assert!(result.unwrap_err().to_string().contains("TRIAGE_API_BASE_URL"));
    }

    #[test]
    fn test_with_base_url_normalizes() {
        let config = Config::default().with_base_url("  http://10.0.0.5:9000//  ").unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:9000");

        let err = Config::default().with_base_url("localhost:8000").unwrap_err();
        assert!(err.to_string().contains("localhost:8000"));
    }

    #[test]
    fn test_with_timeout_secs() {
        let config = Config::default().with_timeout_secs(7).unwrap();
        assert_eq!(config.api_timeout, Duration::from_secs(7));
        assert!(Config::default().with_timeout_secs(0).is_err());
    }

    #[test]
    fn test_api_url_uses_configured_base() {
        let config = config_from(&[("TRIAGE_API_BASE_URL", "http://10.0.0.5:9000")]).unwrap();

        assert_eq!(config.api_url(None).unwrap(), "http://10.0.0.5:9000");
        assert_eq!(
            config.api_url(Some("patients")).unwrap(),
            "http://10.0.0.5:9000/api/patients"
        );
        assert!(config.api_url(Some("bogus")).is_err());
    }

    #[test]
    fn test_default_matches_registry() {
        let config = Config::default();
        assert_eq!(config.api_url(Some("health")).unwrap(), registry::get_api_url(Some("health")).unwrap());
    }
}
