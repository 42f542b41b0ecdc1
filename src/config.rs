//! Runtime configuration for the dashboard.
//!
//! Defaults come from [`crate::platform::config`]; [`DashboardConfig::from_env`] lets a
//! deployment point the dashboard at another API or change the cache lifetime without a
//! rebuild.

use std::time::Duration;

use crate::{
    errors::{DashboardError, DashboardResult},
    platform::{
        DEFAULT_API_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_COMPETITOR_PAGE_SIZE,
        DEFAULT_KEYWORD_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT,
    },
};

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "SEO_DASHBOARD_API_URL";
/// Environment variable overriding the cache TTL, in seconds
pub const ENV_CACHE_TTL_SECS: &str = "SEO_DASHBOARD_CACHE_TTL_SECS";
/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "SEO_DASHBOARD_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Base URL; endpoint path segments are appended to it
    pub base_url: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    pub keyword_page_size: usize,
    pub competitor_page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            keyword_page_size: DEFAULT_KEYWORD_PAGE_SIZE,
            competitor_page_size: DEFAULT_COMPETITOR_PAGE_SIZE,
        }
    }
}

impl DashboardConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Defaults overridden by `SEO_DASHBOARD_*` environment variables.
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(ttl) = lookup(ENV_CACHE_TTL_SECS) {
            config.cache_ttl = parse_secs(ENV_CACHE_TTL_SECS, &ttl)?;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout = parse_secs(ENV_TIMEOUT_SECS, &timeout)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_page_sizes(mut self, keywords: usize, competitors: usize) -> Self {
        self.keyword_page_size = keywords;
        self.competitor_page_size = competitors;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(DashboardError::Configuration(
                "API base URL is empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DashboardError::Configuration(format!(
                "API base URL must be http(s): {url}"
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(DashboardError::Configuration(
                "request timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Full URL of one endpoint
    pub fn endpoint_url(&self, segment: &str) -> String {
        format!("{}/{}", self.base_url.trim().trim_end_matches('/'), segment)
    }
}

fn parse_secs(name: &str, value: &str) -> DashboardResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| DashboardError::Configuration(format!("{name} is not a number: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.keyword_page_size, 10);
        assert_eq!(config.competitor_page_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_url_joins_cleanly() {
        let config = DashboardConfig::new("https://example.com/api/");
        assert_eq!(
            config.endpoint_url("domainInfo"),
            "https://example.com/api/domainInfo"
        );
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://localhost:8080"),
            (ENV_CACHE_TTL_SECS, "60"),
            (ENV_TIMEOUT_SECS, " 5 "),
        ]);
        let config =
            DashboardConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_ttl = DashboardConfig::from_lookup(|name| {
            (name == ENV_CACHE_TTL_SECS).then(|| "soon".to_string())
        });
        assert!(matches!(bad_ttl, Err(DashboardError::Configuration(_))));

        let bad_url =
            DashboardConfig::from_lookup(|name| (name == ENV_API_URL).then(|| "ftp://x".to_string()));
        assert!(bad_url.is_err());

        let zero_timeout = DashboardConfig::default().with_request_timeout(Duration::ZERO);
        assert!(zero_timeout.validate().is_err());
    }
}
