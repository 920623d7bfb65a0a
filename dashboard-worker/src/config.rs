//! Configuration management for the dashboards

use crate::error::{DashboardError, Result};
use crate::logging::LogLevel;
use worker::Env;

/// Dashboard worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: LogLevel,

    /// Backend base URL for the sales endpoints
    pub api_base_url: String,

    /// Backend base URL for company and price endpoints
    pub stock_api_base_url: String,

    /// Price history request parameters
    pub price_limit: u32,
    pub price_timeframe: String,

    /// Max rows shown by table sections
    pub table_row_cap: usize,

    /// Ticker used when the search box is empty
    pub default_ticker: String,

    /// Company summary length before truncation
    pub summary_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        let config = Self::from_lookup(|key| env.var(key).ok().map(|v| v.to_string()));
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| "http://localhost:5000/api".to_string());

        Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "production".to_string()),

            log_level: lookup("LOG_LEVEL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(LogLevel::Info),

            stock_api_base_url: lookup("STOCK_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| api_base_url.clone()),

            api_base_url,

            price_limit: lookup("PRICE_LIMIT")
                .map(|v| v.parse().unwrap_or(30))
                .unwrap_or(30),

            price_timeframe: lookup("PRICE_TIMEFRAME").unwrap_or_else(|| "1d".to_string()),

            table_row_cap: lookup("TABLE_ROW_CAP")
                .map(|v| v.parse().unwrap_or(10))
                .unwrap_or(10),

            default_ticker: lookup("DEFAULT_TICKER")
                .map(|v| v.trim().to_uppercase())
                .unwrap_or_default(),

            summary_chars: lookup("SUMMARY_CHARS")
                .map(|v| v.parse().unwrap_or(200))
                .unwrap_or(200),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("API_BASE_URL", &self.api_base_url),
            ("STOCK_API_BASE_URL", &self.stock_api_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(DashboardError::Config(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if self.price_limit == 0 {
            return Err(DashboardError::Config("PRICE_LIMIT must be positive".into()));
        }
        if self.table_row_cap == 0 {
            return Err(DashboardError::Config("TABLE_ROW_CAP must be positive".into()));
        }
        if self.price_timeframe.trim().is_empty() {
            return Err(DashboardError::Config("PRICE_TIMEFRAME must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.environment, "production");
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.stock_api_base_url, config.api_base_url);
        assert_eq!(config.price_limit, 30);
        assert_eq!(config.price_timeframe, "1d");
        assert_eq!(config.table_row_cap, 10);
        assert_eq!(config.summary_chars, 200);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_BASE_URL", "https://metrics.example.com/api/"),
            ("STOCK_API_BASE_URL", "http://localhost:8000"),
            ("TABLE_ROW_CAP", "5"),
            ("DEFAULT_TICKER", " bbca "),
            ("LOG_LEVEL", "debug"),
            ("PRICE_LIMIT", "not-a-number"),
        ]));
        assert_eq!(config.api_base_url, "https://metrics.example.com/api");
        assert_eq!(config.stock_api_base_url, "http://localhost:8000");
        assert_eq!(config.table_row_cap, 5);
        assert_eq!(config.default_ticker, "BBCA");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.price_limit, 30);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config::from_lookup(lookup_from(&[("API_BASE_URL", "localhost:5000")]));
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));

        let config = Config::from_lookup(lookup_from(&[("TABLE_ROW_CAP", "0")]));
        assert!(config.validate().is_err());
    }
}
