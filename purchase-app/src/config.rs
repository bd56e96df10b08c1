//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub bind_addr: String,
    pub database_url: String,
    pub exchange_rate_api_url: String,
    pub storage_timeout: Duration,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "6000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let exchange_rate_api_url = lookup("EXCHANGE_RATE_API_URL")
            .unwrap_or_else(|| exchange_rates::DEFAULT_BASE_URL.to_string());

        let storage_timeout_secs: u64 = lookup("STORAGE_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("STORAGE_TIMEOUT_SECS must be a whole number of seconds")?;

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty());

        Ok(Self {
            port,
            bind_addr,
            database_url,
            exchange_rate_api_url,
            storage_timeout: Duration::from_secs(storage_timeout_secs),
            otlp_endpoint,
        })
    }

    /// Socket address the server listens on.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "sqlite://data/purchases.db")]).unwrap();

        assert_eq!(config.port, 6000);
        assert_eq!(config.listen_addr(), "0.0.0.0:6000");
        assert_eq!(config.database_url, "sqlite://data/purchases.db");
        assert_eq!(config.exchange_rate_api_url, exchange_rates::DEFAULT_BASE_URL);
        assert_eq!(config.storage_timeout, Duration::from_secs(10));
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/purchases"),
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("EXCHANGE_RATE_API_URL", "http://localhost:9000/rates"),
            ("STORAGE_TIMEOUT_SECS", "3"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.exchange_rate_api_url, "http://localhost:9000/rates");
        assert_eq!(config.storage_timeout, Duration::from_secs(3));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = load(&[("DATABASE_URL", "sqlite::memory:"), ("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("STORAGE_TIMEOUT_SECS", "-1"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("STORAGE_TIMEOUT_SECS"));
    }
}
