//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate feeds.
//! Implementations can be HTTP clients, mock providers, etc.

use crate::domain::{LookbackWindow, RateRecord};

/// Error type for exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Exchange rate request failed: {0}")]
    Request(String),

    #[error("Exchange rate service returned HTTP {0}")]
    Status(u16),

    #[error("Malformed exchange rate response: {0}")]
    Decode(String),
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync + 'static {
    /// Returns the most recent rate for `currency` published inside `window`,
    /// or `None` when the feed has no matching record.
    async fn latest_rate(
        &self,
        currency: &str,
        window: LookbackWindow,
    ) -> Result<Option<RateRecord>, ExchangeError>;
}
