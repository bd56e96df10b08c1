//! Treasury Rates-of-Exchange Feed Client
//!
//! HTTP adapter for the U.S. Treasury Fiscal Data "rates of exchange"
//! dataset, implementing the [`ExchangeRateProvider`] port.
//!
//! A lookup asks the feed for the single most recent record whose
//! `record_date` falls inside the lookback window for the requested currency:
//!
//! ```text
//! ?filter=record_date:gte:2023-09-15,record_date:lte:2024-03-15,currency:eq:Euro
//! &sort=-record_date&page[number]=1&page[size]=1
//! ```
//!
//! Currencies use the feed's own naming (`Euro`, `Canada-Dollar`, ...) and are
//! passed through verbatim.
//!
//! There is no timeout, retry, or caching here: each lookup is one request.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use purchase_types::{ExchangeError, ExchangeRateProvider, LookbackWindow, RateRecord};

/// Public Treasury endpoint for historical exchange rates.
pub const DEFAULT_BASE_URL: &str =
    "https://api.fiscaldata.treasury.gov/services/api/fiscal_service/v1/accounting/od/rates_of_exchange";

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    data: Vec<FeedRecord>,
}

#[derive(Debug, Deserialize)]
struct FeedRecord {
    record_date: NaiveDate,
    #[serde(default)]
    currency: Option<String>,
    #[serde(alias = "exchangeRate")]
    exchange_rate: String,
}

/// Query parameters selecting the newest rate for `currency` in `window`.
pub fn query_params(currency: &str, window: LookbackWindow) -> Vec<(&'static str, String)> {
    vec![
        (
            "filter",
            format!(
                "record_date:gte:{},record_date:lte:{},currency:eq:{}",
                window.start().format("%Y-%m-%d"),
                window.end().format("%Y-%m-%d"),
                currency
            ),
        ),
        ("sort", "-record_date".to_string()),
        ("page[number]", "1".to_string()),
        ("page[size]", "1".to_string()),
    ]
}

/// Decodes a feed response body, returning the first record if any.
pub fn parse_response(body: &str, currency: &str) -> Result<Option<RateRecord>, ExchangeError> {
    let response: FeedResponse =
        serde_json::from_str(body).map_err(|e| ExchangeError::Decode(e.to_string()))?;

    Ok(response.data.into_iter().next().map(|r| RateRecord {
        record_date: r.record_date,
        currency: r.currency.unwrap_or_else(|| currency.to_string()),
        exchange_rate: r.exchange_rate,
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Exchange rate provider backed by the Treasury feed.
#[derive(Debug, Clone)]
pub struct TreasuryRates {
    base_url: String,
    http: reqwest::Client,
}

impl TreasuryRates {
    /// Creates a client for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for TreasuryRates {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ExchangeRateProvider for TreasuryRates {
    #[tracing::instrument(skip(self, window), fields(window = %window))]
    async fn latest_rate(
        &self,
        currency: &str,
        window: LookbackWindow,
    ) -> Result<Option<RateRecord>, ExchangeError> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&query_params(currency, window))
            .send()
            .await
            .map_err(|e| ExchangeError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "exchange rate feed returned an error");
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ExchangeError::Request(e.to_string()))?;

        let record = parse_response(&body, currency)?;
        tracing::debug!(found = record.is_some(), "exchange rate lookup finished");
        Ok(record)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
