//! # Purchase Client SDK
//!
//! A typed Rust client for the Purchase API. Responses arrive wrapped in the
//! `{status, message, data: {data}}` envelope; the client unwraps the payload
//! and turns error envelopes into [`ClientError::Api`].

use chrono::NaiveDate;
use purchase_types::{
    ApiResponse, ConvertedPurchase, CreatePurchaseRequest, MESSAGE_ERROR, Purchase, PurchaseId,
};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response envelope carried no data")]
    MissingData,

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Purchase API client.
pub struct PurchaseClient {
    base_url: String,
    http: Client,
}

impl PurchaseClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Records a new purchase.
    pub async fn create_purchase(
        &self,
        description: &str,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<Purchase, ClientError> {
        let req = CreatePurchaseRequest {
            description: description.to_string(),
            date,
            amount,
        };
        let resp = self
            .http
            .post(format!("{}/purchase", self.base_url))
            .json(&req)
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Lists all purchases.
    pub async fn list_purchases(&self) -> Result<Vec<Purchase>, ClientError> {
        self.get("/purchase").await
    }

    /// Gets a purchase converted into `currency` (e.g. `Euro`).
    pub async fn get_converted_purchase(
        &self,
        id: PurchaseId,
        currency: &str,
    ) -> Result<ConvertedPurchase, ClientError> {
        let id = id.to_string();
        // Segments are percent-encoded
        let url = reqwest::Url::parse(&self.base_url)
            .ok()
            .and_then(|mut url| {
                url.path_segments_mut()
                    .ok()?
                    .pop_if_empty()
                    .extend(["purchase", id.as_str(), "currency", currency]);
                Some(url)
            })
            .ok_or_else(|| ClientError::InvalidUrl(self.base_url.clone()))?;

        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;

    if status.is_success() {
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        envelope.into_data().ok_or(ClientError::MissingData)
    } else {
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Picks the most specific message out of an error body.
///
/// Generic error envelopes put the detail in the payload; specific failures
/// put it in `message`. Anything that isn't an envelope is returned as-is.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiResponse<serde_json::Value>>(body) {
        Ok(envelope) => {
            let detail = envelope
                .data
                .as_ref()
                .and_then(|p| p.data.as_str())
                .map(String::from);
            match detail {
                Some(detail) if envelope.message == MESSAGE_ERROR => detail,
                _ => envelope.message,
            }
        }
        Err(_) => body.to_string(),
    }
}
