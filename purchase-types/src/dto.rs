//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::flexible_date;

// ─────────────────────────────────────────────────────────────────────────────
// Purchase DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a new purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePurchaseRequest {
    /// What was bought
    #[schema(example = "Office chair")]
    pub description: String,
    /// Purchase date (`YYYY-MM-DD` or an RFC 3339 timestamp)
    #[serde(with = "flexible_date")]
    #[schema(value_type = String, example = "2024-03-15")]
    pub date: NaiveDate,
    /// Amount in the purchase's own currency
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 100.0)]
    pub amount: Decimal,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelope
// ─────────────────────────────────────────────────────────────────────────────

pub const MESSAGE_SUCCESS: &str = "success";
pub const MESSAGE_ERROR: &str = "error";

/// Envelope wrapping every API response.
///
/// ```json
/// { "status": 200, "message": "success", "data": { "data": ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// `success`, `error`, or a specific failure message
    pub message: String,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload<T>>,
}

/// Inner `{ "data": ... }` wrapper of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload<T> {
    pub data: T,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn success(status: u16, data: T) -> Self {
        Self {
            status,
            message: MESSAGE_SUCCESS.to_string(),
            data: Some(Payload { data }),
        }
    }

    /// Response with a message and no payload.
    pub fn message_only(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    /// Unwraps the payload, if any.
    pub fn into_data(self) -> Option<T> {
        self.data.map(|p| p.data)
    }
}

impl ApiResponse<String> {
    /// Generic error response; the detail goes in the payload.
    pub fn error(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            message: MESSAGE_ERROR.to_string(),
            data: Some(Payload {
                data: detail.into(),
            }),
        }
    }
}
