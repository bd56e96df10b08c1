//! Purchase domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "3f0e8f4c-6a4b-4b7e-9a37-0d5b6c1f2a10")]
pub struct PurchaseId(Uuid);

impl PurchaseId {
    /// Creates a new random PurchaseId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PurchaseId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PurchaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PurchaseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A recorded purchase.
///
/// Purchases are immutable once created. The amount is in the purchase's
/// native currency, which the service does not track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Unique identifier
    pub id: PurchaseId,
    /// What was bought
    #[schema(example = "Office chair")]
    pub description: String,
    /// Calendar date of the purchase
    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date: NaiveDate,
    /// Purchase amount
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 100.0)]
    pub amount: Decimal,
}

impl Purchase {
    /// Creates a new purchase with a fresh identifier.
    pub fn new(description: String, date: NaiveDate, amount: Decimal) -> Result<Self, DomainError> {
        if description.trim().is_empty() {
            return Err(DomainError::EmptyDescription);
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount);
        }

        Ok(Self {
            id: PurchaseId::new(),
            description,
            date,
            amount,
        })
    }

    /// Reconstructs a purchase from stored fields.
    pub fn from_parts(id: PurchaseId, description: String, date: NaiveDate, amount: Decimal) -> Self {
        Self {
            id,
            description,
            date,
            amount,
        }
    }

    /// Converts this purchase with the given raw exchange rate.
    pub fn convert(self, rate: Decimal) -> Result<ConvertedPurchase, DomainError> {
        let converted = rate
            .checked_mul(self.amount)
            .ok_or(DomainError::ConversionOverflow)?;

        Ok(ConvertedPurchase {
            exchange_rate: round_cents(rate),
            converted_amount: round_cents(converted),
            purchase: self,
        })
    }
}

/// A purchase augmented with a conversion into a target currency.
///
/// Built per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedPurchase {
    #[serde(flatten)]
    pub purchase: Purchase,
    /// Rate used for the conversion, rounded to 2 decimal places
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0.91)]
    pub exchange_rate: Decimal,
    /// `amount * rate`, rounded to 2 decimal places
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 91.23)]
    pub converted_amount: Decimal,
}

/// Rounds half away from zero at two decimal places.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Accepts either a calendar date or an RFC 3339 timestamp, keeping the date.
pub mod flexible_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date `{raw}`, expected YYYY-MM-DD or an RFC 3339 timestamp"
            ))
        })
    }
}
