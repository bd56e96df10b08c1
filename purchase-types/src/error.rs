//! Error types for the purchase service.

use std::time::Duration;

use crate::ports::ExchangeError;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Converted amount is out of range")]
    ConversionOverflow,
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Failed to decode stored purchase: {0}")]
    Decode(String),

    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),
}

/// Application-level errors (for HTTP responses).
///
/// `NotFound` and `ConversionUnavailable` stay separate from `Internal` so
/// callers inside the process can tell them apart, even though the HTTP
/// adapter reports all three as 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Purchase cannot be converted to the target currency: {currency}")]
    ConversionUnavailable { currency: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::EmptyDescription | DomainError::NonPositiveAmount => {
                AppError::BadRequest(err.to_string())
            }
            DomainError::InvalidRate(_) | DomainError::ConversionOverflow => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Decode(e) => AppError::Internal(format!("Corrupt record: {}", e)),
            RepoError::Timeout(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        AppError::Internal(err.to_string())
    }
}
