//! # Purchase Types
//!
//! Domain types and port traits for the purchase conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Purchase, LookbackWindow, RateRecord)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Request bodies and the response envelope
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ConvertedPurchase, LookbackWindow, Purchase, PurchaseId, RateRecord};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{ExchangeError, ExchangeRateProvider, PurchaseRepository};
