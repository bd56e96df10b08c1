//! # Purchase Hex
//!
//! Application service layer and HTTP adapter for the purchase service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: PurchaseRepository` and
//! `X: ExchangeRateProvider`, allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{DEFAULT_STORAGE_TIMEOUT, PurchaseService};
