//! Port traits (interfaces for adapters).
//!
//! Storage and the exchange rate feed sit behind these traits, so the
//! purchase service never names a database or an HTTP client.

mod exchange;
mod repository;

pub use exchange::{ExchangeError, ExchangeRateProvider};
pub use repository::PurchaseRepository;
