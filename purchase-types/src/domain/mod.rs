//! Domain models for the purchase service.

pub mod purchase;
pub mod rate;

pub use purchase::{ConvertedPurchase, Purchase, PurchaseId, flexible_date, round_cents};
pub use rate::{LookbackWindow, RateRecord};
