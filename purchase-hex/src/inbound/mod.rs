//! HTTP Inbound Adapter
//!
//! Axum router, handlers and the error-to-envelope mapping for the purchase
//! endpoints.

mod handlers;
mod server;

pub use handlers::{ApiError, AppState};
pub use server::HttpServer;
