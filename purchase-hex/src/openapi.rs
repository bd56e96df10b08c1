//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use purchase_types::domain::{ConvertedPurchase, Purchase, PurchaseId};
use purchase_types::dto::CreatePurchaseRequest;
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Record a new purchase
#[utoipa::path(
    post,
    path = "/purchase",
    tag = "purchases",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 201, description = "Purchase recorded; the record is wrapped in the response envelope", body = Purchase,
            example = json!({"status": 201, "message": "success", "data": {"data": {
                "id": "3f0e8f4c-6a4b-4b7e-9a37-0d5b6c1f2a10",
                "description": "Office chair",
                "date": "2024-03-15",
                "amount": 100.0
            }}})),
        (status = 400, description = "Malformed body or failed validation", body = inline(serde_json::Value),
            example = json!({"status": 400, "message": "error", "data": {"data": "Amount must be positive"}})),
        (status = 500, description = "Storage failure")
    )
)]
async fn create_purchase() {}

/// List all purchases
#[utoipa::path(
    get,
    path = "/purchase",
    tag = "purchases",
    responses(
        (status = 200, description = "Every recorded purchase, wrapped in the response envelope", body = Vec<Purchase>),
        (status = 500, description = "Storage failure")
    )
)]
async fn list_purchases() {}

/// Get a purchase converted into another currency
///
/// Uses the most recent rate published for the currency in the six months up
/// to and including the purchase date.
#[utoipa::path(
    get,
    path = "/purchase/{purchaseId}/currency/{currency}",
    tag = "purchases",
    params(
        ("purchaseId" = String, Path, description = "Purchase ID (UUID)"),
        ("currency" = String, Path, description = "Currency name as published by the rate feed", example = "Euro")
    ),
    responses(
        (status = 200, description = "Converted purchase, wrapped in the response envelope", body = ConvertedPurchase),
        (status = 500, description = "Unknown purchase, feed failure, blank currency, or no rate in the lookback window", body = inline(serde_json::Value),
            example = json!({"status": 500, "message": "Purchase cannot be converted to the target currency: Euro"}))
    )
)]
async fn convert_purchase() {}

/// OpenAPI documentation for the Purchase API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Purchase Conversion Service API",
        version = "1.0.0",
        description = "Records purchases and converts their amounts using historical Treasury exchange rates.\n\nEvery response uses the envelope `{status, message, data: {data}}`.",
        license(name = "MIT"),
    ),
    paths(health, create_purchase, list_purchases, convert_purchase),
    components(schemas(CreatePurchaseRequest, Purchase, ConvertedPurchase, PurchaseId)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "purchases", description = "Purchase recording and conversion"),
    )
)]
pub struct ApiDoc;
