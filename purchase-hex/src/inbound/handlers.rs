//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use purchase_types::{
    ApiResponse, AppError, CreatePurchaseRequest, ExchangeRateProvider, PurchaseId,
    PurchaseRepository,
};

use crate::PurchaseService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: PurchaseRepository, X: ExchangeRateProvider> {
    pub service: PurchaseService<R, X>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Only validation failures are client errors; every other failure,
        // including a missing purchase, is reported as 500.
        let (status, body) = match &self.0 {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error(StatusCode::BAD_REQUEST.as_u16(), msg.clone()),
            ),
            AppError::ConversionUnavailable { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::message_only(
                    StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    self.0.to_string(),
                ),
            ),
            AppError::NotFound(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::error(
                    StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    self.0.to_string(),
                ),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Record a new purchase.
#[tracing::instrument(skip(state, payload))]
pub async fn create_purchase<R: PurchaseRepository, X: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, X>>>,
    payload: Result<Json<CreatePurchaseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let purchase = state.service.create_purchase(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StatusCode::CREATED.as_u16(), purchase)),
    ))
}

/// List all purchases.
#[tracing::instrument(skip(state))]
pub async fn list_purchases<R: PurchaseRepository, X: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, X>>>,
) -> Result<impl IntoResponse, ApiError> {
    let purchases = state.service.list_purchases().await?;
    Ok(Json(ApiResponse::success(StatusCode::OK.as_u16(), purchases)))
}

/// Get a purchase converted into the requested currency.
#[tracing::instrument(skip_all, fields(purchase_id = %id, currency = %currency))]
pub async fn convert_purchase<R: PurchaseRepository, X: ExchangeRateProvider>(
    State(state): State<Arc<AppState<R, X>>>,
    Path((id, currency)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    // An unparseable id cannot name a stored purchase
    let purchase_id: PurchaseId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("Purchase {}", id)))?;

    let converted = state
        .service
        .convert_purchase(purchase_id, &currency)
        .await?;
    Ok(Json(ApiResponse::success(StatusCode::OK.as_u16(), converted)))
}
