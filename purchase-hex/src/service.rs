//! Purchase Application Service
//!
//! Orchestrates domain operations through the repository and exchange rate ports.
//! Contains NO infrastructure logic - pure business orchestration.

use std::future::Future;
use std::time::Duration;

use purchase_types::{
    AppError, ConvertedPurchase, CreatePurchaseRequest, ExchangeRateProvider, LookbackWindow,
    Purchase, PurchaseId, PurchaseRepository, RepoError,
};

/// Time budget for a single storage call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Application service for purchase operations.
///
/// Generic over `R: PurchaseRepository` and `X: ExchangeRateProvider` - the
/// adapters are injected at construction. This enables:
/// - Swapping storage or rate feeds without code changes
/// - Testing with in-memory adapters
/// - Compile-time checks for port implementation
pub struct PurchaseService<R: PurchaseRepository, X: ExchangeRateProvider> {
    repo: R,
    rates: X,
    storage_timeout: Duration,
}

impl<R: PurchaseRepository, X: ExchangeRateProvider> PurchaseService<R, X> {
    /// Creates a new purchase service with the given adapters.
    pub fn new(repo: R, rates: X) -> Self {
        Self {
            repo,
            rates,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Overrides the per-call storage time budget.
    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying exchange rate provider.
    pub fn rates(&self) -> &X {
        &self.rates
    }

    /// Runs a storage call under the time budget.
    async fn storage<T>(
        &self,
        call: impl Future<Output = Result<T, RepoError>>,
    ) -> Result<T, RepoError> {
        tokio::time::timeout(self.storage_timeout, call)
            .await
            .map_err(|_| RepoError::Timeout(self.storage_timeout))?
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Purchase Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates and records a new purchase.
    pub async fn create_purchase(&self, req: CreatePurchaseRequest) -> Result<Purchase, AppError> {
        // Validation happens before storage is touched
        let purchase = Purchase::new(req.description, req.date, req.amount)?;

        let stored = self.storage(self.repo.insert_purchase(purchase)).await?;
        tracing::info!(purchase_id = %stored.id, "purchase recorded");

        Ok(stored)
    }

    /// Lists all purchases.
    pub async fn list_purchases(&self) -> Result<Vec<Purchase>, AppError> {
        self.storage(self.repo.list_purchases())
            .await
            .map_err(Into::into)
    }

    /// Gets a purchase by ID.
    pub async fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, AppError> {
        self.storage(self.repo.get_purchase(id))
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Purchase {}", id))))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a purchase converted into `currency` at the latest rate published
    /// in the six months up to and including the purchase date.
    pub async fn convert_purchase(
        &self,
        id: PurchaseId,
        currency: &str,
    ) -> Result<ConvertedPurchase, AppError> {
        let purchase = self.get_purchase(id).await?;

        // No feed record can match a blank currency
        let currency = currency.trim();
        if currency.is_empty() {
            return Err(AppError::ConversionUnavailable {
                currency: currency.to_string(),
            });
        }

        let window = LookbackWindow::ending_on(purchase.date);

        let record = self
            .rates
            .latest_rate(currency, window)
            .await?
            .ok_or_else(|| AppError::ConversionUnavailable {
                currency: currency.to_string(),
            })?;

        let rate = record.rate()?;
        tracing::debug!(
            purchase_id = %id,
            record_date = %record.record_date,
            %rate,
            "converting purchase"
        );

        Ok(purchase.convert(rate)?)
    }
}
