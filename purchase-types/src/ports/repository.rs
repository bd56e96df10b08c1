//! Repository port trait.
//!
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use crate::domain::{Purchase, PurchaseId};
use crate::error::RepoError;

/// Storage port for purchase records.
///
/// Records are insert-only; there is no update or delete.
#[async_trait::async_trait]
pub trait PurchaseRepository: Send + Sync + 'static {
    /// Persists a new purchase and returns the stored record.
    async fn insert_purchase(&self, purchase: Purchase) -> Result<Purchase, RepoError>;

    /// Lists every stored purchase in the store's natural order.
    ///
    /// A single undecodable row fails the whole listing.
    async fn list_purchases(&self) -> Result<Vec<Purchase>, RepoError>;

    /// Gets a purchase by ID.
    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError>;
}
