//! Database row types and their conversion into domain purchases.

use sqlx::FromRow;

use purchase_types::{Purchase, PurchaseId, RepoError};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL rows (native UUID / DATE / NUMERIC columns)
// ─────────────────────────────────────────────────────────────────────────────

/// Purchase row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct DbPurchase {
    pub id: uuid::Uuid,
    pub description: String,
    pub date: chrono::NaiveDate,
    pub amount: rust_decimal::Decimal,
}

#[cfg(feature = "postgres")]
impl DbPurchase {
    /// Convert database row to domain Purchase.
    pub fn into_domain(self) -> Result<Purchase, RepoError> {
        Ok(Purchase::from_parts(
            PurchaseId::from_uuid(self.id),
            self.description,
            self.date,
            self.amount,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SQLite rows (everything stored as TEXT)
// ─────────────────────────────────────────────────────────────────────────────

/// Purchase row from SQLite.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct DbPurchaseText {
    pub id: String,
    pub description: String,
    pub date: String,
    pub amount: String,
}

#[cfg(feature = "sqlite")]
impl DbPurchaseText {
    /// Convert database row to domain Purchase.
    pub fn into_domain(self) -> Result<Purchase, RepoError> {
        let id = uuid::Uuid::parse_str(&self.id)
            .map_err(|e| RepoError::Decode(format!("id `{}`: {}", self.id, e)))?;

        let date = chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| RepoError::Decode(format!("date `{}`: {}", self.date, e)))?;

        let amount: rust_decimal::Decimal = self
            .amount
            .parse()
            .map_err(|e| RepoError::Decode(format!("amount `{}`: {}", self.amount, e)))?;

        Ok(Purchase::from_parts(
            PurchaseId::from_uuid(id),
            self.description,
            date,
            amount,
        ))
    }
}
