//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use purchase_types::{Purchase, PurchaseId, PurchaseRepository, RepoError};

use crate::types::DbPurchase;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_purchases_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::debug!("PostgreSQL purchase store ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PurchaseRepository for PostgresRepo {
    async fn insert_purchase(&self, purchase: Purchase) -> Result<Purchase, RepoError> {
        sqlx::query(
            r#"INSERT INTO purchases (id, description, date, amount) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(purchase.id.into_uuid())
        .bind(&purchase.description)
        .bind(purchase.date)
        .bind(purchase.amount)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(purchase)
    }

    async fn list_purchases(&self) -> Result<Vec<Purchase>, RepoError> {
        let rows: Vec<DbPurchase> =
            sqlx::query_as(r#"SELECT id, description, date, amount FROM purchases"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbPurchase::into_domain).collect()
    }

    async fn get_purchase(&self, id: PurchaseId) -> Result<Option<Purchase>, RepoError> {
        let row: Option<DbPurchase> =
            sqlx::query_as(r#"SELECT id, description, date, amount FROM purchases WHERE id = $1"#)
                .bind(id.into_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPurchase::into_domain).transpose()
    }
}
