//! # Sale Repository
//!
//! Database operations for the sale ledger.
//!
//! ## The Sale Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record(sale) - one transaction                       │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  UPDATE products                                                        │
//! │     SET current_stock = current_stock - qty     ← relative, not         │
//! │   WHERE id = ? AND owner_id = ?                   absolute              │
//! │     AND current_stock >= qty                    ← server-side guard     │
//! │    │                                                                    │
//! │    ├── 0 rows? ──► read current_stock ──► ROLLBACK                      │
//! │    │               (missing product vs. not enough stock)               │
//! │    ▼                                                                    │
//! │  INSERT INTO sales (...)                                                │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT   ← only now is the sale committed; any failure above           │
//! │             rolls BOTH writes back, never one of them                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard in the WHERE clause is what makes two terminals racing on the
//! same product safe: both may pass a stale in-memory stock check, but only
//! decrements that keep stock non-negative ever commit. The loser sees the
//! authoritative remaining stock in [`SaleOutcome::OutOfStock`].
//!
//! Sales are append-only: this repository has no UPDATE or DELETE.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use chrono::Utc;

use crate::error::DbResult;
use duka_core::Sale;

/// What the conditional sale commit observed.
///
/// The gateway reports facts; turning them into domain errors
/// (`ProductNotFound`, `InsufficientStock`) is the service layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOutcome {
    /// Both writes committed; the sale is durable.
    Committed,
    /// No product row matched the id/owner pair.
    ProductMissing,
    /// The product exists but holds fewer units than requested.
    OutOfStock { available: i64 },
}

/// Repository for sale ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

const SALE_COLUMNS: &str = "id, owner_id, product_id, product_name, quantity, \
     unit_price_cents, total_amount_cents, profit_cents, date";

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Commits a settled sale: decrements stock and appends the ledger row
    /// in a single transaction.
    ///
    /// ## Returns
    /// * `Ok(SaleOutcome::Committed)` - sale is durable, stock decremented
    /// * `Ok(SaleOutcome::ProductMissing)` - nothing written
    /// * `Ok(SaleOutcome::OutOfStock { available })` - nothing written
    /// * `Err(DbError)` - gateway failure; the transaction is rolled back,
    ///   so no partial state survives
    pub async fn record(&self, sale: &Sale) -> DbResult<SaleOutcome> {
        debug!(
            sale_id = %sale.id,
            product_id = %sale.product_id,
            quantity = %sale.quantity,
            "Recording sale"
        );

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        // Relative decrement with a stock guard. An absolute write would
        // clobber a concurrent decrement; the guard keeps stock >= 0.
        let decremented = sqlx::query(
            r#"
            UPDATE products
            SET current_stock = current_stock - ?1, updated_at = ?2
            WHERE id = ?3 AND owner_id = ?4 AND current_stock >= ?1
            "#,
        )
        .bind(sale.quantity)
        .bind(now)
        .bind(&sale.product_id)
        .bind(&sale.owner_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            // Distinguish "no such product" from "not enough stock" while
            // the transaction still holds a consistent view.
            let available: Option<i64> = sqlx::query_scalar(
                "SELECT current_stock FROM products WHERE id = ?1 AND owner_id = ?2",
            )
            .bind(&sale.product_id)
            .bind(&sale.owner_id)
            .fetch_optional(&mut *tx)
            .await?;

            tx.rollback().await?;

            return Ok(match available {
                None => SaleOutcome::ProductMissing,
                Some(available) => SaleOutcome::OutOfStock { available },
            });
        }

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, owner_id, product_id, product_name,
                quantity, unit_price_cents, total_amount_cents, profit_cents,
                date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.owner_id)
        .bind(&sale.product_id)
        .bind(&sale.product_name)
        .bind(sale.quantity)
        .bind(sale.unit_price_cents)
        .bind(sale.total_amount_cents)
        .bind(sale.profit_cents)
        .bind(sale.date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(sale_id = %sale.id, "Sale committed");
        Ok(SaleOutcome::Committed)
    }

    /// Gets a sale by ID, scoped to an owner.
    pub async fn get(&self, owner_id: &str, id: &str) -> DbResult<Option<Sale>> {
        let query = format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1 AND owner_id = ?2");

        let sale = sqlx::query_as::<_, Sale>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Lists an owner's ledger, most recent first.
    ///
    /// Display order only - aggregation is order-independent.
    pub async fn list(&self, owner_id: &str) -> DbResult<Vec<Sale>> {
        let query = format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE owner_id = ?1 ORDER BY date DESC"
        );

        let sales = sqlx::query_as::<_, Sale>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Counts an owner's sales (for diagnostics).
    pub async fn count(&self, owner_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE owner_id = ?1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::generate_product_id;
    use crate::repository::user::{generate_user_id, UserRecord};
    use duka_core::{Currency, Language, Product};

    async fn test_db_with_owner() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = UserRecord {
            id: generate_user_id(),
            email: "owner@duka.shop".to_string(),
            password_hash: "hash".to_string(),
            language: Language::Fr,
            currency: Currency::Usd,
            created_at: Utc::now(),
        };
        db.users().insert(&owner).await.unwrap();
        (db, owner.id)
    }

    async fn seeded_soap(db: &Database, owner: &str, stock: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            owner_id: owner.to_string(),
            name: "Soap".to_string(),
            category: "Hygiene".to_string(),
            subcategory: None,
            initial_stock: stock,
            current_stock: stock,
            purchase_price_cents: 100,
            sale_price_cents: 250,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_record_commits_sale_and_decrements_stock() {
        let (db, owner) = test_db_with_owner().await;
        let product = seeded_soap(&db, &owner, 10).await;

        let sale = Sale::settle(&product, 3, generate_sale_id(), Utc::now()).unwrap();
        let outcome = db.sales().record(&sale).await.unwrap();
        assert_eq!(outcome, SaleOutcome::Committed);

        let stock = db.products().get(&owner, &product.id).await.unwrap().unwrap();
        assert_eq!(stock.current_stock, 7);

        let stored = db.sales().get(&owner, &sale.id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount_cents, 750);
        assert_eq!(stored.profit_cents, 450);
        assert_eq!(stored.product_name, "Soap");
    }

    #[tokio::test]
    async fn test_record_out_of_stock_leaves_no_partial_state() {
        let (db, owner) = test_db_with_owner().await;
        let product = seeded_soap(&db, &owner, 7).await;

        // A stale snapshot claims more stock than the row holds; the
        // settlement passes locally, the database guard must refuse it.
        let mut stale = product.clone();
        stale.current_stock = 10;

        let sale = Sale::settle(&stale, 8, generate_sale_id(), Utc::now()).unwrap();
        let outcome = db.sales().record(&sale).await.unwrap();
        assert_eq!(outcome, SaleOutcome::OutOfStock { available: 7 });

        // Neither write survived
        let stock = db.products().get(&owner, &product.id).await.unwrap().unwrap();
        assert_eq!(stock.current_stock, 7);
        assert_eq!(db.sales().count(&owner).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_missing_product() {
        let (db, owner) = test_db_with_owner().await;
        let product = seeded_soap(&db, &owner, 5).await;
        db.products().delete(&owner, &product.id).await.unwrap();

        let sale = Sale::settle(&product, 1, generate_sale_id(), Utc::now()).unwrap();
        let outcome = db.sales().record(&sale).await.unwrap();
        assert_eq!(outcome, SaleOutcome::ProductMissing);
        assert_eq!(db.sales().count(&owner).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stale_snapshot_cannot_oversell() {
        let (db, owner) = test_db_with_owner().await;
        let product = seeded_soap(&db, &owner, 5).await;

        // Two sales settled against the same stale snapshot (stock 5);
        // together they would oversell. The guard arbitrates.
        let first = Sale::settle(&product, 4, generate_sale_id(), Utc::now()).unwrap();
        let second = Sale::settle(&product, 4, generate_sale_id(), Utc::now()).unwrap();

        assert_eq!(db.sales().record(&first).await.unwrap(), SaleOutcome::Committed);
        assert_eq!(
            db.sales().record(&second).await.unwrap(),
            SaleOutcome::OutOfStock { available: 1 }
        );

        let stock = db.products().get(&owner, &product.id).await.unwrap().unwrap();
        assert_eq!(stock.current_stock, 1);
        assert_eq!(db.sales().count(&owner).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let (db, owner) = test_db_with_owner().await;
        let product = seeded_soap(&db, &owner, 10).await;

        let early = Utc::now() - chrono::Duration::hours(2);
        let late = Utc::now();
        let older = Sale::settle(&product, 1, generate_sale_id(), early).unwrap();
        let newer = Sale::settle(&product, 2, generate_sale_id(), late).unwrap();

        db.sales().record(&older).await.unwrap();
        db.sales().record(&newer).await.unwrap();

        let ledger = db.sales().list(&owner).await.unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].id, newer.id);
        assert_eq!(ledger[1].id, older.id);
    }

    #[tokio::test]
    async fn test_ledger_is_owner_scoped() {
        let (db, owner) = test_db_with_owner().await;
        let product = seeded_soap(&db, &owner, 10).await;
        let sale = Sale::settle(&product, 1, generate_sale_id(), Utc::now()).unwrap();
        db.sales().record(&sale).await.unwrap();

        assert!(db.sales().list("someone-else").await.unwrap().is_empty());
        assert!(db.sales().get("someone-else", &sale.id).await.unwrap().is_none());
    }
}
