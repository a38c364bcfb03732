//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Owner-scoped CRUD
//! - Full-row updates that refresh `updated_at`
//! - Hard delete: sale history carries its own snapshots, so removing a
//!   catalog row never touches the ledger
//!
//! Stock decrements for sales do NOT go through this repository - they
//! happen inside the sale transaction (see [`crate::repository::sale`])
//! so the decrement and the ledger insert commit or fail together.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::Product;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.get(owner_id, "uuid-here").await?;
/// let catalog = repo.list(owner_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

const PRODUCT_COLUMNS: &str = "id, owner_id, name, category, subcategory, \
     initial_stock, current_stock, purchase_price_cents, sale_price_cents, \
     created_at, updated_at";

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, owner_id, name, category, subcategory,
                initial_stock, current_stock,
                purchase_price_cents, sale_price_cents,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&product.id)
        .bind(&product.owner_id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.subcategory)
        .bind(product.initial_stock)
        .bind(product.current_stock)
        .bind(product.purchase_price_cents)
        .bind(product.sale_price_cents)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by its ID, scoped to an owner.
    ///
    /// ## Returns
    /// * `Ok(None)` - no such product for this owner (a foreign owner's
    ///   product id behaves exactly like a missing one)
    pub async fn get(&self, owner_id: &str, id: &str) -> DbResult<Option<Product>> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1 AND owner_id = ?2"
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Lists an owner's catalog, sorted by name.
    pub async fn list(&self, owner_id: &str) -> DbResult<Vec<Product>> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE owner_id = ?1 ORDER BY name"
        );

        let products = sqlx::query_as::<_, Product>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Updates an existing product (full row) and refreshes `updated_at`.
    ///
    /// This is also the manual stock-correction path: the caller sets
    /// `current_stock` to the corrected absolute value.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - product doesn't exist for this owner
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?3,
                category = ?4,
                subcategory = ?5,
                current_stock = ?6,
                purchase_price_cents = ?7,
                sale_price_cents = ?8,
                updated_at = ?9
            WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(&product.id)
        .bind(&product.owner_id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.subcategory)
        .bind(product.current_stock)
        .bind(product.purchase_price_cents)
        .bind(product.sale_price_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## No Cascade
    /// Sales reference products weakly and carry denormalized snapshots;
    /// deleting a product leaves its sale history fully intact.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - product doesn't exist for this owner
    pub async fn delete(&self, owner_id: &str, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts an owner's products (for diagnostics).
    pub async fn count(&self, owner_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE owner_id = ?1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
