//! # Catalog Service
//!
//! Product management: create, update, delete, find, list.
//!
//! Stock is set at creation (`current_stock = initial_stock`) and then
//! only decreases through the sale ledger; the update path here exists
//! for field edits and explicit manual stock corrections.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use duka_core::validation::{validate_new_product, validate_product_patch};
use duka_core::{NewProduct, Product, ProductPatch};
use duka_db::Database;

use crate::error::{ShopError, ShopResult};
use crate::state::feed::{ChangeFeed, Collection};

/// Owner-scoped product catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
    owner_id: String,
    feed: ChangeFeed,
}

impl CatalogService {
    /// Creates a catalog service for one owner.
    pub fn new(db: Database, owner_id: impl Into<String>, feed: ChangeFeed) -> Self {
        CatalogService {
            db,
            owner_id: owner_id.into(),
            feed,
        }
    }

    /// Creates a product.
    ///
    /// ## Behavior
    /// - Rejects empty names and negative stock/prices before any
    ///   gateway call
    /// - `current_stock` starts at `initial_stock`
    /// - Fresh UUID and timestamps
    pub async fn create(&self, spec: NewProduct) -> ShopResult<Product> {
        debug!(name = %spec.name, "create product");

        validate_new_product(&spec)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            owner_id: self.owner_id.clone(),
            name: spec.name.trim().to_string(),
            category: spec.category.trim().to_string(),
            subcategory: spec.subcategory,
            initial_stock: spec.initial_stock,
            current_stock: spec.initial_stock,
            purchase_price_cents: spec.purchase_price_cents,
            sale_price_cents: spec.sale_price_cents,
            created_at: now,
            updated_at: now,
        };

        self.db.products().insert(&product).await?;
        self.feed.publish(Collection::Products, &self.owner_id);

        info!(id = %product.id, name = %product.name, stock = %product.current_stock, "Product created");
        Ok(product)
    }

    /// Merges a partial update into an existing product.
    ///
    /// A `current_stock` value in the patch is a manual stock correction -
    /// a deliberate, distinct path from sale-driven decrements, which go
    /// through the ledger transaction instead.
    pub async fn update(&self, id: &str, patch: ProductPatch) -> ShopResult<Product> {
        debug!(id = %id, "update product");

        validate_product_patch(&patch)?;

        let mut product = self.find(id).await?;
        product.apply_patch(&patch, Utc::now());

        self.db.products().update(&product).await?;
        self.feed.publish(Collection::Products, &self.owner_id);

        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product.
    ///
    /// Does not cascade: sale history keeps its denormalized snapshots
    /// and the aggregation engine keeps counting them.
    pub async fn delete(&self, id: &str) -> ShopResult<()> {
        debug!(id = %id, "delete product");

        self.db.products().delete(&self.owner_id, id).await?;
        self.feed.publish(Collection::Products, &self.owner_id);

        info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Finds a product by id.
    pub async fn find(&self, id: &str) -> ShopResult<Product> {
        self.db
            .products()
            .get(&self.owner_id, id)
            .await?
            .ok_or_else(|| ShopError::not_found("Product", id))
    }

    /// Lists the catalog, sorted by name.
    pub async fn list(&self) -> ShopResult<Vec<Product>> {
        Ok(self.db.products().list(&self.owner_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::feed::ChangeEvent;
    use duka_db::{DbConfig, UserRecord};

    async fn catalog() -> (CatalogService, ChangeFeed) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = UserRecord {
            id: "u-1".to_string(),
            email: "owner@duka.shop".to_string(),
            password_hash: "hash".to_string(),
            language: Default::default(),
            currency: Default::default(),
            created_at: Utc::now(),
        };
        db.users().insert(&owner).await.unwrap();

        let feed = ChangeFeed::new();
        (CatalogService::new(db, "u-1", feed.clone()), feed)
    }

    fn soap_spec() -> NewProduct {
        NewProduct {
            name: "Soap".to_string(),
            category: "Hygiene".to_string(),
            subcategory: None,
            initial_stock: 10,
            purchase_price_cents: 100,
            sale_price_cents: 250,
        }
    }

    #[tokio::test]
    async fn test_create_sets_current_stock_to_initial() {
        let (catalog, _feed) = catalog().await;

        let product = catalog.create(soap_spec()).await.unwrap();

        assert_eq!(product.current_stock, 10);
        assert_eq!(product.initial_stock, 10);
        assert_eq!(product.owner_id, "u-1");

        let found = catalog.find(&product.id).await.unwrap();
        assert_eq!(found.name, "Soap");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input_without_persisting() {
        let (catalog, _feed) = catalog().await;

        let mut spec = soap_spec();
        spec.name = "  ".to_string();
        assert!(matches!(
            catalog.create(spec).await,
            Err(ShopError::Validation(_))
        ));

        let mut spec = soap_spec();
        spec.purchase_price_cents = -1;
        assert!(matches!(
            catalog.create(spec).await,
            Err(ShopError::Validation(_))
        ));

        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let (catalog, _feed) = catalog().await;
        let product = catalog.create(soap_spec()).await.unwrap();

        let patch = ProductPatch {
            name: Some("Bar Soap".to_string()),
            sale_price_cents: Some(300),
            ..Default::default()
        };
        let updated = catalog.update(&product.id, patch).await.unwrap();

        assert_eq!(updated.name, "Bar Soap");
        assert_eq!(updated.sale_price_cents, 300);
        // Untouched fields survive
        assert_eq!(updated.category, "Hygiene");
        assert_eq!(updated.current_stock, 10);
    }

    #[tokio::test]
    async fn test_manual_stock_correction() {
        let (catalog, _feed) = catalog().await;
        let product = catalog.create(soap_spec()).await.unwrap();

        let patch = ProductPatch {
            current_stock: Some(25),
            ..Default::default()
        };
        let updated = catalog.update(&product.id, patch).await.unwrap();
        assert_eq!(updated.current_stock, 25);

        let negative = ProductPatch {
            current_stock: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            catalog.update(&product.id, negative).await,
            Err(ShopError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let (catalog, _feed) = catalog().await;

        let err = catalog
            .update("no-such-id", ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ShopError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_find_fails() {
        let (catalog, _feed) = catalog().await;
        let product = catalog.create(soap_spec()).await.unwrap();

        catalog.delete(&product.id).await.unwrap();

        assert!(matches!(
            catalog.find(&product.id).await,
            Err(ShopError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.delete(&product.id).await,
            Err(ShopError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_mutations_publish_change_events() {
        let (catalog, feed) = catalog().await;
        let mut rx = feed.subscribe();

        let product = catalog.create(soap_spec()).await.unwrap();
        let event: ChangeEvent = rx.recv().await.unwrap();
        assert_eq!(event.collection, Collection::Products);
        assert_eq!(event.owner_id, "u-1");

        catalog.delete(&product.id).await.unwrap();
        assert_eq!(rx.recv().await.unwrap().collection, Collection::Products);
    }
}
