//! # Sale Ledger Service
//!
//! The stock-aware sale ledger: the one piece of domain logic this whole
//! system exists to enforce.
//!
//! ## Record Sale Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record_sale(product_id, qty)                      │
//! │                                                                         │
//! │  1. Resolve product          ── NotFound if absent/foreign owner        │
//! │  2. Validate quantity        ── Validation if qty <= 0 or absurd        │
//! │  3. Local stock precondition ── InsufficientStock, no round trip        │
//! │  4. Settle: freeze name, unit price, total, profit                      │
//! │  5. Transactional commit     ── stock decrement + ledger insert         │
//! │     (the database guard re-checks stock; a stale snapshot cannot        │
//! │      oversell, the loser gets the authoritative availability)           │
//! │  6. Publish change events (sales + products)                            │
//! │                                                                         │
//! │  Sales are permanent: no update, no delete, no void.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use duka_core::Sale;
use duka_db::{Database, SaleOutcome};

use crate::error::{ShopError, ShopResult};
use crate::state::feed::{ChangeFeed, Collection};

/// Owner-scoped sale ledger.
#[derive(Debug, Clone)]
pub struct LedgerService {
    db: Database,
    owner_id: String,
    feed: ChangeFeed,
}

impl LedgerService {
    /// Creates a ledger service for one owner.
    pub fn new(db: Database, owner_id: impl Into<String>, feed: ChangeFeed) -> Self {
        LedgerService {
            db,
            owner_id: owner_id.into(),
            feed,
        }
    }

    /// Records a sale of `quantity` units of `product_id`.
    ///
    /// On success the returned [`Sale`] is committed: durable in the
    /// ledger with the product's stock decremented in the same
    /// transaction. On any failure nothing is retained - there is no
    /// partially applied sale.
    pub async fn record_sale(&self, product_id: &str, quantity: i64) -> ShopResult<Sale> {
        debug!(product_id = %product_id, quantity = %quantity, "record_sale");

        let product = self
            .db
            .products()
            .get(&self.owner_id, product_id)
            .await?
            .ok_or_else(|| ShopError::not_found("Product", product_id))?;

        // Settlement enforces the local preconditions (valid quantity,
        // enough stock against our snapshot) before any gateway write.
        let sale = Sale::settle(&product, quantity, Uuid::new_v4().to_string(), Utc::now())?;

        match self.db.sales().record(&sale).await? {
            SaleOutcome::Committed => {}
            SaleOutcome::ProductMissing => {
                // Product vanished between the read and the commit.
                return Err(ShopError::not_found("Product", product_id));
            }
            SaleOutcome::OutOfStock { available } => {
                // Our snapshot was stale; the database guard is the
                // arbiter and its availability figure is the true one.
                warn!(
                    product_id = %product_id,
                    available = %available,
                    requested = %quantity,
                    "Stock moved under us; sale rejected"
                );
                return Err(ShopError::InsufficientStock {
                    product: sale.product_name,
                    available,
                    requested: quantity,
                });
            }
        }

        self.feed.publish(Collection::Sales, &self.owner_id);
        self.feed.publish(Collection::Products, &self.owner_id);

        info!(
            sale_id = %sale.id,
            product = %sale.product_name,
            quantity = %sale.quantity,
            total_cents = %sale.total_amount_cents,
            profit_cents = %sale.profit_cents,
            "Sale committed"
        );
        Ok(sale)
    }

    /// Returns the ledger, most recent sale first.
    pub async fn sales(&self) -> ShopResult<Vec<Sale>> {
        Ok(self.db.sales().list(&self.owner_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
