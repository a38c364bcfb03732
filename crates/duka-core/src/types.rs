//! # Domain Types
//!
//! Core domain types used throughout Duka.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  current_stock  │   │  product_name   │   │  amount_cents   │       │
//! │  │  sale_price     │   │  (snapshot)     │   │  description    │       │
//! │  │  purchase_price │   │  profit_cents   │   │  category       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Every row belongs to exactly one owner (user id) - strict tenant       │
//! │  partition, no cross-owner reads.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `Sale` copies the product's name and unit price at the moment it is
//! settled. Deleting or renaming the product later never corrupts history;
//! `product_id` stays behind as a weak reference only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, Language};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_quantity;

// =============================================================================
// Product
// =============================================================================

/// A product in the shop catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// User this product belongs to.
    pub owner_id: String,

    /// Display name.
    pub name: String,

    /// Category label.
    pub category: String,

    /// Optional finer-grained category.
    pub subcategory: Option<String>,

    /// Stock level the product was created with.
    pub initial_stock: i64,

    /// Current stock level. Never negative; decreases through sales,
    /// changes otherwise only via explicit manual corrections.
    pub current_stock: i64,

    /// Unit purchase (cost) price in cents.
    pub purchase_price_cents: i64,

    /// Unit sale price in cents.
    pub sale_price_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the purchase price as a Money type.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    /// Returns the sale price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Margin earned per unit sold (sale price minus purchase price).
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.sale_price() - self.purchase_price()
    }

    /// Checks whether current stock covers a requested quantity.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.current_stock
    }

    /// Merges a partial update into this product and refreshes `updated_at`.
    ///
    /// `current_stock` in the patch is the manual-correction path; sale
    /// settlement decrements stock through the ledger instead.
    pub fn apply_patch(&mut self, patch: &ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(subcategory) = &patch.subcategory {
            self.subcategory = Some(subcategory.clone());
        }
        if let Some(stock) = patch.current_stock {
            self.current_stock = stock;
        }
        if let Some(cents) = patch.purchase_price_cents {
            self.purchase_price_cents = cents;
        }
        if let Some(cents) = patch.sale_price_cents {
            self.sale_price_cents = cents;
        }
        self.updated_at = now;
    }
}

/// Specification for creating a product.
///
/// The catalog fills in identity, ownership, timestamps and sets
/// `current_stock = initial_stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub initial_stock: i64,
    pub purchase_price_cents: i64,
    pub sale_price_cents: i64,
}

/// Partial update for a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    /// Manual stock correction (absolute value).
    pub current_stock: Option<i64>,
    pub purchase_price_cents: Option<i64>,
    pub sale_price_cents: Option<i64>,
}

// =============================================================================
// Sale
// =============================================================================

/// A settled sale: one ledger entry.
///
/// Immutable once committed - there is no update or delete operation.
/// A `Sale` value that has not yet been persisted is pending; durability
/// is what makes it committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub owner_id: String,

    /// Weak reference to the product; the product may be deleted later.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Units sold.
    pub quantity: i64,

    /// Unit sale price in cents at time of sale (frozen).
    pub unit_price_cents: i64,

    /// `unit_price × quantity`.
    pub total_amount_cents: i64,

    /// `(sale_price − purchase_price) × quantity` at time of sale.
    pub profit_cents: i64,

    /// When the sale was settled.
    pub date: DateTime<Utc>,
}

impl Sale {
    /// Settles a sale against a product, freezing its unit economics.
    ///
    /// Enforces the two local preconditions - a valid quantity and enough
    /// stock - so an invalid `Sale` value can never exist. The returned
    /// sale is pending until the gateway commits it.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use duka_core::types::{Product, Sale};
    ///
    /// # let now = Utc::now();
    /// # let product = Product {
    /// #     id: "p-1".into(), owner_id: "u-1".into(), name: "Soap".into(),
    /// #     category: "Hygiene".into(), subcategory: None,
    /// #     initial_stock: 10, current_stock: 10,
    /// #     purchase_price_cents: 100, sale_price_cents: 250,
    /// #     created_at: now, updated_at: now,
    /// # };
    /// let sale = Sale::settle(&product, 3, "s-1".into(), now).unwrap();
    /// assert_eq!(sale.total_amount_cents, 750);
    /// assert_eq!(sale.profit_cents, 450);
    ///
    /// // Eleven bars from a stock of ten is rejected
    /// assert!(Sale::settle(&product, 11, "s-2".into(), now).is_err());
    /// ```
    pub fn settle(
        product: &Product,
        quantity: i64,
        id: String,
        date: DateTime<Utc>,
    ) -> CoreResult<Sale> {
        validate_quantity(quantity)?;

        if !product.can_fulfill(quantity) {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.current_stock,
                requested: quantity,
            });
        }

        Ok(Sale {
            id,
            owner_id: product.owner_id.clone(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit_price_cents: product.sale_price_cents,
            total_amount_cents: product.sale_price_cents * quantity,
            profit_cents: product.unit_margin().cents() * quantity,
            date,
        })
    }

    /// Returns the sale total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Returns the sale profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A recorded expense, independent of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: String,
    pub owner_id: String,

    /// Amount spent, in cents. Always positive.
    pub amount_cents: i64,

    /// What the money was spent on.
    pub description: String,

    /// Optional category label.
    pub category: Option<String>,

    /// When the expense occurred.
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Returns the expense amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Specification for recording an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount_cents: i64,
    pub description: String,
    pub category: Option<String>,
    /// When the expense occurred; `None` means "now".
    pub date: Option<DateTime<Utc>>,
}

// =============================================================================
// User Profile
// =============================================================================

/// Preferences attached to a user account.
///
/// Owned and mutated by the auth/config collaborator; the dashboard and
/// formatter read `language`/`currency` and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub language: Language,
    pub currency: Currency,
}

// =============================================================================
// Dashboard Statistics
// =============================================================================

/// Aggregate figures derived from the sale ledger and expense log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Σ sale.total_amount over all sales.
    pub total_revenue_cents: i64,

    /// Σ expense.amount over all expenses.
    pub total_expenses_cents: i64,

    /// Σ sale.profit over all sales, minus total expenses.
    pub net_profit_cents: i64,

    /// Per-product figures, ranked by total profit. Products without any
    /// sale are omitted.
    pub product_profits: Vec<ProductProfit>,
}

impl DashboardStats {
    /// Returns total revenue as Money.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }

    /// Returns total expenses as Money.
    #[inline]
    pub fn total_expenses(&self) -> Money {
        Money::from_cents(self.total_expenses_cents)
    }

    /// Returns net profit as Money. May be negative.
    #[inline]
    pub fn net_profit(&self) -> Money {
        Money::from_cents(self.net_profit_cents)
    }
}

/// Sales performance of a single product.
///
/// Keyed by the ledger's `product_id`; the name is the denormalized
/// snapshot, so products deleted from the catalog still show up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProfit {
    pub product_id: String,
    pub product_name: String,
    pub total_profit_cents: i64,
    pub units_sold: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
