//! # Aggregation Engine
//!
//! Derives dashboard statistics from ledger/log snapshots.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Aggregation Engine                                  │
//! │                                                                         │
//! │   Sales snapshot ──┐                                                    │
//! │                    ├──► dashboard_stats() ──► DashboardStats            │
//! │   Expense snapshot ┘         (pure reduce)                              │
//! │                                                                         │
//! │   • Stateless: recomputed from scratch on every call, no caching        │
//! │   • Order-independent: shuffling the input changes nothing              │
//! │   • Ledger-driven: per-product figures come from the sale snapshots,    │
//! │     never from a catalog join, so deleted products keep their history   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Net Profit Formula
//! `net_profit = Σ sale.profit − Σ expense.amount`.
//!
//! Revenue is NOT profit: a sale's contribution is its margin
//! (sale price − purchase price), not its gross amount. This is the single
//! place the formula lives.

use std::collections::HashMap;

use crate::types::{DashboardStats, Expense, ProductProfit, Sale};

/// Reduces ledger and log snapshots into dashboard statistics.
///
/// Pure function of its inputs: calling it twice on the same snapshots
/// yields identical results, and input ordering never affects any figure.
pub fn dashboard_stats(sales: &[Sale], expenses: &[Expense]) -> DashboardStats {
    let total_revenue_cents: i64 = sales.iter().map(|s| s.total_amount_cents).sum();
    let total_sales_profit_cents: i64 = sales.iter().map(|s| s.profit_cents).sum();
    let total_expenses_cents: i64 = expenses.iter().map(|e| e.amount_cents).sum();

    DashboardStats {
        total_revenue_cents,
        total_expenses_cents,
        net_profit_cents: total_sales_profit_cents - total_expenses_cents,
        product_profits: product_profits(sales),
    }
}

/// Groups the ledger by product and sums profit and units sold.
///
/// The display name is the most recent snapshot for that product, so a
/// rename mid-history shows the latest name while older sales still count.
/// Output is ranked by total profit (descending), name and id breaking
/// ties, which keeps the result deterministic for any input order.
pub fn product_profits(sales: &[Sale]) -> Vec<ProductProfit> {
    struct Entry {
        name: String,
        name_date: chrono::DateTime<chrono::Utc>,
        profit_cents: i64,
        units: i64,
    }

    let mut by_product: HashMap<&str, Entry> = HashMap::new();

    for sale in sales {
        let entry = by_product.entry(&sale.product_id).or_insert_with(|| Entry {
            name: sale.product_name.clone(),
            name_date: sale.date,
            profit_cents: 0,
            units: 0,
        });

        entry.profit_cents += sale.profit_cents;
        entry.units += sale.quantity;
        if sale.date > entry.name_date {
            entry.name = sale.product_name.clone();
            entry.name_date = sale.date;
        }
    }

    let mut profits: Vec<ProductProfit> = by_product
        .into_iter()
        .map(|(product_id, entry)| ProductProfit {
            product_id: product_id.to_string(),
            product_name: entry.name,
            total_profit_cents: entry.profit_cents,
            units_sold: entry.units,
        })
        .collect();

    profits.sort_by(|a, b| {
        b.total_profit_cents
            .cmp(&a.total_profit_cents)
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });

    profits
}

// =============================================================================
// Unit Tests
// =============================================================================
