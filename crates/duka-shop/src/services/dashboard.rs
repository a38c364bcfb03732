//! # Dashboard Service
//!
//! Loads the owner's ledger and expense snapshots and reduces them with
//! the aggregation engine. Recomputed from scratch on every call: there
//! is no cache to invalidate, so a fresh snapshot always yields fresh
//! figures.

use tracing::debug;

use duka_core::currency::format_currency;
use duka_core::{dashboard_stats, DashboardStats};
use duka_db::Database;

use crate::error::{ShopError, ShopResult};

/// Headline figures rendered in the owner's preferred currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedStats {
    pub total_revenue: String,
    pub total_expenses: String,
    pub net_profit: String,
}

/// Owner-scoped dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    db: Database,
    owner_id: String,
}

impl DashboardService {
    /// Creates a dashboard service for one owner.
    pub fn new(db: Database, owner_id: impl Into<String>) -> Self {
        DashboardService {
            db,
            owner_id: owner_id.into(),
        }
    }

    /// Computes dashboard statistics from the current snapshots.
    ///
    /// Pure reduce over the two loads; calling it twice with no
    /// intervening mutation yields identical results.
    pub async fn stats(&self) -> ShopResult<DashboardStats> {
        debug!(owner_id = %self.owner_id, "computing dashboard stats");

        let sales = self.db.sales().list(&self.owner_id).await?;
        let expenses = self.db.expenses().list(&self.owner_id).await?;

        Ok(dashboard_stats(&sales, &expenses))
    }

    /// Computes statistics and formats the headline figures in the
    /// owner's preferred currency (read from their profile).
    pub async fn formatted(&self) -> ShopResult<(DashboardStats, FormattedStats)> {
        let profile = self
            .db
            .users()
            .get_profile(&self.owner_id)
            .await?
            .ok_or_else(|| ShopError::not_found("User", &self.owner_id))?;

        let stats = self.stats().await?;
        let code = profile.currency.code();

        let formatted = FormattedStats {
            total_revenue: format_currency(stats.total_revenue(), code),
            total_expenses: format_currency(stats.total_expenses(), code),
            net_profit: format_currency(stats.net_profit(), code),
        };

        Ok((stats, formatted))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::CatalogService;
    use crate::services::expenses::ExpenseService;
    use crate::services::ledger::LedgerService;
    use crate::state::feed::ChangeFeed;
    use chrono::Utc;
    use duka_core::{Currency, Language, NewExpense, NewProduct};
    use duka_db::{DbConfig, UserRecord};

    struct Fixture {
        catalog: CatalogService,
        ledger: LedgerService,
        expenses: ExpenseService,
        dashboard: DashboardService,
    }

    async fn fixture(currency: Currency) -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = UserRecord {
            id: "u-1".to_string(),
            email: "owner@duka.shop".to_string(),
            password_hash: "hash".to_string(),
            language: Language::Fr,
            currency,
            created_at: Utc::now(),
        };
        db.users().insert(&owner).await.unwrap();

        let feed = ChangeFeed::new();
        Fixture {
            catalog: CatalogService::new(db.clone(), "u-1", feed.clone()),
            ledger: LedgerService::new(db.clone(), "u-1", feed.clone()),
            expenses: ExpenseService::new(db.clone(), "u-1", feed),
            dashboard: DashboardService::new(db, "u-1"),
        }
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let f = fixture(Currency::Usd).await;

        let stats = f.dashboard.stats().await.unwrap();
        assert_eq!(stats.total_revenue_cents, 0);
        assert_eq!(stats.net_profit_cents, 0);
        assert!(stats.product_profits.is_empty());
    }

    #[tokio::test]
    async fn test_soap_scenario_end_to_end() {
        let f = fixture(Currency::Usd).await;

        let soap = f
            .catalog
            .create(NewProduct {
                name: "Soap".to_string(),
                category: "Hygiene".to_string(),
                subcategory: None,
                initial_stock: 10,
                purchase_price_cents: 100,
                sale_price_cents: 250,
            })
            .await
            .unwrap();

        f.ledger.record_sale(&soap.id, 3).await.unwrap();
        assert!(f.ledger.record_sale(&soap.id, 8).await.is_err());

        f.expenses
            .add(NewExpense {
                amount_cents: 500,
                description: "Rent".to_string(),
                category: None,
                date: None,
            })
            .await
            .unwrap();

        let stats = f.dashboard.stats().await.unwrap();
        assert_eq!(stats.total_revenue_cents, 750);
        assert_eq!(stats.total_expenses_cents, 500);
        assert_eq!(stats.net_profit_cents, -50);

        let soap_profit = &stats.product_profits[0];
        assert_eq!(soap_profit.product_name, "Soap");
        assert_eq!(soap_profit.total_profit_cents, 450);
        assert_eq!(soap_profit.units_sold, 3);
    }

    #[tokio::test]
    async fn test_stats_idempotent_on_unchanged_snapshot() {
        let f = fixture(Currency::Usd).await;
        let soap = f
            .catalog
            .create(NewProduct {
                name: "Soap".to_string(),
                category: "Hygiene".to_string(),
                subcategory: None,
                initial_stock: 10,
                purchase_price_cents: 100,
                sale_price_cents: 250,
            })
            .await
            .unwrap();
        f.ledger.record_sale(&soap.id, 2).await.unwrap();

        let first = f.dashboard.stats().await.unwrap();
        let second = f.dashboard.stats().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_formatted_uses_profile_currency() {
        let f = fixture(Currency::Cdf).await;
        let soap = f
            .catalog
            .create(NewProduct {
                name: "Soap".to_string(),
                category: "Hygiene".to_string(),
                subcategory: None,
                initial_stock: 10,
                purchase_price_cents: 100,
                sale_price_cents: 250,
            })
            .await
            .unwrap();
        f.ledger.record_sale(&soap.id, 3).await.unwrap();

        let (stats, formatted) = f.dashboard.formatted().await.unwrap();
        assert_eq!(stats.total_revenue_cents, 750);
        assert_eq!(formatted.total_revenue, "FC 7.5");
        assert_eq!(formatted.total_expenses, "FC 0");
        assert_eq!(formatted.net_profit, "FC 4.5");
    }
}
