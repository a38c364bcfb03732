//! # Expense Service
//!
//! The expense log: append and delete, never update. Independent of the
//! catalog and the sale ledger.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use duka_core::validation::validate_new_expense;
use duka_core::{Expense, NewExpense};
use duka_db::Database;

use crate::error::ShopResult;
use crate::state::feed::{ChangeFeed, Collection};

/// Owner-scoped expense log.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    db: Database,
    owner_id: String,
    feed: ChangeFeed,
}

impl ExpenseService {
    /// Creates an expense service for one owner.
    pub fn new(db: Database, owner_id: impl Into<String>, feed: ChangeFeed) -> Self {
        ExpenseService {
            db,
            owner_id: owner_id.into(),
            feed,
        }
    }

    /// Appends an expense to the log.
    ///
    /// ## Behavior
    /// - Rejects non-positive amounts and empty descriptions locally
    /// - `date` defaults to now when the spec leaves it out
    pub async fn add(&self, spec: NewExpense) -> ShopResult<Expense> {
        debug!(amount_cents = %spec.amount_cents, "add expense");

        validate_new_expense(&spec)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            owner_id: self.owner_id.clone(),
            amount_cents: spec.amount_cents,
            description: spec.description.trim().to_string(),
            category: spec.category,
            date: spec.date.unwrap_or_else(Utc::now),
        };

        self.db.expenses().insert(&expense).await?;
        self.feed.publish(Collection::Expenses, &self.owner_id);

        info!(id = %expense.id, amount_cents = %expense.amount_cents, "Expense recorded");
        Ok(expense)
    }

    /// Deletes an expense from the log.
    pub async fn delete(&self, id: &str) -> ShopResult<()> {
        debug!(id = %id, "delete expense");

        self.db.expenses().delete(&self.owner_id, id).await?;
        self.feed.publish(Collection::Expenses, &self.owner_id);

        info!(id = %id, "Expense deleted");
        Ok(())
    }

    /// Returns the expense log, most recent first.
    pub async fn expenses(&self) -> ShopResult<Vec<Expense>> {
        Ok(self.db.expenses().list(&self.owner_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
