//! # Expense Repository
//!
//! Database operations for the expense log. Expenses are independent of
//! the catalog and the ledger: created and deleted freely, never updated.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use duka_core::Expense;

/// Repository for expense log operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

const EXPENSE_COLUMNS: &str = "id, owner_id, amount_cents, description, category, date";

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Inserts a new expense.
    pub async fn insert(&self, expense: &Expense) -> DbResult<()> {
        debug!(id = %expense.id, amount = %expense.amount_cents, "Inserting expense");

        sqlx::query(
            r#"
            INSERT INTO expenses (id, owner_id, amount_cents, description, category, date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.owner_id)
        .bind(expense.amount_cents)
        .bind(&expense.description)
        .bind(&expense.category)
        .bind(expense.date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an expense by ID, scoped to an owner.
    pub async fn get(&self, owner_id: &str, id: &str) -> DbResult<Option<Expense>> {
        let query = format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1 AND owner_id = ?2");

        let expense = sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(expense)
    }

    /// Lists an owner's expenses, most recent first.
    pub async fn list(&self, owner_id: &str) -> DbResult<Vec<Expense>> {
        let query = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE owner_id = ?1 ORDER BY date DESC"
        );

        let expenses = sqlx::query_as::<_, Expense>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(expenses)
    }

    /// Deletes an expense.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - expense doesn't exist for this owner
    pub async fn delete(&self, owner_id: &str, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting expense");

        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        Ok(())
    }
}

/// Generates a new expense ID.
pub fn generate_expense_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
