//! # duka-db: Database Layer for Duka
//!
//! This crate provides database access for Duka. It uses SQLite for local
//! storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Duka Data Flow                                │
//! │                                                                         │
//! │  Service call (record_sale, create product, ...)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      duka-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │ product/sale/ │    │  (embedded)  │   │   │
//! │  │   │               │◄───│ expense/user  │    │ 001_init.sql │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, sale, expense, user)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use duka_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let db = Database::new(DbConfig::new("path/to/duka.db")).await?;
//!
//! // Use repositories
//! let products = db.products().list(owner_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::expense::ExpenseRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::{SaleOutcome, SaleRepository};
pub use repository::user::{UserRecord, UserRepository};
