//! # duka-core: Pure Business Logic for Duka
//!
//! This crate is the **heart** of Duka, a small-business inventory, sales
//! and expense tracker. It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Duka Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 duka-shop (Service Layer)                       │   │
//! │  │    Catalog ──► Sale Ledger ──► Expense Log ──► Dashboard        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ duka-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   stats   │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │ Dashboard │  │   rules   │   │   │
//! │  │   │ Sale/Exp. │  │ currency  │  │  reduce   │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    duka-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Expense, UserProfile)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`currency`] - Currency/language enums and display formatting
//! - [`stats`] - The aggregation engine (dashboard statistics)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use duka_core::money::Money;
//! use duka_core::currency::format_currency;
//!
//! // Create money from cents (never from floats!)
//! let revenue = Money::from_cents(123_450); // 1,234.50
//!
//! // Format for display in the user's currency
//! assert_eq!(format_currency(revenue, "USD"), "$ 1,234.5");
//! assert_eq!(format_currency(revenue, "CDF"), "FC 1,234.5");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use duka_core::Money` instead of
// `use duka_core::money::Money`

pub use currency::{Currency, Language};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use stats::dashboard_stats;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity for a single sale.
///
/// ## Business Reason
/// Prevents accidental over-selling (e.g., typing 1000 instead of 10).
/// Far above anything a single shop counter transaction needs.
pub const MAX_SALE_QUANTITY: i64 = 9_999;

/// Maximum length of a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of an expense description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;
