//! # duka-shop: Service Layer for Duka
//!
//! The orchestration layer: owner-scoped services that tie the pure domain
//! (duka-core) to the persistence gateway (duka-db).
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Service Data Flow                                │
//! │                                                                         │
//! │  caller action (record sale, add product, ...)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Service ── local validation (duka-core) ── fails fast, no round trip   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository write (duka-db) ── owner-scoped, transactional where        │
//! │       │                        two writes belong together               │
//! │       ▼                                                                 │
//! │  ChangeFeed.publish ── subscribers re-query full snapshots              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DashboardService recomputes on demand (pure reduce, no cache)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Construction
//! Every service is built from an explicit [`duka_db::Database`] handle and
//! the owner id of the authenticated user. Nothing global: tests construct
//! services over an in-memory database.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod services;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ShopError, ShopResult};
pub use services::auth::AuthService;
pub use services::catalog::CatalogService;
pub use services::dashboard::{DashboardService, FormattedStats};
pub use services::expenses::ExpenseService;
pub use services::ledger::LedgerService;
pub use state::feed::{ChangeEvent, ChangeFeed, Collection};
pub use state::session::{Session, SessionState};
