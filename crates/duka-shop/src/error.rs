//! # Service Error Type
//!
//! Unified error type for the service layer: what callers of duka-shop see.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Duka                                   │
//! │                                                                         │
//! │  Validation        bad input, caught locally before any gateway call    │
//! │  NotFound          referenced id absent or owned by someone else        │
//! │  InsufficientStock sale quantity exceeds current stock                  │
//! │  InvalidCredentials / NotSignedIn   auth failures                       │
//! │  Gateway           the persistence gateway call itself failed           │
//! │                                                                         │
//! │  No silent recovery, no retries: every failure is reported to the       │
//! │  caller once, and the caller decides whether to resubmit.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use duka_core::{CoreError, ValidationError};
use duka_db::DbError;

/// Service-layer error returned to callers.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Input validation failed (checked locally, no round trip wasted).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced entity absent, or not owned by the caller.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Sale quantity exceeds the product's current stock.
    #[error("insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Unknown email or wrong password.
    ///
    /// One variant for both cases on purpose: sign-in must not reveal
    /// which half was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An operation that needs a signed-in user ran without a session.
    #[error("no active session")]
    NotSignedIn,

    /// The persistence gateway call failed (connection, query, pool).
    #[error("gateway error: {0}")]
    Gateway(DbError),

    /// Internal failure (e.g., password hashing).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Creates a not-found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        ShopError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// Converts gateway errors to service errors.
///
/// NotFound and UniqueViolation carry caller-relevant meaning and keep
/// their category; everything else is a gateway failure.
impl From<DbError> for ShopError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ShopError::NotFound { entity, id },
            DbError::UniqueViolation { field, value } => {
                ShopError::Validation(ValidationError::Duplicate { field, value })
            }
            other => ShopError::Gateway(other),
        }
    }
}

/// Converts core business errors to service errors.
impl From<CoreError> for ShopError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => ShopError::InsufficientStock {
                product,
                available,
                requested,
            },
            CoreError::Validation(e) => ShopError::Validation(e),
        }
    }
}

/// Result type for service operations.
pub type ShopResult<T> = Result<T, ShopError>;

// =============================================================================
// Unit Tests
// =============================================================================
