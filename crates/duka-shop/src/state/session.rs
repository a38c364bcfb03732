//! # Session State
//!
//! Tracks the single active sign-in for this process.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<Option<Session>>>`:
//! - `Arc`: shared ownership across services
//! - `Mutex`: sign-in/sign-out and reads are exclusive, and all of them
//!   are quick
//!
//! One active session per process: signing in replaces whatever session
//! was there before.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user of this process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Owner id every service operation is scoped to.
    pub user_id: String,

    /// Email the user signed in with.
    pub email: String,

    /// When the session started.
    pub signed_in_at: DateTime<Utc>,
}

/// Shared, mutable session slot.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Option<Session>>>,
}

impl SessionState {
    /// Creates an empty (signed-out) session state.
    pub fn new() -> Self {
        SessionState {
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the active session.
    pub fn sign_in(&self, session: Session) {
        let mut slot = self.session.lock().expect("session mutex poisoned");
        *slot = Some(session);
    }

    /// Clears the active session, returning what was there.
    ///
    /// Idempotent: signing out twice is fine.
    pub fn sign_out(&self) -> Option<Session> {
        let mut slot = self.session.lock().expect("session mutex poisoned");
        slot.take()
    }

    /// Returns a copy of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        let slot = self.session.lock().expect("session mutex poisoned");
        slot.clone()
    }

    /// Returns the current owner id, or an error when signed out.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let owner = session_state.owner_id()?;
    /// let catalog = CatalogService::new(db.clone(), owner, feed.clone());
    /// ```
    pub fn owner_id(&self) -> Result<String, crate::error::ShopError> {
        self.current()
            .map(|s| s.user_id)
            .ok_or(crate::error::ShopError::NotSignedIn)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
