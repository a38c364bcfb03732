//! # State Module
//!
//! Process-local shared state for the service layer.
//!
//! - [`session`] - the single active sign-in, behind `Arc<Mutex<_>>`
//! - [`feed`] - broadcast channel notifying subscribers of collection
//!   changes so they can reload full snapshots

pub mod feed;
pub mod session;

pub use feed::{ChangeEvent, ChangeFeed, Collection};
pub use session::{Session, SessionState};
