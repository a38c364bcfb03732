//! # Change Feed
//!
//! Push-style change notification for live views.
//!
//! ## Snapshot-Replace Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Change Feed                                      │
//! │                                                                         │
//! │  Service mutation succeeds                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  feed.publish(Collection::Sales, owner_id)                              │
//! │       │                                                                 │
//! │       ▼ broadcast                                                       │
//! │  every subscriber receives ChangeEvent                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subscriber re-queries the FULL snapshot and replaces its local         │
//! │  mirror wholesale - no fine-grained merge, no diffing. Derived          │
//! │  computations over the old snapshot must be discarded.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events carry which collection changed and for which owner - never the
//! data itself. A slow subscriber that lags past the channel capacity
//! misses events, not correctness: the next event it does see still tells
//! it to reload everything.

use tokio::sync::broadcast;

/// Channel capacity. Events are tiny and consumers reload snapshots, so a
/// small buffer is plenty.
const FEED_CAPACITY: usize = 64;

/// The collections a change event can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Products,
    Sales,
    Expenses,
    Profiles,
}

/// A notification that a collection changed for an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub owner_id: String,
}

/// Broadcast feed of change events.
///
/// Cloning shares the underlying channel; services hold clones and
/// publish after each successful mutation.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Creates a new feed.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        ChangeFeed { tx }
    }

    /// Subscribes to change events. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Publishes a change event.
    ///
    /// A send with no live subscribers is not an error - there is simply
    /// nobody watching right now.
    pub fn publish(&self, collection: Collection, owner_id: &str) {
        let _ = self.tx.send(ChangeEvent {
            collection,
            owner_id: owner_id.to_string(),
        });
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(Collection::Sales, "u-1");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.collection, Collection::Sales);
        assert_eq!(event.owner_id, "u-1");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let feed = ChangeFeed::new();
        // No receiver exists; this must not panic or error.
        feed.publish(Collection::Products, "u-1");
    }

    #[tokio::test]
    async fn test_all_subscribers_see_every_event() {
        let feed = ChangeFeed::new();
        let mut a = feed.subscribe();
        let mut b = feed.subscribe();

        feed.publish(Collection::Expenses, "u-1");

        assert_eq!(a.recv().await.unwrap().collection, Collection::Expenses);
        assert_eq!(b.recv().await.unwrap().collection, Collection::Expenses);
    }

    #[tokio::test]
    async fn test_clones_share_the_channel() {
        let feed = ChangeFeed::new();
        let cloned = feed.clone();
        let mut rx = feed.subscribe();

        cloned.publish(Collection::Profiles, "u-2");
        assert_eq!(rx.recv().await.unwrap().owner_id, "u-2");
    }
}
