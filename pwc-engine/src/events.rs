//! Change events
//!
//! Every committed mutation of a [`crate::PathwayStore`] is announced on an
//! [`EventBus`] so list views can re-render. Events are emitted after the
//! snapshot flush, in mutation order.

use crate::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Pathway store change notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathwayEvent {
    /// New record appended
    PathwayCreated {
        category: Category,
        id: String,
        topic: String,
        timestamp: DateTime<Utc>,
    },

    /// Record fields changed in place
    PathwayUpdated {
        category: Category,
        id: String,
        exercise_recomputed: bool,
        timestamp: DateTime<Utc>,
    },

    /// Copy of `source_id` appended as `id`
    PathwayDuplicated {
        category: Category,
        source_id: String,
        id: String,
        timestamp: DateTime<Utc>,
    },

    /// Record removed
    PathwayDeleted {
        category: Category,
        id: String,
        timestamp: DateTime<Utc>,
    },

    /// Record moved within its category
    PathwaysReordered {
        category: Category,
        source: usize,
        destination: usize,
        timestamp: DateTime<Utc>,
    },

    /// Dark-mode preference changed
    DarkModeChanged {
        enabled: bool,
        timestamp: DateTime<Utc>,
    },
}

impl PathwayEvent {
    pub fn created(category: Category, id: &str, topic: &str) -> Self {
        PathwayEvent::PathwayCreated {
            category,
            id: id.to_string(),
            topic: topic.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn updated(category: Category, id: &str, exercise_recomputed: bool) -> Self {
        PathwayEvent::PathwayUpdated {
            category,
            id: id.to_string(),
            exercise_recomputed,
            timestamp: Utc::now(),
        }
    }

    pub fn duplicated(category: Category, source_id: &str, id: &str) -> Self {
        PathwayEvent::PathwayDuplicated {
            category,
            source_id: source_id.to_string(),
            id: id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn deleted(category: Category, id: &str) -> Self {
        PathwayEvent::PathwayDeleted {
            category,
            id: id.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn reordered(category: Category, source: usize, destination: usize) -> Self {
        PathwayEvent::PathwaysReordered {
            category,
            source,
            destination,
            timestamp: Utc::now(),
        }
    }

    pub fn dark_mode_changed(enabled: bool) -> Self {
        PathwayEvent::DarkModeChanged {
            enabled,
            timestamp: Utc::now(),
        }
    }

    /// Category the event concerns; `None` for global settings
    pub fn category(&self) -> Option<Category> {
        match self {
            PathwayEvent::PathwayCreated { category, .. }
            | PathwayEvent::PathwayUpdated { category, .. }
            | PathwayEvent::PathwayDuplicated { category, .. }
            | PathwayEvent::PathwayDeleted { category, .. }
            | PathwayEvent::PathwaysReordered { category, .. } => Some(*category),
            PathwayEvent::DarkModeChanged { .. } => None,
        }
    }
}

/// Default channel capacity for a store's bus
pub const DEFAULT_CAPACITY: usize = 100;

/// Broadcast bus for [`PathwayEvent`]s
///
/// Non-blocking publish; slow subscribers observe `Lagged` instead of
/// holding up the store.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PathwayEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<PathwayEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: PathwayEvent,
    ) -> Result<usize, broadcast::error::SendError<PathwayEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: PathwayEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = PathwayEvent::deleted(Category::Melody, "abc");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "PathwayDeleted");
        assert_eq!(value["category"], "melody");
        assert_eq!(value["id"], "abc");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_event_is_stamped_at_construction() {
        let before = Utc::now();
        let event = PathwayEvent::created(Category::Rhythm, "1", "Beat");
        let after = Utc::now();

        let PathwayEvent::PathwayCreated { timestamp, .. } = event else {
            panic!("unexpected event: {event:?}");
        };
        assert!(before <= timestamp && timestamp <= after);
    }

    #[test]
    fn test_event_category() {
        assert_eq!(
            PathwayEvent::reordered(Category::Harmony, 0, 2).category(),
            Some(Category::Harmony)
        );
        assert_eq!(PathwayEvent::dark_mode_changed(true).category(), None);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
        assert!(bus.emit(PathwayEvent::dark_mode_changed(false)).is_err());
        bus.emit_lossy(PathwayEvent::dark_mode_changed(false));
    }

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();

        bus.emit_lossy(PathwayEvent::created(Category::Rhythm, "1", "Beat"));
        bus.emit_lossy(PathwayEvent::deleted(Category::Rhythm, "1"));

        assert!(matches!(
            rx.recv().await.unwrap(),
            PathwayEvent::PathwayCreated { ref topic, .. } if topic == "Beat"
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            PathwayEvent::PathwayDeleted { ref id, .. } if id == "1"
        ));
    }
}
