//! In-process live check-in feed.
//!
//! The recorder publishes every created check-in record here; interested
//! observers (the SSE roster stream) subscribe per event. Events are only
//! broadcast within a single process — with multiple server replicas a
//! shared bus (Redis/Postgres) would replace this behind the same publish
//! call.

use dashmap::DashMap;
use domain::models::CheckinRecord;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Broadcast bus for created check-in records, one channel per event.
pub struct CheckinFeed {
    channels: DashMap<Uuid, broadcast::Sender<CheckinRecord>>,
    capacity: usize,
}

impl CheckinFeed {
    /// Creates a feed whose per-event channels buffer `capacity` records.
    /// A subscriber lagging further behind is dropped and must resync via
    /// the list endpoint.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity,
        }
    }

    /// Get or create the broadcast channel for an event.
    fn channel(&self, event_id: Uuid) -> broadcast::Sender<CheckinRecord> {
        self.channels
            .entry(event_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Publishes a created record to the event's subscribers.
    ///
    /// A send without receivers is fine and ignored.
    pub fn publish(&self, record: &CheckinRecord) {
        let tx = self.channel(record.event_id);
        let _ = tx.send(record.clone());
    }

    /// Subscribes to an event's check-in stream.
    pub fn subscribe(&self, event_id: Uuid) -> broadcast::Receiver<CheckinRecord> {
        self.channel(event_id).subscribe()
    }
}
