//! Event domain model.
//!
//! Events are owned by the external organizer subsystem; the check-in core
//! only reads them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Domain model for an event.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub name: String,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Compact event description returned for info scans.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventSummaryResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
}

impl From<Event> for EventSummaryResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            venue: event.venue,
            starts_at: event.starts_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            name: "RustConf".to_string(),
            venue: Some("Hall B".to_string()),
            starts_at: Utc::now(),
            ends_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_from_event() {
        let event = sample_event();
        let id = event.id;
        let summary: EventSummaryResponse = event.into();
        assert_eq!(summary.id, id);
        assert_eq!(summary.name, "RustConf");
        assert_eq!(summary.venue.as_deref(), Some("Hall B"));
    }

    #[test]
    fn test_summary_serialization_skips_missing_venue() {
        let mut event = sample_event();
        event.venue = None;
        let summary: EventSummaryResponse = event.into();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("venue"));
        assert!(json.contains("\"name\":\"RustConf\""));
    }
}
