//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Event;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub name: String,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            organizer_id: entity.organizer_id,
            name: entity.name,
            venue: entity.venue,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            created_at: entity.created_at,
        }
    }
}
