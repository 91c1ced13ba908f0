//! Repository for event lookups.
//!
//! Events are owned by the organizer subsystem; the check-in core only
//! reads them.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;

/// Repository for event operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an event by its id.
    ///
    /// Returns `None` if no event with the given id exists.
    pub async fn find_by_id(&self, event_id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, organizer_id, name, venue, starts_at, ends_at, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
    }
}
