//! Repository for registration lookups.
//!
//! Deliberately read-only: registrations are written by the external
//! registration subsystem. The check-in core consumes them through the
//! queries below.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RegistrationEntity, RegistrationWithCheckinEntity};

const ROSTER_SELECT: &str = r#"
    SELECT
        r.id, r.event_id, r.participant_id, r.participant_name,
        r.participant_email, r.ticket_code, r.status, r.payment_status,
        r.created_at,
        c.checked_in_at AS checked_in_at,
        c.checkin_method AS checkin_method
    FROM registrations r
    LEFT JOIN checkin_records c ON c.registration_id = r.id
"#;

/// Repository for registration operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an active registration by `(event_id, registration_id)`.
    ///
    /// Returns `None` when the registration does not exist, belongs to a
    /// different event, or is not in `active` status — the three cases are
    /// indistinguishable to callers on purpose (all are ineligible).
    pub async fn find_active(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, event_id, participant_id, participant_name, participant_email,
                   ticket_code, status, payment_status, created_at
            FROM registrations
            WHERE event_id = $1 AND id = $2 AND status = 'active'
            "#,
        )
        .bind(event_id)
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists an event's registrations with their check-in state, ordered by
    /// participant name.
    pub async fn list_with_checkin(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RegistrationWithCheckinEntity>, sqlx::Error> {
        let query = format!(
            "{ROSTER_SELECT}
            WHERE r.event_id = $1
            ORDER BY r.participant_name ASC, r.id ASC
            LIMIT $2 OFFSET $3"
        );

        sqlx::query_as::<_, RegistrationWithCheckinEntity>(&query)
            .bind(event_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Finds a single roster entry by ticket code.
    ///
    /// Used by staff to resolve a participant manually when a scan fails.
    pub async fn find_with_checkin_by_code(
        &self,
        event_id: Uuid,
        ticket_code: &str,
    ) -> Result<Option<RegistrationWithCheckinEntity>, sqlx::Error> {
        let query = format!(
            "{ROSTER_SELECT}
            WHERE r.event_id = $1 AND r.ticket_code = $2"
        );

        sqlx::query_as::<_, RegistrationWithCheckinEntity>(&query)
            .bind(event_id)
            .bind(ticket_code)
            .fetch_optional(&self.pool)
            .await
    }

    /// Counts an event's registrations.
    pub async fn count_for_event(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM registrations
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
