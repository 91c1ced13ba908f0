//! Repository for check-in record operations.
//!
//! The checkin_records table carries `UNIQUE (registration_id)`. The insert
//! below races through that constraint instead of a lookup-then-insert, so
//! two concurrent scans of the same badge resolve at the store: one insert
//! wins, the other observes the conflict.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CheckinRecordEntity;

const RECORD_COLUMNS: &str = "id, event_id, registration_id, participant_id, participant_name, \
     participant_email, checkin_method, scanner_user_id, checked_in_at";

/// Repository for check-in record operations.
#[derive(Clone)]
pub struct CheckinRepository {
    pool: PgPool,
}

impl CheckinRepository {
    /// Creates a new check-in repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a check-in record unless one already exists for the
    /// registration.
    ///
    /// Returns the created entity, or `None` when the registration was
    /// already checked in (the uniqueness constraint swallowed the insert).
    /// `id` and `checked_in_at` are assigned by the store.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_once(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
        participant_id: Uuid,
        participant_name: &str,
        participant_email: &str,
        checkin_method: &str,
        scanner_user_id: Uuid,
    ) -> Result<Option<CheckinRecordEntity>, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO checkin_records
                (event_id, registration_id, participant_id, participant_name,
                 participant_email, checkin_method, scanner_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (registration_id) DO NOTHING
            RETURNING {RECORD_COLUMNS}
            "#
        );

        sqlx::query_as::<_, CheckinRecordEntity>(&query)
            .bind(event_id)
            .bind(registration_id)
            .bind(participant_id)
            .bind(participant_name)
            .bind(participant_email)
            .bind(checkin_method)
            .bind(scanner_user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Finds the check-in record for a registration, if any.
    pub async fn find_by_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Option<CheckinRecordEntity>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM checkin_records
            WHERE registration_id = $1
            "#
        );

        sqlx::query_as::<_, CheckinRecordEntity>(&query)
            .bind(registration_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Lists an event's check-in records, newest first.
    pub async fn list_for_event(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CheckinRecordEntity>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM checkin_records
            WHERE event_id = $1
            ORDER BY checked_in_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        );

        sqlx::query_as::<_, CheckinRecordEntity>(&query)
            .bind(event_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Counts an event's check-in records.
    pub async fn count_for_event(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM checkin_records
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
