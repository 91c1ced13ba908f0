//! Check-in record entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::CheckinRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the checkin_records table.
///
/// Rows are created once per registration (enforced by a uniqueness
/// constraint on `registration_id`) and never updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct CheckinRecordEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub registration_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub checkin_method: String,
    pub scanner_user_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
}

impl From<CheckinRecordEntity> for CheckinRecord {
    fn from(entity: CheckinRecordEntity) -> Self {
        CheckinRecord::from_raw(
            entity.id,
            entity.event_id,
            entity.registration_id,
            entity.participant_id,
            entity.participant_name,
            entity.participant_email,
            &entity.checkin_method,
            entity.scanner_user_id,
            entity.checked_in_at,
        )
    }
}
