//! Registration entity (database row mapping).
//!
//! The registrations table is written by the external registration
//! subsystem; this crate only reads it.

use chrono::{DateTime, Utc};
use domain::models::{PaymentStatus, Registration, RegistrationStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub ticket_code: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl RegistrationEntity {
    /// Check if this registration is eligible for check-in.
    pub fn is_active(&self) -> bool {
        RegistrationStatus::parse(&self.status) == Some(RegistrationStatus::Active)
    }
}

impl From<RegistrationEntity> for Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            participant_id: entity.participant_id,
            participant_name: entity.participant_name,
            participant_email: entity.participant_email,
            ticket_code: entity.ticket_code,
            // Unknown statuses stay ineligible rather than failing the row.
            status: RegistrationStatus::parse(&entity.status)
                .unwrap_or(RegistrationStatus::Pending),
            payment_status: PaymentStatus::parse(&entity.payment_status)
                .unwrap_or(PaymentStatus::Pending),
            created_at: entity.created_at,
        }
    }
}

/// Registration row joined with its check-in state, for roster views.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWithCheckinEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub ticket_code: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checkin_method: Option<String>,
}
