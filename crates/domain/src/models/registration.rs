//! Registration domain model.
//!
//! Registrations are owned by the external registration subsystem; the
//! check-in core treats them as read-only. Only `active` registrations are
//! eligible for check-in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageInfo;
use uuid::Uuid;

use super::checkin::CheckinMethod;

/// Length of generated ticket codes.
const TICKET_CODE_LENGTH: usize = 8;

/// Registration lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Active,
    Pending,
    Cancelled,
}

impl RegistrationStatus {
    /// Convert to the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status reported by the external payment flow. Informational for
/// roster views; it does not gate check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paid" => Some(Self::Paid),
            "pending" => Some(Self::Pending),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }
}

/// Domain model for a participant's confirmed signup.
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub ticket_code: String,
    pub status: RegistrationStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Only active registrations may be checked in.
    pub fn is_eligible_for_checkin(&self) -> bool {
        self.status == RegistrationStatus::Active
    }
}

/// Generate a ticket code for manual roster lookup.
///
/// Uses a charset without confusable characters (no 0/O, 1/I).
pub fn generate_ticket_code() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();

    (0..TICKET_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// One roster row: a registration plus its check-in state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterEntryResponse {
    pub registration_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub ticket_code: String,
    pub status: RegistrationStatus,
    pub payment_status: PaymentStatus,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_method: Option<CheckinMethod>,
}

/// Query parameters for the roster endpoint.
/// GET /api/v1/events/:event_id/roster
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterQuery {
    /// Ticket-code filter for manual lookup when a scan fails.
    pub code: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Response for the roster endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterResponse {
    pub entries: Vec<RosterEntryResponse>,
    pub pagination: PageInfo,
}
