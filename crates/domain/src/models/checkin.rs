//! Check-in domain models and DTOs.
//!
//! A check-in record is the durable proof that a registration's holder was
//! admitted. Records are created exactly once per registration, are never
//! mutated or deleted, and are read by roster and statistics views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageInfo;
use uuid::Uuid;

/// How a check-in was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinMethod {
    QrScan,
    Manual,
}

impl CheckinMethod {
    /// Convert to the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QrScan => "qr_scan",
            Self::Manual => "manual",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "qr_scan" => Some(Self::QrScan),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckinMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model for a persisted check-in record.
#[derive(Debug, Clone)]
pub struct CheckinRecord {
    pub id: Uuid,
    pub event_id: Uuid,
    pub registration_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub method: CheckinMethod,
    pub scanner_user_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
}

impl CheckinRecord {
    /// Create a CheckinRecord from raw field values.
    /// Used for converting from persistence entities.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        id: Uuid,
        event_id: Uuid,
        registration_id: Uuid,
        participant_id: Uuid,
        participant_name: String,
        participant_email: String,
        method: &str,
        scanner_user_id: Uuid,
        checked_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            event_id,
            registration_id,
            participant_id,
            participant_name,
            participant_email,
            method: CheckinMethod::parse(method).unwrap_or(CheckinMethod::Manual),
            scanner_user_id,
            checked_in_at,
        }
    }
}

/// Result of a check-in attempt that did not fail.
///
/// A repeated check-in of the same registration is not an error: it is an
/// idempotent no-op reported as `AlreadyCheckedIn`, carrying the existing
/// record.
#[derive(Debug, Clone)]
pub enum CheckinOutcome {
    Created(CheckinRecord),
    AlreadyCheckedIn(CheckinRecord),
}

impl CheckinOutcome {
    /// The persisted record, whichever way the attempt went.
    pub fn record(&self) -> &CheckinRecord {
        match self {
            Self::Created(record) | Self::AlreadyCheckedIn(record) => record,
        }
    }

    /// True when this attempt created the record.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Response representation of a check-in record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckinRecordResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub registration_id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub checkin_method: CheckinMethod,
    pub scanner_user_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
}

impl From<CheckinRecord> for CheckinRecordResponse {
    fn from(record: CheckinRecord) -> Self {
        Self {
            id: record.id,
            event_id: record.event_id,
            registration_id: record.registration_id,
            participant_id: record.participant_id,
            participant_name: record.participant_name,
            participant_email: record.participant_email,
            checkin_method: record.method,
            scanner_user_id: record.scanner_user_id,
            checked_in_at: record.checked_in_at,
        }
    }
}

/// Status label carried by the manual check-in response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinStatus {
    CheckedIn,
    AlreadyCheckedIn,
}

/// Response for the manual check-in endpoint.
/// POST /api/v1/events/:event_id/registrations/:registration_id/checkin
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckinResponse {
    pub status: CheckinStatus,
    pub checkin: CheckinRecordResponse,
}

impl From<CheckinOutcome> for CheckinResponse {
    fn from(outcome: CheckinOutcome) -> Self {
        let status = if outcome.is_new() {
            CheckinStatus::CheckedIn
        } else {
            CheckinStatus::AlreadyCheckedIn
        };
        let record = match outcome {
            CheckinOutcome::Created(record) | CheckinOutcome::AlreadyCheckedIn(record) => record,
        };
        Self {
            status,
            checkin: record.into(),
        }
    }
}

/// Query parameters for listing check-in records.
/// GET /api/v1/events/:event_id/checkins
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListCheckinsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Response for listing check-in records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListCheckinsResponse {
    pub checkins: Vec<CheckinRecordResponse>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(method: CheckinMethod) -> CheckinRecord {
        CheckinRecord {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            registration_id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            participant_name: "Ada".to_string(),
            participant_email: "ada@example.com".to_string(),
            method,
            scanner_user_id: Uuid::new_v4(),
            checked_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(CheckinMethod::QrScan.as_str(), "qr_scan");
        assert_eq!(CheckinMethod::Manual.as_str(), "manual");
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(CheckinMethod::parse("qr_scan"), Some(CheckinMethod::QrScan));
        assert_eq!(CheckinMethod::parse("MANUAL"), Some(CheckinMethod::Manual));
        assert_eq!(CheckinMethod::parse("kiosk"), None);
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_string(&CheckinMethod::QrScan).unwrap(),
            "\"qr_scan\""
        );
        assert_eq!(
            serde_json::to_string(&CheckinMethod::Manual).unwrap(),
            "\"manual\""
        );
    }

    #[test]
    fn test_from_raw_parses_method() {
        let record = CheckinRecord::from_raw(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "qr_scan",
            Uuid::new_v4(),
            Utc::now(),
        );
        assert_eq!(record.method, CheckinMethod::QrScan);
    }

    #[test]
    fn test_outcome_record_access() {
        let record = sample_record(CheckinMethod::Manual);
        let id = record.id;

        let created = CheckinOutcome::Created(record.clone());
        assert!(created.is_new());
        assert_eq!(created.record().id, id);

        let duplicate = CheckinOutcome::AlreadyCheckedIn(record);
        assert!(!duplicate.is_new());
        assert_eq!(duplicate.record().id, id);
    }

    #[test]
    fn test_checkin_response_from_outcome() {
        let record = sample_record(CheckinMethod::QrScan);
        let response: CheckinResponse = CheckinOutcome::Created(record.clone()).into();
        assert_eq!(response.status, CheckinStatus::CheckedIn);
        assert_eq!(response.checkin.checkin_method, CheckinMethod::QrScan);

        let response: CheckinResponse = CheckinOutcome::AlreadyCheckedIn(record).into();
        assert_eq!(response.status, CheckinStatus::AlreadyCheckedIn);
    }

    #[test]
    fn test_checkin_status_serialization() {
        let record = sample_record(CheckinMethod::Manual);
        let response: CheckinResponse = CheckinOutcome::AlreadyCheckedIn(record).into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"already_checked_in\""));
        assert!(json.contains("\"checkin_method\":\"manual\""));
    }
}
