//! QR payload codec.
//!
//! Event QR codes embed a compact JSON payload identifying the event, the
//! purpose of the code, and (for check-in badges) the registration the badge
//! belongs to. The wire field names are a fixed contract with the scanning
//! clients and use camelCase.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Upper bound on accepted payload size. Anything larger is not a QR
/// payload and is rejected before JSON parsing.
pub const MAX_PAYLOAD_BYTES: usize = 4096;

/// Purpose of a QR code, fixing which handler processes a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrPurpose {
    Checkin,
    Info,
    Feedback,
}

impl QrPurpose {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkin => "checkin",
            Self::Info => "info",
            Self::Feedback => "feedback",
        }
    }

    /// Parse from the wire string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checkin" => Some(Self::Checkin),
            "info" => Some(Self::Info),
            "feedback" => Some(Self::Feedback),
            _ => None,
        }
    }
}

impl std::fmt::Display for QrPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error raised when a scanned string cannot be turned into a payload.
#[derive(Debug, Error)]
pub enum QrPayloadError {
    /// The input is not parseable as the expected JSON structure.
    #[error("malformed QR payload: {0}")]
    Malformed(String),

    /// The structure parsed but required fields are missing or unusable.
    #[error("invalid QR payload: {0}")]
    Invalid(String),
}

/// Decoded content of a scanned QR code.
///
/// Ephemeral: constructed at generation time, destructed right after decode
/// at scan time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub event_id: Uuid,
    pub purpose: QrPurpose,
    /// Registration the badge belongs to. Required for check-in codes,
    /// absent on event-level info/feedback codes.
    pub registration_id: Option<Uuid>,
    /// Organizer account that generated the code.
    pub organizer_id: Option<Uuid>,
    /// Creation time in milliseconds since epoch. Advisory only; no expiry
    /// is enforced.
    pub issued_at_ms: Option<i64>,
}

/// Wire representation. All fields optional so that decoding can tell a
/// structurally broken string apart from one with missing fields.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qr_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organizer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    registration_id: Option<String>,
}

impl QrPayload {
    /// Serializes a payload for embedding in a QR image.
    ///
    /// Stamps the current time as the advisory `timestamp` field. Always
    /// succeeds for well-formed inputs.
    pub fn encode(
        event_id: Uuid,
        purpose: QrPurpose,
        organizer_id: Uuid,
        registration_id: Option<Uuid>,
    ) -> String {
        let wire = WirePayload {
            event_id: Some(event_id.to_string()),
            qr_type: Some(purpose.as_str().to_string()),
            timestamp: Some(Utc::now().timestamp_millis()),
            organizer_id: Some(organizer_id.to_string()),
            registration_id: registration_id.map(|id| id.to_string()),
        };
        serde_json::to_string(&wire).expect("QR payload serialization cannot fail")
    }

    /// Parses and validates a scanned string.
    ///
    /// No expiry or signature check is performed; any syntactically valid
    /// payload from any source is accepted.
    pub fn decode(input: &str) -> Result<Self, QrPayloadError> {
        if input.len() > MAX_PAYLOAD_BYTES {
            return Err(QrPayloadError::Malformed(
                "payload exceeds size limit".to_string(),
            ));
        }

        let wire: WirePayload =
            serde_json::from_str(input).map_err(|e| QrPayloadError::Malformed(e.to_string()))?;

        let event_id = wire
            .event_id
            .ok_or_else(|| QrPayloadError::Invalid("missing eventId".to_string()))?;
        let event_id = Uuid::parse_str(&event_id)
            .map_err(|_| QrPayloadError::Invalid("eventId is not a valid UUID".to_string()))?;

        let qr_type = wire
            .qr_type
            .ok_or_else(|| QrPayloadError::Invalid("missing qrType".to_string()))?;
        let purpose = QrPurpose::parse(&qr_type)
            .ok_or_else(|| QrPayloadError::Invalid(format!("unknown qrType: {qr_type}")))?;

        let organizer_id = match wire.organizer_id {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|_| {
                QrPayloadError::Invalid("organizerId is not a valid UUID".to_string())
            })?),
            None => None,
        };

        let registration_id = match wire.registration_id {
            Some(raw) => Some(Uuid::parse_str(&raw).map_err(|_| {
                QrPayloadError::Invalid("registrationId is not a valid UUID".to_string())
            })?),
            None => None,
        };

        Ok(Self {
            event_id,
            purpose,
            registration_id,
            organizer_id,
            issued_at_ms: wire.timestamp,
        })
    }
}

/// Request body for the scan endpoint.
/// POST /api/v1/events/:event_id/scans
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ScanRequest {
    #[validate(length(min = 1, message = "Scanned payload must not be empty"))]
    pub payload: String,
}

/// Outcome category of a processed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanResult {
    CheckedIn,
    AlreadyCheckedIn,
    Info,
    FeedbackReceived,
}

/// Response for the scan endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanResponse {
    pub result: ScanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin: Option<super::checkin::CheckinRecordResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<super::event::EventSummaryResponse>,
}

/// Request to generate a QR payload.
/// POST /api/v1/events/:event_id/qr-codes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QrCodeRequest {
    pub purpose: QrPurpose,
    #[serde(default)]
    pub registration_id: Option<Uuid>,
}

/// Response for QR code generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct QrCodeResponse {
    pub qr_data: String,
    pub scan_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_as_str() {
        assert_eq!(QrPurpose::Checkin.as_str(), "checkin");
        assert_eq!(QrPurpose::Info.as_str(), "info");
        assert_eq!(QrPurpose::Feedback.as_str(), "feedback");
    }

    #[test]
    fn test_purpose_parse() {
        assert_eq!(QrPurpose::parse("checkin"), Some(QrPurpose::Checkin));
        assert_eq!(QrPurpose::parse("INFO"), Some(QrPurpose::Info));
        assert_eq!(QrPurpose::parse("Feedback"), Some(QrPurpose::Feedback));
        assert_eq!(QrPurpose::parse("unknown"), None);
        assert_eq!(QrPurpose::parse(""), None);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let event_id = Uuid::new_v4();
        let organizer_id = Uuid::new_v4();
        let registration_id = Uuid::new_v4();

        let encoded = QrPayload::encode(
            event_id,
            QrPurpose::Checkin,
            organizer_id,
            Some(registration_id),
        );
        let decoded = QrPayload::decode(&encoded).unwrap();

        assert_eq!(decoded.event_id, event_id);
        assert_eq!(decoded.purpose, QrPurpose::Checkin);
        assert_eq!(decoded.organizer_id, Some(organizer_id));
        assert_eq!(decoded.registration_id, Some(registration_id));
        assert!(decoded.issued_at_ms.is_some());
    }

    #[test]
    fn test_encode_without_registration() {
        let encoded = QrPayload::encode(Uuid::new_v4(), QrPurpose::Info, Uuid::new_v4(), None);
        assert!(!encoded.contains("registrationId"));

        let decoded = QrPayload::decode(&encoded).unwrap();
        assert_eq!(decoded.purpose, QrPurpose::Info);
        assert!(decoded.registration_id.is_none());
    }

    #[test]
    fn test_encode_uses_wire_field_names() {
        let encoded = QrPayload::encode(Uuid::new_v4(), QrPurpose::Checkin, Uuid::new_v4(), None);
        assert!(encoded.contains("\"eventId\""));
        assert!(encoded.contains("\"qrType\""));
        assert!(encoded.contains("\"timestamp\""));
        assert!(encoded.contains("\"organizerId\""));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = QrPayload::decode("not-json").unwrap_err();
        assert!(matches!(err, QrPayloadError::Malformed(_)));
    }

    #[test]
    fn test_decode_rejects_json_array() {
        let err = QrPayload::decode("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, QrPayloadError::Malformed(_)));
    }

    #[test]
    fn test_decode_rejects_oversized_input() {
        let huge = format!("{{\"eventId\":\"{}\"}}", "a".repeat(MAX_PAYLOAD_BYTES));
        let err = QrPayload::decode(&huge).unwrap_err();
        assert!(matches!(err, QrPayloadError::Malformed(_)));
    }

    #[test]
    fn test_decode_rejects_missing_event_id() {
        let err = QrPayload::decode(r#"{"qrType": "checkin"}"#).unwrap_err();
        assert!(matches!(err, QrPayloadError::Invalid(_)));
    }

    #[test]
    fn test_decode_rejects_missing_qr_type() {
        let input = format!(r#"{{"eventId": "{}"}}"#, Uuid::new_v4());
        let err = QrPayload::decode(&input).unwrap_err();
        assert!(matches!(err, QrPayloadError::Invalid(_)));
    }

    #[test]
    fn test_decode_rejects_unknown_qr_type() {
        let input = format!(r#"{{"eventId": "{}", "qrType": "payment"}}"#, Uuid::new_v4());
        let err = QrPayload::decode(&input).unwrap_err();
        assert!(matches!(err, QrPayloadError::Invalid(_)));
    }

    #[test]
    fn test_decode_rejects_bad_event_uuid() {
        let err = QrPayload::decode(r#"{"eventId": "evt-1", "qrType": "checkin"}"#).unwrap_err();
        assert!(matches!(err, QrPayloadError::Invalid(_)));
    }

    #[test]
    fn test_decode_rejects_bad_registration_uuid() {
        let input = format!(
            r#"{{"eventId": "{}", "qrType": "checkin", "registrationId": "reg-42"}}"#,
            Uuid::new_v4()
        );
        let err = QrPayload::decode(&input).unwrap_err();
        assert!(matches!(err, QrPayloadError::Invalid(_)));
    }

    #[test]
    fn test_decode_accepts_missing_optional_fields() {
        let input = format!(
            r#"{{"eventId": "{}", "qrType": "feedback"}}"#,
            Uuid::new_v4()
        );
        let decoded = QrPayload::decode(&input).unwrap();
        assert!(decoded.organizer_id.is_none());
        assert!(decoded.issued_at_ms.is_none());
    }

    #[test]
    fn test_scan_request_validation() {
        let request = ScanRequest {
            payload: String::new(),
        };
        assert!(request.validate().is_err());

        let request = ScanRequest {
            payload: "{}".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_scan_result_serialization() {
        assert_eq!(
            serde_json::to_string(&ScanResult::AlreadyCheckedIn).unwrap(),
            "\"already_checked_in\""
        );
        assert_eq!(
            serde_json::to_string(&ScanResult::CheckedIn).unwrap(),
            "\"checked_in\""
        );
    }
}
