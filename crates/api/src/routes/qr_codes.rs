//! QR code generation endpoint handler.
//!
//! Returns the payload string for embedding in a QR image; rendering the
//! image itself is the client's job.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::models::qr_payload::{QrCodeRequest, QrCodeResponse};
use domain::models::{QrPayload, QrPurpose};
use persistence::repositories::{EventRepository, RegistrationRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StaffAuth;

/// Generate a QR payload for an event.
///
/// POST /api/v1/events/:event_id/qr-codes
///
/// Check-in codes are per-registration badge codes and require a
/// `registration_id`; info and feedback codes are event-level.
pub async fn create_qr_code(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    _staff: StaffAuth,
    Json(request): Json<QrCodeRequest>,
) -> Result<(StatusCode, Json<QrCodeResponse>), ApiError> {
    let event = EventRepository::new(state.pool.clone())
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let registration_id = match (request.purpose, request.registration_id) {
        (QrPurpose::Checkin, None) => {
            return Err(ApiError::Validation(
                "registration_id is required for check-in QR codes".to_string(),
            ));
        }
        (QrPurpose::Checkin, Some(registration_id)) => {
            // Badge codes are only issued for registrations that can
            // actually check in.
            RegistrationRepository::new(state.pool.clone())
                .find_active(event_id, registration_id)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound("No active registration found for this event".to_string())
                })?;
            Some(registration_id)
        }
        // Info and feedback codes are event-level.
        (_, _) => None,
    };

    let qr_data = QrPayload::encode(event_id, request.purpose, event.organizer_id, registration_id);

    let base = state.config.server.public_url.trim_end_matches('/');
    let scan_url = format!("{base}/api/v1/events/{event_id}/scans");

    info!(
        event_id = %event_id,
        purpose = %request.purpose,
        "QR code generated"
    );

    Ok((StatusCode::CREATED, Json(QrCodeResponse { qr_data, scan_url })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_code_request_deserialization() {
        let json = format!(
            r#"{{"purpose": "checkin", "registration_id": "{}"}}"#,
            Uuid::new_v4()
        );
        let request: QrCodeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.purpose, QrPurpose::Checkin);
        assert!(request.registration_id.is_some());
    }

    #[test]
    fn test_qr_code_request_event_level() {
        let request: QrCodeRequest = serde_json::from_str(r#"{"purpose": "info"}"#).unwrap();
        assert_eq!(request.purpose, QrPurpose::Info);
        assert!(request.registration_id.is_none());
    }
}
