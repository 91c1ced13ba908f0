//! Scan endpoint handler.
//!
//! Camera frames are decoded by the scanning client; the resulting payload
//! string lands here. The URL path carries the event the scanning device is
//! operating in, which becomes the expected event id for routing — a
//! payload for any other event is rejected before any handler runs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::qr_payload::{QrPayload, QrPayloadError, ScanRequest, ScanResponse, ScanResult};
use domain::models::{CheckinMethod, Event};
use domain::services::{route_scan, ScanError, ScanRoute};
use persistence::repositories::EventRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StaffAuth;
use crate::middleware::metrics::record_scan_rejected;
use crate::services::CheckinRecorder;

/// Process a scanned QR payload.
///
/// POST /api/v1/events/:event_id/scans
///
/// Responds 201 for a new check-in, 200 for every other accepted outcome
/// (duplicate check-in, info, feedback). Failures are transient for the
/// scanning operator: the scanner keeps running and the next frame retries.
pub async fn process_scan(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    staff: StaffAuth,
    Json(request): Json<ScanRequest>,
) -> Result<(StatusCode, Json<ScanResponse>), ApiError> {
    request.validate()?;

    if request.payload.len() > state.config.limits.max_payload_bytes {
        record_scan_rejected("oversized_payload");
        return Err(ApiError::Validation(
            "Scanned payload is too large".to_string(),
        ));
    }

    let payload = QrPayload::decode(&request.payload).map_err(|e| {
        record_scan_rejected(match &e {
            QrPayloadError::Malformed(_) => "malformed_payload",
            QrPayloadError::Invalid(_) => "invalid_payload",
        });
        ApiError::Validation(format!("Failed to process QR code: {e}"))
    })?;

    let route = route_scan(&payload, Some(event_id)).map_err(|e| match e {
        ScanError::EventMismatch { .. } => {
            record_scan_rejected("event_mismatch");
            ApiError::Conflict(e.to_string())
        }
        ScanError::MissingRegistration => {
            record_scan_rejected("missing_registration");
            ApiError::Validation(e.to_string())
        }
    })?;

    match route {
        ScanRoute::Checkin { registration_id } => {
            let recorder = CheckinRecorder::new(state.pool.clone(), state.feed.clone());
            let outcome = recorder
                .record_checkin(event_id, registration_id, staff.staff_id, CheckinMethod::QrScan)
                .await?;

            let (status, result) = if outcome.is_new() {
                (StatusCode::CREATED, ScanResult::CheckedIn)
            } else {
                (StatusCode::OK, ScanResult::AlreadyCheckedIn)
            };
            let record = outcome.record().clone();

            Ok((
                status,
                Json(ScanResponse {
                    result,
                    checkin: Some(record.into()),
                    event: None,
                }),
            ))
        }
        ScanRoute::Info => {
            let event = EventRepository::new(state.pool.clone())
                .find_by_id(event_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
            let event: Event = event.into();

            info!(event_id = %event_id, "Info QR scanned");

            Ok((
                StatusCode::OK,
                Json(ScanResponse {
                    result: ScanResult::Info,
                    checkin: None,
                    event: Some(event.into()),
                }),
            ))
        }
        ScanRoute::Feedback => {
            // The feedback collector is not implemented upstream; the scan
            // is acknowledged and dropped.
            info!(event_id = %event_id, "Feedback QR scanned");

            Ok((
                StatusCode::OK,
                Json(ScanResponse {
                    result: ScanResult::FeedbackReceived,
                    checkin: None,
                    event: None,
                }),
            ))
        }
    }
}
