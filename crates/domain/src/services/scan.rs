//! Scan routing.
//!
//! Sends a decoded, validated payload to the correct handler by purpose.
//! Routing is pure: the caller executes the returned route (check-in
//! recorder, event info lookup, or the feedback no-op).

use thiserror::Error;
use uuid::Uuid;

use crate::models::qr_payload::{QrPayload, QrPurpose};

/// Where a scanned payload should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanRoute {
    /// Record a check-in for this registration.
    Checkin { registration_id: Uuid },
    /// Show event information to the scanning user.
    Info,
    /// Collect feedback. The upstream collector is not implemented; callers
    /// treat this as an accepted no-op.
    Feedback,
}

/// Rejection reasons raised before any handler runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The payload belongs to a different event than the scanning device's
    /// current context. Prevents cross-event check-in.
    #[error("QR code belongs to a different event")]
    EventMismatch { expected: Uuid, actual: Uuid },

    /// A check-in payload must identify one specific registration.
    #[error("check-in QR code does not identify a registration")]
    MissingRegistration,
}

/// Routes a payload to its handler.
///
/// `expected_event_id` is the event context the scanning device is
/// operating in, passed explicitly by the caller. When supplied, a payload
/// for any other event is rejected before dispatch.
pub fn route_scan(
    payload: &QrPayload,
    expected_event_id: Option<Uuid>,
) -> Result<ScanRoute, ScanError> {
    if let Some(expected) = expected_event_id {
        if expected != payload.event_id {
            return Err(ScanError::EventMismatch {
                expected,
                actual: payload.event_id,
            });
        }
    }

    match payload.purpose {
        QrPurpose::Checkin => {
            let registration_id = payload
                .registration_id
                .ok_or(ScanError::MissingRegistration)?;
            Ok(ScanRoute::Checkin { registration_id })
        }
        QrPurpose::Info => Ok(ScanRoute::Info),
        QrPurpose::Feedback => Ok(ScanRoute::Feedback),
    }
}
