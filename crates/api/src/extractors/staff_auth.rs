//! Staff identity extractor.
//!
//! Authentication itself is handled by the upstream gateway (an external
//! collaborator); the gateway forwards the authenticated staff account id
//! in the `X-Staff-Id` header. This extractor is the data-contract seam:
//! it only requires the header to be present and a valid UUID.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated staff account id.
pub const STAFF_ID_HEADER: &str = "X-Staff-Id";

/// Identity of the staff member performing a check-in action.
#[derive(Debug, Clone, Copy)]
pub struct StaffAuth {
    /// Account id recorded as `scanner_user_id` on created check-ins.
    pub staff_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for StaffAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(STAFF_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-Staff-Id header".to_string()))?;

        let staff_id = Uuid::parse_str(raw)
            .map_err(|_| ApiError::Unauthorized("X-Staff-Id is not a valid UUID".to_string()))?;

        Ok(StaffAuth { staff_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<StaffAuth, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(STAFF_ID_HEADER, value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        StaffAuth::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_valid_staff_id() {
        let staff_id = Uuid::new_v4();
        let auth = extract(Some(&staff_id.to_string())).await.unwrap();
        assert_eq!(auth.staff_id, staff_id);
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_rejects_non_uuid_header() {
        let err = extract(Some("staff-42")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
