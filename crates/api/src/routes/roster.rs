//! Roster endpoint handler.
//!
//! Returns an event's registrations joined with their check-in state. The
//! optional ticket-code filter is the staff fallback when a scan fails and
//! a participant must be resolved by hand.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use domain::models::registration::{RosterEntryResponse, RosterQuery, RosterResponse};
use domain::models::{CheckinMethod, PaymentStatus, RegistrationStatus};
use persistence::entities::RegistrationWithCheckinEntity;
use persistence::repositories::RegistrationRepository;
use shared::pagination::{PageInfo, PageParams};
use shared::validation::validate_ticket_code;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StaffAuth;

/// Roster view of an event.
///
/// GET /api/v1/events/:event_id/roster
pub async fn get_roster(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    _staff: StaffAuth,
    Query(query): Query<RosterQuery>,
) -> Result<Json<RosterResponse>, ApiError> {
    let repo = RegistrationRepository::new(state.pool.clone());

    if let Some(code) = &query.code {
        validate_ticket_code(code).map_err(|e| {
            ApiError::Validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid ticket code".to_string()),
            )
        })?;

        let entries: Vec<RosterEntryResponse> = repo
            .find_with_checkin_by_code(event_id, code)
            .await?
            .into_iter()
            .map(to_entry)
            .collect();
        let total = entries.len() as i64;

        return Ok(Json(RosterResponse {
            entries,
            pagination: PageInfo::new(PageParams::default(), total),
        }));
    }

    let params = PageParams::clamped(query.page, query.per_page);
    let entities = repo
        .list_with_checkin(event_id, params.limit(), params.offset())
        .await?;
    let total = repo.count_for_event(event_id).await?;

    Ok(Json(RosterResponse {
        entries: entities.into_iter().map(to_entry).collect(),
        pagination: PageInfo::new(params, total),
    }))
}

fn to_entry(entity: RegistrationWithCheckinEntity) -> RosterEntryResponse {
    RosterEntryResponse {
        registration_id: entity.id,
        participant_id: entity.participant_id,
        participant_name: entity.participant_name,
        participant_email: entity.participant_email,
        ticket_code: entity.ticket_code,
        status: RegistrationStatus::parse(&entity.status).unwrap_or(RegistrationStatus::Pending),
        payment_status: PaymentStatus::parse(&entity.payment_status)
            .unwrap_or(PaymentStatus::Pending),
        checked_in: entity.checked_in_at.is_some(),
        checked_in_at: entity.checked_in_at,
        checkin_method: entity
            .checkin_method
            .as_deref()
            .and_then(CheckinMethod::parse),
    }
}
