//! Check-in endpoint handlers.
//!
//! The manual path and the scan path share the same recorder; only the
//! `checkin_method` tag differs.

use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    Json,
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::info;
use uuid::Uuid;

use domain::models::checkin::{
    CheckinRecordResponse, CheckinResponse, ListCheckinsQuery, ListCheckinsResponse,
};
use domain::models::{CheckinMethod, CheckinRecord};
use persistence::repositories::CheckinRepository;
use shared::pagination::{PageInfo, PageParams};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::StaffAuth;
use crate::services::CheckinRecorder;

/// Check a registration in from the roster view.
///
/// POST /api/v1/events/:event_id/registrations/:registration_id/checkin
///
/// Responds 201 with the created record, or 200 with the existing record
/// when the registration is already checked in (idempotent no-op).
pub async fn manual_checkin(
    State(state): State<AppState>,
    Path((event_id, registration_id)): Path<(Uuid, Uuid)>,
    staff: StaffAuth,
) -> Result<(StatusCode, Json<CheckinResponse>), ApiError> {
    let recorder = CheckinRecorder::new(state.pool.clone(), state.feed.clone());
    let outcome = recorder
        .record_checkin(event_id, registration_id, staff.staff_id, CheckinMethod::Manual)
        .await?;

    let status = if outcome.is_new() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.into())))
}

/// List an event's check-in records, newest first.
///
/// GET /api/v1/events/:event_id/checkins
pub async fn list_checkins(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    _staff: StaffAuth,
    Query(query): Query<ListCheckinsQuery>,
) -> Result<Json<ListCheckinsResponse>, ApiError> {
    let params = PageParams::clamped(query.page, query.per_page);

    let repo = CheckinRepository::new(state.pool.clone());
    let entities = repo
        .list_for_event(event_id, params.limit(), params.offset())
        .await?;
    let total = repo.count_for_event(event_id).await?;

    let checkins: Vec<CheckinRecordResponse> = entities
        .into_iter()
        .map(|e| CheckinRecord::from(e).into())
        .collect();

    Ok(Json(ListCheckinsResponse {
        checkins,
        pagination: PageInfo::new(params, total),
    }))
}

/// Live stream of an event's new check-ins as server-sent events.
///
/// GET /api/v1/events/:event_id/checkins/stream
///
/// Each created record arrives as a `checkin` event. A subscriber that
/// lags past the feed capacity is silently dropped from the broadcast and
/// should resync via the list endpoint.
pub async fn stream_checkins(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    _staff: StaffAuth,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    info!(event_id = %event_id, "Check-in stream subscriber attached");

    let rx = state.feed.subscribe(event_id);
    let stream = BroadcastStream::new(rx)
        .filter_map(|result| result.ok())
        .filter_map(|record| {
            SseEvent::default()
                .event("checkin")
                .json_data(CheckinRecordResponse::from(record))
                .ok()
        })
        .map(Ok::<_, Infallible>);

    Sse::new(stream).keep_alive(KeepAlive::default())
}
