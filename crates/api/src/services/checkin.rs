//! Check-in recorder.
//!
//! The sole authority for creating check-in records, whether invoked via a
//! QR scan or the manual roster action. A registration moves from
//! not-checked-in to checked-in exactly once; there is no reverse
//! transition.

use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use domain::models::{CheckinMethod, CheckinOutcome, CheckinRecord};
use persistence::repositories::{CheckinRepository, RegistrationRepository};

use crate::error::ApiError;
use crate::middleware::metrics::{record_checkin_recorded, record_duplicate_checkin};
use crate::services::checkin_feed::CheckinFeed;

/// Failures of a check-in attempt.
///
/// A repeated check-in is NOT a failure; it surfaces as
/// [`CheckinOutcome::AlreadyCheckedIn`].
#[derive(Debug, Error)]
pub enum CheckinError {
    /// No active registration matches `(event_id, registration_id)`.
    #[error("No active registration found for this event")]
    RegistrationNotFound,

    /// The store failed; the registration's check-in state is unchanged and
    /// the attempt is safe to retry.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl From<CheckinError> for ApiError {
    fn from(err: CheckinError) -> Self {
        match err {
            CheckinError::RegistrationNotFound => ApiError::NotFound(err.to_string()),
            CheckinError::Store(e) => e.into(),
        }
    }
}

/// Records check-ins against the store and publishes them on the live feed.
#[derive(Clone)]
pub struct CheckinRecorder {
    registrations: RegistrationRepository,
    checkins: CheckinRepository,
    feed: Arc<CheckinFeed>,
}

impl CheckinRecorder {
    /// Creates a recorder over the given pool and live feed.
    pub fn new(pool: PgPool, feed: Arc<CheckinFeed>) -> Self {
        Self {
            registrations: RegistrationRepository::new(pool.clone()),
            checkins: CheckinRepository::new(pool),
            feed,
        }
    }

    /// Checks a registration in.
    ///
    /// 1. The registration must exist for the event with `active` status.
    /// 2. The insert goes through the store's uniqueness constraint on
    ///    `registration_id`; losing that race (or re-scanning a badge)
    ///    yields the existing record as `AlreadyCheckedIn`.
    /// 3. A created record is published on the live feed.
    pub async fn record_checkin(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
        scanner_user_id: Uuid,
        method: CheckinMethod,
    ) -> Result<CheckinOutcome, CheckinError> {
        let registration = self
            .registrations
            .find_active(event_id, registration_id)
            .await?
            .ok_or(CheckinError::RegistrationNotFound)?;

        let inserted = self
            .checkins
            .insert_once(
                event_id,
                registration_id,
                registration.participant_id,
                &registration.participant_name,
                &registration.participant_email,
                method.as_str(),
                scanner_user_id,
            )
            .await?;

        match inserted {
            Some(entity) => {
                let record: CheckinRecord = entity.into();
                self.feed.publish(&record);
                record_checkin_recorded(method.as_str());

                info!(
                    event_id = %event_id,
                    registration_id = %registration_id,
                    scanner_user_id = %scanner_user_id,
                    method = %method,
                    "Participant checked in"
                );

                Ok(CheckinOutcome::Created(record))
            }
            None => {
                // The constraint swallowed the insert: this registration is
                // already checked in. Fetch the existing record; it cannot
                // have been deleted (records are immutable).
                let existing = self
                    .checkins
                    .find_by_registration(registration_id)
                    .await?
                    .ok_or(CheckinError::Store(sqlx::Error::RowNotFound))?;

                record_duplicate_checkin();

                info!(
                    event_id = %event_id,
                    registration_id = %registration_id,
                    "Duplicate check-in attempt, returning existing record"
                );

                Ok(CheckinOutcome::AlreadyCheckedIn(existing.into()))
            }
        }
    }
}
