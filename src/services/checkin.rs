// SPDX-License-Identifier: MIT

//! Check-in validation.
//!
//! A member submits the code announced at the end of class together with
//! their device location. Validation checks, in order: code match for
//! today, the 30-minute grace deadline, the venue geofence, and the
//! one-check-in-per-day uniqueness constraint. Every failure is terminal
//! for the call and surfaced as its own error kind.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{ValidatedCheckin, VenueLocation};
use crate::time_utils::{format_day, format_utc_rfc3339};
use chrono::{DateTime, Duration, Utc};
use geo::{point, Distance, Haversine};
use serde::{Deserialize, Serialize};

/// Members may validate up to this long after the session ends.
pub const GRACE_MINUTES: i64 = 30;
/// Maximum distance from the venue, in meters.
pub const MAX_DISTANCE_METERS: f64 = 200.0;

/// Device-reported coordinates.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Check-in validation request body. Both fields are required; they are
/// optional here so missing input maps to `InvalidArgument` rather than
/// a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    pub code: Option<String>,
    pub location: Option<Location>,
}

/// Last validation instant for a session ending at `end`.
pub fn checkin_deadline(end: DateTime<Utc>) -> DateTime<Utc> {
    end + Duration::minutes(GRACE_MINUTES)
}

/// Great-circle distance between a device location and the venue.
pub fn distance_to_venue_meters(location: Location, venue: VenueLocation) -> f64 {
    let device = point!(x: location.longitude, y: location.latitude);
    let venue = point!(x: venue.longitude, y: venue.latitude);
    Haversine.distance(device, venue)
}

/// Validates and records check-ins.
pub struct CheckinValidator {
    db: FirestoreDb,
}

impl CheckinValidator {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Validate a check-in attempt for the authenticated `user_id`.
    ///
    /// Returns the success message; every failure kind maps to a
    /// distinct [`AppError`] variant so the client can show a specific
    /// message.
    pub async fn validate(
        &self,
        user_id: &str,
        request: CheckinRequest,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let code = request
            .code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::InvalidArgument("Code and location are required".to_string())
            })?
            .to_uppercase();

        let location = request.location.ok_or_else(|| {
            AppError::InvalidArgument("Code and location are required".to_string())
        })?;

        let today = format_day(now.date_naive());

        // 1. Match the code against today's sessions
        let session = self
            .db
            .find_session_by_code(&today, &code)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid or expired code".to_string()))?;

        // 2. Enforce the grace deadline
        let end = session.end_instant().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Session {} has a malformed schedule",
                session.id
            ))
        })?;
        if now > checkin_deadline(end) {
            return Err(AppError::DeadlineExceeded(
                "The validation window for this session has closed".to_string(),
            ));
        }

        // 3. Geofence against the configured venue location
        let venue = self.db.get_venue_location().await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Venue location is not configured"))
        })?;

        let distance = distance_to_venue_meters(location, venue);
        if distance > MAX_DISTANCE_METERS {
            tracing::debug!(user_id, distance_m = distance, "Check-in outside geofence");
            return Err(AppError::PermissionDenied(
                "You are too far away. Move closer to the gym to validate".to_string(),
            ));
        }

        // 4. Record, atomically refusing a second check-in today
        let challenge_id = self
            .db
            .get_active_challenge()
            .await?
            .map(|challenge| challenge.id);

        let checkin = ValidatedCheckin {
            user_id: user_id.to_string(),
            challenge_id,
            date: today,
            session_id: session.id.clone(),
            created_at: format_utc_rfc3339(now),
        };

        let created = self.db.create_checkin_if_absent(&checkin).await?;
        if !created {
            return Err(AppError::AlreadyExists(
                "You already validated a check-in today".to_string(),
            ));
        }

        Ok("Check-in validated successfully".to_string())
    }
}
