// SPDX-License-Identifier: MIT

//! API routes for authenticated members.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{ChallengeParticipant, RankedParticipant};
use crate::services::checkin::{CheckinRequest, CheckinValidator};
use crate::services::membership::{membership_view, MembershipView};
use crate::services::ranking::{rank_participants, split_podium};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/checkin", post(validate_checkin))
        .route("/api/ranking", get(get_ranking))
        .route("/api/ranking/join", post(join_challenge))
        .route("/api/membership", get(get_membership))
}

// ─── Check-in Validation ─────────────────────────────────────

/// Check-in validation response.
#[derive(Serialize)]
pub struct CheckinResponse {
    pub success: bool,
    pub message: String,
}

/// Validate a submitted check-in code against today's sessions, the
/// grace deadline, and the venue geofence.
async fn validate_checkin(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<CheckinResponse>> {
    tracing::debug!(user_id = %user.user_id, "Check-in validation attempt");

    let validator = CheckinValidator::new(state.db.clone());
    let message = validator
        .validate(&user.user_id, payload, chrono::Utc::now())
        .await?;

    Ok(Json(CheckinResponse {
        success: true,
        message,
    }))
}

// ─── Challenge Ranking ───────────────────────────────────────

#[derive(Serialize)]
pub struct ChallengeInfo {
    pub id: String,
    pub name: String,
    pub ends_at: String,
    pub active: bool,
}

/// Full ranking view: podium, remaining positions, and the caller's own
/// entry when participating.
#[derive(Serialize)]
pub struct RankingResponse {
    pub challenge: Option<ChallengeInfo>,
    pub podium: Vec<RankedParticipant>,
    pub others: Vec<RankedParticipant>,
    pub me: Option<RankedParticipant>,
}

/// Get the ranking of the active challenge, falling back to the most
/// recently ended one for the historical podium.
async fn get_ranking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<RankingResponse>> {
    let challenge = match state.db.get_active_challenge().await? {
        Some(challenge) => Some(challenge),
        None => state.db.get_latest_ended_challenge().await?,
    };

    let Some(challenge) = challenge else {
        return Ok(Json(RankingResponse {
            challenge: None,
            podium: vec![],
            others: vec![],
            me: None,
        }));
    };

    let participants = state.db.get_participants(&challenge.id).await?;
    tracing::debug!(
        challenge_id = %challenge.id,
        participants = participants.len(),
        "Computing ranking"
    );

    let ranked = rank_participants(participants);
    let me = ranked.iter().find(|r| r.user_id == user.user_id).cloned();
    let (podium, others) = split_podium(&ranked);

    Ok(Json(RankingResponse {
        challenge: Some(ChallengeInfo {
            id: challenge.id,
            name: challenge.name,
            ends_at: challenge.ends_at,
            active: challenge.active,
        }),
        podium: podium.to_vec(),
        others: others.to_vec(),
        me,
    }))
}

/// Response for joining a challenge.
#[derive(Serialize)]
pub struct JoinChallengeResponse {
    pub challenge_id: String,
    /// False when the caller was already participating
    pub joined: bool,
}

/// Opt into the active challenge with a zeroed check-in counter.
async fn join_challenge(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<JoinChallengeResponse>> {
    let challenge = state
        .db
        .get_active_challenge()
        .await?
        .ok_or_else(|| crate::error::AppError::NotFound("No active challenge".to_string()))?;

    // Denormalize name and avatar for the ranking list
    let member = state.db.get_member(&user.user_id).await?;
    let (display_name, avatar_url) = match member {
        Some(m) => (m.display_name, m.avatar_url),
        None => ("Member".to_string(), None),
    };

    let participant = ChallengeParticipant {
        challenge_id: challenge.id.clone(),
        user_id: user.user_id.clone(),
        display_name,
        avatar_url,
        checkins: 0,
    };

    let joined = state.db.create_participant_if_absent(&participant).await?;
    if joined {
        tracing::info!(
            user_id = %user.user_id,
            challenge_id = %challenge.id,
            "User joined challenge"
        );
    }

    Ok(Json(JoinChallengeResponse {
        challenge_id: challenge.id,
        joined,
    }))
}

// ─── Membership Cycle ────────────────────────────────────────

/// Get the caller's next payment due date and prompt flag.
async fn get_membership(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MembershipView>> {
    let member = state.db.get_member(&user.user_id).await?.ok_or_else(|| {
        crate::error::AppError::NotFound(format!("Member {} not found", user.user_id))
    })?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(membership_view(&member, today)))
}
