// SPDX-License-Identifier: MIT

//! Challenge and participant models.

use serde::{Deserialize, Serialize};

/// A time-boxed competition where participants accumulate check-ins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    /// Challenge ID (also used as document ID)
    pub id: String,
    /// Display name
    pub name: String,
    /// When the challenge ends (RFC3339)
    pub ends_at: String,
    /// Whether the challenge is currently running
    pub active: bool,
}

/// A user enrolled in a challenge.
///
/// `checkins` is the authoritative count used for ranking. It only
/// increases while the challenge is active; the record persists after
/// the challenge ends for the historical podium.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeParticipant {
    /// Challenge ID
    pub challenge_id: String,
    /// User ID
    pub user_id: String,
    /// Display name (denormalized for the ranking list)
    pub display_name: String,
    /// Avatar URL (denormalized)
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Validated check-in count
    #[serde(default)]
    pub checkins: u32,
}

impl ChallengeParticipant {
    /// Document ID: one participant record per (challenge, user).
    pub fn doc_id(challenge_id: &str, user_id: &str) -> String {
        format!("{}_{}", challenge_id, user_id)
    }
}

/// A participant with its computed competition rank. Derived on every
/// ranking request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RankedParticipant {
    pub user_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub checkins: u32,
    /// 1-based competition rank (ties share a rank, next distinct count
    /// takes its 1-based position)
    pub rank: u32,
}
