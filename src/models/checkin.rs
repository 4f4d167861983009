// SPDX-License-Identifier: MIT

//! Validated check-in model.

use serde::{Deserialize, Serialize};

/// A validated check-in: proof a member attended a session on a given day.
///
/// Stored in Firestore keyed by [`ValidatedCheckin::doc_id`], which gives
/// the (user, day) uniqueness constraint for free: the conditional create
/// in the db layer refuses to overwrite an existing document.
///
/// Created exactly once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedCheckin {
    /// Owning user ID
    pub user_id: String,
    /// Challenge this check-in counts toward, if one was active
    #[serde(default)]
    pub challenge_id: Option<String>,
    /// Calendar day (`YYYY-MM-DD`)
    pub date: String,
    /// Session the submitted code belonged to
    pub session_id: String,
    /// Server-assigned creation timestamp (RFC3339)
    pub created_at: String,
}

impl ValidatedCheckin {
    /// Document ID enforcing at most one check-in per user per day.
    pub fn doc_id(user_id: &str, date: &str) -> String {
        format!("{}_{}", user_id, date)
    }
}
