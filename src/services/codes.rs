// SPDX-License-Identifier: MIT

//! Check-in code issuance.
//!
//! An external scheduler triggers a run every 5 minutes. Each of today's
//! sessions gets a one-time 5-character code once the clock reaches
//! "session end minus 5 minutes". Re-running is a no-op for sessions
//! that already carry a code.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::ClassSession;
use crate::time_utils::{format_day, format_utc_rfc3339};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Code length shown to members by the coach.
pub const CODE_LEN: usize = 5;
/// Codes become available this long before the session ends.
pub const ISSUE_LEAD_MINUTES: i64 = 5;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_CODE_ATTEMPTS: usize = 100;

/// Outcome of one issuance run.
#[derive(Debug, Default, Serialize)]
pub struct IssuanceSummary {
    /// Sessions scheduled today without a code yet
    pub eligible: usize,
    /// Codes written this run
    pub issued: usize,
    /// Per-session write failures (logged, run continues)
    pub failed: usize,
}

/// Whether `now` has reached the issuance threshold for a session ending
/// at `end`: end minus [`ISSUE_LEAD_MINUTES`].
pub fn issue_threshold_reached(end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= end - Duration::minutes(ISSUE_LEAD_MINUTES)
}

/// Generate a code not present in `taken`.
///
/// Codes are unique among a day's sessions so a submitted code matches
/// at most one session. The charset keeps ~60M combinations, so a
/// handful of sessions per day never exhausts the retry budget.
pub fn generate_unique_code<R: Rng>(rng: &mut R, taken: &HashSet<String>) -> Option<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code: String = (0..CODE_LEN)
            .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
            .collect();
        if !taken.contains(&code) {
            return Some(code);
        }
    }
    None
}

/// Run one issuance pass over today's sessions.
///
/// Idempotent: sessions already carrying a code are skipped by the
/// null-code filter, and sessions before their threshold are left for a
/// later run. Writes are per-session; one failure does not abort the
/// rest of the batch.
pub async fn run_code_issuance(
    db: &FirestoreDb,
    now: DateTime<Utc>,
) -> Result<IssuanceSummary, AppError> {
    let today = format_day(now.date_naive());
    let sessions = db.get_sessions_for_day(&today).await?;

    // Codes already issued today; new codes must not collide with them.
    let mut taken: HashSet<String> = sessions
        .iter()
        .filter_map(|s| s.checkin_code.clone())
        .collect();

    let uncoded: Vec<ClassSession> = sessions
        .into_iter()
        .filter(|s| s.checkin_code.is_none())
        .collect();

    let mut summary = IssuanceSummary {
        eligible: uncoded.len(),
        ..Default::default()
    };

    for mut session in uncoded {
        let Some(end) = session.end_instant() else {
            tracing::warn!(
                session_id = %session.id,
                date = %session.date,
                end_time = %session.end_time,
                "Skipping session with malformed schedule"
            );
            continue;
        };

        if !issue_threshold_reached(end, now) {
            continue;
        }

        // ThreadRng is !Send; keep it scoped so it is dropped before the
        // write below is awaited and the handler future stays Send.
        let generated = {
            let mut rng = rand::thread_rng();
            generate_unique_code(&mut rng, &taken)
        };
        let Some(code) = generated else {
            tracing::error!(session_id = %session.id, "Could not generate a unique code");
            summary.failed += 1;
            continue;
        };

        session.checkin_code = Some(code.clone());
        session.code_issued_at = Some(format_utc_rfc3339(now));

        match db.set_session_code(&session).await {
            Ok(()) => {
                tracing::info!(session_id = %session.id, code = %code, "Check-in code issued");
                taken.insert(code);
                summary.issued += 1;
            }
            Err(e) => {
                tracing::error!(session_id = %session.id, error = %e, "Failed to write code");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
