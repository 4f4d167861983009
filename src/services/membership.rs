// SPDX-License-Identifier: MIT

//! Membership payment cycle calculation and the overdue suspension scan.
//!
//! The cycle calculator is pure; "no usable base date" is a defined
//! output (`None`), not an error. The suspension scan is the batch
//! collaborator that acts on the computed due dates.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Member, MemberStatus};
use crate::time_utils::parse_day;
use chrono::{Months, NaiveDate};
use futures_util::{stream, StreamExt};
use serde::Serialize;

/// Days before the end of the grace day during which the payment prompt
/// shows (inclusive).
const PROMPT_WINDOW_DAYS: i64 = 5;
/// Concurrency cap for suspension writes, to avoid overloading Firestore.
const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Computed payment cycle state for one member.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipView {
    /// Next payment due date (`YYYY-MM-DD`), if a base date exists
    pub due_date: Option<String>,
    /// Whether the client should surface the payment prompt
    pub show_payment_prompt: bool,
}

/// Pick the cycle base date by specificity: explicit cycle start, then
/// last payment, then enrollment. A malformed value is skipped so one
/// bad field never erases a computable due date; `None` only when no
/// field parses.
pub fn base_date(member: &Member) -> Option<NaiveDate> {
    member
        .cycle_start_date
        .as_deref()
        .and_then(parse_day)
        .or_else(|| member.last_payment_date.as_deref().and_then(parse_day))
        .or_else(|| member.enrolled_date.as_deref().and_then(parse_day))
}

/// Next due date: base date plus one calendar month.
///
/// chrono's `checked_add_months` clamps to the end of the target month
/// (Jan 31 -> Feb 28/29); that library behavior is accepted as-is.
pub fn due_date(base: NaiveDate) -> Option<NaiveDate> {
    base.checked_add_months(Months::new(1))
}

/// Whether the payment prompt should show on `today`.
///
/// The prompt window runs up to one day past the due date: it shows iff
/// days remaining until (due + 1 day) is in [0, 5].
pub fn show_payment_prompt(due: NaiveDate, today: NaiveDate) -> bool {
    let grace_end = due + chrono::Duration::days(1);
    let remaining = grace_end.signed_duration_since(today).num_days();
    (0..=PROMPT_WINDOW_DAYS).contains(&remaining)
}

/// Compute the membership cycle view for a member as of `today`.
pub fn membership_view(member: &Member, today: NaiveDate) -> MembershipView {
    let due = base_date(member).and_then(due_date);
    MembershipView {
        due_date: due.map(crate::time_utils::format_day),
        show_payment_prompt: due.map(|d| show_payment_prompt(d, today)).unwrap_or(false),
    }
}

/// Whether a member's payment is overdue as of `today`.
pub fn is_overdue(member: &Member, today: NaiveDate) -> bool {
    match base_date(member).and_then(due_date) {
        Some(due) => today > due,
        // Without a base date there is no due date to be past.
        None => false,
    }
}

/// Outcome of one suspension scan run.
#[derive(Debug, Default, Serialize)]
pub struct SuspensionSummary {
    pub scanned: usize,
    pub suspended: usize,
    pub failed: usize,
}

/// Scan approved members and suspend those past their due date.
///
/// Writes are per-member: one failed update is logged and counted, and
/// the scan moves on to the rest.
pub async fn run_suspension_scan(
    db: &FirestoreDb,
    today: NaiveDate,
) -> Result<SuspensionSummary, AppError> {
    let members = db.get_approved_members().await?;
    let mut summary = SuspensionSummary {
        scanned: members.len(),
        ..Default::default()
    };

    let overdue: Vec<Member> = members
        .into_iter()
        .filter(|m| is_overdue(m, today))
        .collect();

    // Per-member writes with bounded concurrency; one failure is logged
    // and does not abort the rest of the scan.
    let results: Vec<bool> = stream::iter(overdue)
        .map(|mut member| async move {
            member.status = MemberStatus::Suspended;
            match db.set_member_status(&member).await {
                Ok(()) => {
                    tracing::info!(member_id = %member.id, "Member suspended (payment overdue)");
                    true
                }
                Err(e) => {
                    tracing::error!(member_id = %member.id, error = %e, "Failed to suspend member");
                    false
                }
            }
        })
        .buffer_unordered(MAX_CONCURRENT_DB_OPS)
        .collect()
        .await;

    summary.suspended = results.iter().filter(|ok| **ok).count();
    summary.failed = results.iter().filter(|ok| !**ok).count();

    Ok(summary)
}
