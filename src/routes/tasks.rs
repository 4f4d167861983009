// SPDX-License-Identifier: MIT

//! Task handler routes for Cloud Scheduler callbacks.
//!
//! These endpoints are invoked on a fixed schedule, not by users. Cloud
//! Run strips the scheduler headers from external requests, so their
//! presence guarantees internal origin; the job name is checked to make
//! sure each endpoint only serves its own schedule.

use crate::config::{ISSUE_CODES_JOB_NAME, SUSPEND_OVERDUE_JOB_NAME};
use crate::services::{run_code_issuance, run_suspension_scan};
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

const SCHEDULER_JOB_HEADER: &str = "x-cloudscheduler-jobname";

/// Task handler routes (called by Cloud Scheduler).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks/issue-codes", post(issue_codes))
        .route("/tasks/suspend-overdue", post(suspend_overdue))
}

/// Check the scheduler job header against the expected job name.
fn is_expected_job(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(SCHEDULER_JOB_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|name| name == expected)
        .unwrap_or(false)
}

/// Issue check-in codes for today's sessions nearing their end.
///
/// Runs every 5 minutes; idempotent for already-coded sessions.
async fn issue_codes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !is_expected_job(&headers, ISSUE_CODES_JOB_NAME) {
        tracing::warn!("Blocked unauthorized access to issue_codes");
        return Err(StatusCode::FORBIDDEN);
    }

    match run_code_issuance(&state.db, chrono::Utc::now()).await {
        Ok(summary) => {
            tracing::info!(
                eligible = summary.eligible,
                issued = summary.issued,
                failed = summary.failed,
                "Code issuance run complete"
            );
            Ok(Json(serde_json::json!(summary)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Code issuance run failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Suspend approved members whose payment is past due.
async fn suspend_overdue(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if !is_expected_job(&headers, SUSPEND_OVERDUE_JOB_NAME) {
        tracing::warn!("Blocked unauthorized access to suspend_overdue");
        return Err(StatusCode::FORBIDDEN);
    }

    let today = chrono::Utc::now().date_naive();
    match run_suspension_scan(&state.db, today).await {
        Ok(summary) => {
            tracing::info!(
                scanned = summary.scanned,
                suspended = summary.suspended,
                failed = summary.failed,
                "Suspension scan complete"
            );
            Ok(Json(serde_json::json!(summary)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Suspension scan failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
