// SPDX-License-Identifier: MIT

//! Class session model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduled class session stored in Firestore.
///
/// Seats move between `capacity` and `enrolled`; their sum is fixed once
/// the session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSession {
    /// Session ID (also used as document ID)
    pub id: String,
    /// Calendar day (`YYYY-MM-DD`)
    pub date: String,
    /// Start of the time range (`HH:MM` wall clock)
    pub start_time: String,
    /// End of the time range (`HH:MM` wall clock)
    pub end_time: String,
    /// Class title (e.g. "CrossFit", "Mobility")
    pub title: String,
    /// Coach display name
    pub coach: String,
    /// Remaining seats
    pub capacity: u32,
    /// Enrolled user IDs (set semantics enforced by the store)
    #[serde(default)]
    pub enrolled: Vec<String>,
    /// One-time check-in code, set once by the issuance job
    #[serde(default)]
    pub checkin_code: Option<String>,
    /// When the code was issued (RFC3339)
    #[serde(default)]
    pub code_issued_at: Option<String>,
}

impl ClassSession {
    /// The session's end as a UTC instant, or `None` if the stored
    /// date/time strings are malformed.
    pub fn end_instant(&self) -> Option<DateTime<Utc>> {
        crate::time_utils::day_and_time_utc(&self.date, &self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(date: &str, end_time: &str) -> ClassSession {
        ClassSession {
            id: "s1".to_string(),
            date: date.to_string(),
            start_time: "17:00".to_string(),
            end_time: end_time.to_string(),
            title: "CrossFit".to_string(),
            coach: "Ana".to_string(),
            capacity: 12,
            enrolled: vec![],
            checkin_code: None,
            code_issued_at: None,
        }
    }

    #[test]
    fn test_end_instant() {
        let s = session("2026-03-09", "18:00");
        let end = s.end_instant().unwrap();
        assert_eq!(crate::time_utils::format_utc_rfc3339(end), "2026-03-09T18:00:00Z");
    }

    #[test]
    fn test_end_instant_malformed() {
        assert!(session("not-a-date", "18:00").end_instant().is_none());
        assert!(session("2026-03-09", "18h").end_instant().is_none());
    }
}
