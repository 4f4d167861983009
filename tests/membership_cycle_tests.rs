// SPDX-License-Identifier: MIT

//! Membership cycle calculator properties.

use chrono::NaiveDate;
use gymbox_api::models::{Member, MemberStatus};
use gymbox_api::services::membership::{base_date, due_date, membership_view, show_payment_prompt};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn member(
    cycle_start: Option<&str>,
    last_payment: Option<&str>,
    enrolled: Option<&str>,
) -> Member {
    Member {
        id: "m1".to_string(),
        display_name: "Test Member".to_string(),
        avatar_url: None,
        status: MemberStatus::Approved,
        cycle_start_date: cycle_start.map(String::from),
        last_payment_date: last_payment.map(String::from),
        enrolled_date: enrolled.map(String::from),
    }
}

#[test]
fn test_due_date_is_one_calendar_month_out() {
    // Jan 15 -> Feb 15
    assert_eq!(due_date(day("2026-01-15")), Some(day("2026-02-15")));
    // Across a year boundary
    assert_eq!(due_date(day("2025-12-10")), Some(day("2026-01-10")));
}

#[test]
fn test_due_date_month_end_rollover_is_clamped() {
    // chrono's checked_add_months clamps to the last day of the target
    // month; asserted as the documented library behavior.
    assert_eq!(due_date(day("2026-01-31")), Some(day("2026-02-28")));
    assert_eq!(due_date(day("2024-01-31")), Some(day("2024-02-29"))); // leap year
    assert_eq!(due_date(day("2026-03-31")), Some(day("2026-04-30")));
}

#[test]
fn test_prompt_shown_iff_days_until_grace_end_in_0_to_5() {
    let due = day("2026-02-15"); // grace end = Feb 16
    for (today, expected) in [
        ("2026-02-09", false), // 7 days out
        ("2026-02-10", false), // 6 days out
        ("2026-02-11", true),  // 5
        ("2026-02-13", true),  // 3
        ("2026-02-15", true),  // 1 (due date)
        ("2026-02-16", true),  // 0 (grace day)
        ("2026-02-17", false), // -1
    ] {
        assert_eq!(
            show_payment_prompt(due, day(today)),
            expected,
            "today = {}",
            today
        );
    }
}

#[test]
fn test_base_date_prefers_cycle_start_then_payment_then_enrollment() {
    let all = member(Some("2026-02-01"), Some("2026-01-20"), Some("2025-11-05"));
    assert_eq!(base_date(&all), Some(day("2026-02-01")));

    let no_cycle = member(None, Some("2026-01-20"), Some("2025-11-05"));
    assert_eq!(base_date(&no_cycle), Some(day("2026-01-20")));

    let enrollment_only = member(None, None, Some("2025-11-05"));
    assert_eq!(base_date(&enrollment_only), Some(day("2025-11-05")));
}

#[test]
fn test_base_date_falls_through_past_malformed_fields() {
    let bad_cycle_start = member(Some("20/01/2026"), Some("2026-01-20"), Some("2025-11-05"));
    assert_eq!(base_date(&bad_cycle_start), Some(day("2026-01-20")));
}

#[test]
fn test_view_without_any_base_date_is_unknown() {
    let view = membership_view(&member(None, None, None), day("2026-02-01"));
    assert!(view.due_date.is_none());
    assert!(!view.show_payment_prompt);
}

#[test]
fn test_view_combines_due_date_and_prompt() {
    let m = member(None, Some("2026-01-15"), None); // due Feb 15
    let view = membership_view(&m, day("2026-02-14"));
    assert_eq!(view.due_date.as_deref(), Some("2026-02-15"));
    assert!(view.show_payment_prompt);

    let early = membership_view(&m, day("2026-01-20"));
    assert!(!early.show_payment_prompt);
}
