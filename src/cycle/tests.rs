#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::Error;

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ── Staleness ─────────────────────────────────────────────────

#[test]
fn test_stale_when_today_is_past_statement() {
    assert!(is_stale(d(2024, 1, 15), d(2024, 1, 16)));
    assert!(is_stale(d(2024, 1, 15), d(2024, 2, 20)));
}

#[test]
fn test_not_stale_on_statement_day_itself() {
    assert!(!is_stale(d(2024, 1, 15), d(2024, 1, 15)));
}

#[test]
fn test_not_stale_before_statement_day() {
    assert!(!is_stale(d(2024, 1, 15), d(2024, 1, 1)));
    assert!(!is_stale(d(2024, 1, 15), d(2023, 12, 31)));
}

// ── Next statement date ───────────────────────────────────────

#[test]
fn test_same_month_when_day_not_reached() {
    assert_eq!(next_statement_date(15, d(2024, 2, 10)).unwrap(), d(2024, 2, 15));
}

#[test]
fn test_same_month_on_the_day_itself() {
    assert_eq!(next_statement_date(15, d(2024, 2, 15)).unwrap(), d(2024, 2, 15));
}

#[test]
fn test_next_month_when_day_already_passed() {
    assert_eq!(next_statement_date(15, d(2024, 2, 20)).unwrap(), d(2024, 3, 15));
}

#[test]
fn test_december_wraps_to_january() {
    assert_eq!(next_statement_date(15, d(2024, 12, 20)).unwrap(), d(2025, 1, 15));
}

#[test]
fn test_first_of_month_on_new_years_eve() {
    assert_eq!(next_statement_date(1, d(2024, 12, 31)).unwrap(), d(2025, 1, 1));
}

#[test]
fn test_missing_day_falls_back_to_first_of_next_month() {
    // Day 30 does not exist in February.
    assert_eq!(next_statement_date(30, d(2024, 2, 10)).unwrap(), d(2024, 3, 1));
}

#[test]
fn test_missing_day_fallback_from_end_of_january() {
    // Jan 31 with a day-30 anchor targets Feb 30; fallback is Feb 1.
    assert_eq!(next_statement_date(30, d(2024, 1, 31)).unwrap(), d(2024, 2, 1));
}

#[test]
fn test_day_29_exists_in_leap_february() {
    assert_eq!(next_statement_date(29, d(2024, 2, 10)).unwrap(), d(2024, 2, 29));
}

#[test]
fn test_day_29_missing_in_common_february() {
    assert_eq!(next_statement_date(29, d(2023, 2, 10)).unwrap(), d(2023, 3, 1));
}

#[test]
fn test_day_31_missing_in_thirty_day_month() {
    assert_eq!(next_statement_date(31, d(2024, 4, 5)).unwrap(), d(2024, 5, 1));
}

#[test]
fn test_statement_date_out_of_calendar_range() {
    // The month after NaiveDate::MAX does not exist, and neither does its 1st.
    let today = NaiveDate::MAX;
    let err = next_statement_date(15, today).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.to_string(), "Statement date out of calendar range");
}

// ── Next cycle ────────────────────────────────────────────────

#[test]
fn test_next_cycle_applies_offset() {
    // Day-15 anchor with a 21-day offset, seen from Feb 20.
    let next = next_cycle(15, 21, d(2024, 2, 20)).unwrap();
    assert_eq!(next.statement_date, d(2024, 3, 15));
    assert_eq!(next.due_date, d(2024, 4, 5));
}

#[test]
fn test_next_cycle_zero_offset() {
    let next = next_cycle(15, 0, d(2024, 2, 20)).unwrap();
    assert_eq!(next.statement_date, next.due_date);
}

#[test]
fn test_next_cycle_through_fallback() {
    let next = next_cycle(30, 10, d(2024, 2, 10)).unwrap();
    assert_eq!(next.statement_date, d(2024, 3, 1));
    assert_eq!(next.due_date, d(2024, 3, 11));
}

#[test]
fn test_next_cycle_offset_spans_year_boundary() {
    let next = next_cycle(20, 21, d(2024, 12, 21)).unwrap();
    assert_eq!(next.statement_date, d(2025, 1, 20));
    assert_eq!(next.due_date, d(2025, 2, 10));
}

#[test]
fn test_due_date_out_of_calendar_range() {
    // MAX is the 31st, so a day-31 anchor resolves to MAX itself; any
    // positive offset then overflows.
    let today = NaiveDate::MAX;
    assert_eq!(next_statement_date(today.day(), today).unwrap(), today);
    let err = next_cycle(today.day(), 1, today).unwrap_err();
    assert_eq!(err.to_string(), "Due date out of calendar range");
}

// ── Date parsing and validation ───────────────────────────────

#[test]
fn test_parse_date_iso() {
    assert_eq!(parse_date("2024-01-15").unwrap(), d(2024, 1, 15));
}

#[test]
fn test_parse_date_rejects_other_formats() {
    for bad in ["15/01/2024", "2024-13-01", "yesterday", ""] {
        let err = parse_date(bad).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format", "input: {bad}");
    }
}

#[test]
fn test_validate_dates_ok() {
    let (statement, due) = validate_dates("2024-01-15", "2024-02-05").unwrap();
    assert_eq!(statement, d(2024, 1, 15));
    assert_eq!(due, d(2024, 2, 5));
}

#[test]
fn test_validate_dates_equal_is_ok() {
    let (statement, due) = validate_dates("2024-01-15", "2024-01-15").unwrap();
    assert_eq!(statement, due);
}

#[test]
fn test_validate_dates_rejects_due_before_statement() {
    let err = validate_dates("2024-02-05", "2024-01-15").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Due date cannot be earlier than statement date"
    );
}

#[test]
fn test_validate_dates_rejects_garbage() {
    assert!(validate_dates("soon", "2024-01-15").is_err());
    assert!(validate_dates("2024-01-15", "later").is_err());
}
