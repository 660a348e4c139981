//! Billing cycle date arithmetic.
//!
//! A card's cycle is anchored to a day of month (the statement day) and a
//! fixed offset in days from the statement date to the payment due date.
//! This module decides when a stored cycle has gone stale and computes the
//! statement/due pair that replaces it, relative to a supplied `today`.
//! Everything here is a pure function of its arguments; callers own the
//! clock.

use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::{Error, Result};

/// A freshly computed statement/due date pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextCycle {
    pub statement_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// A cycle is stale once `today` has moved strictly past its statement date.
/// The statement day itself still belongs to the active cycle.
pub fn is_stale(statement_date: NaiveDate, today: NaiveDate) -> bool {
    today > statement_date
}

/// Next occurrence of `statement_day` on or after `today`.
///
/// If today's day-of-month is already past `statement_day`, the occurrence
/// is in the following month (December wraps into January of the next
/// year); otherwise it is in the current month.
///
/// When the target month has no such day (the 30th in February, say), the
/// result is the 1st of the month after `today`, not the last valid day of
/// the target month.
pub fn next_statement_date(statement_day: u32, today: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = if today.day() > statement_day {
        month_after(today.year(), today.month())
    } else {
        (today.year(), today.month())
    };

    match NaiveDate::from_ymd_opt(year, month, statement_day) {
        Some(date) => Ok(date),
        None => {
            let (year, month) = month_after(today.year(), today.month());
            NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| Error::Validation("Statement date out of calendar range".into()))
        }
    }
}

/// Compute the cycle that replaces a stale one: the next statement date per
/// [`next_statement_date`], plus a due date `payment_offset_days` calendar
/// days later.
pub fn next_cycle(
    statement_day: u32,
    payment_offset_days: i64,
    today: NaiveDate,
) -> Result<NextCycle> {
    let statement_date = next_statement_date(statement_day, today)?;
    let due_date = statement_date
        .checked_add_signed(Duration::days(payment_offset_days))
        .ok_or_else(|| Error::Validation("Due date out of calendar range".into()))?;
    Ok(NextCycle {
        statement_date,
        due_date,
    })
}

fn month_after(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Strict `YYYY-MM-DD` parse for dates arriving as user-typed text.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::Validation("Invalid date format".into()))
}

/// The ordering invariant every stored cycle satisfies.
pub fn validate_date_order(statement_date: NaiveDate, due_date: NaiveDate) -> Result<()> {
    if due_date < statement_date {
        return Err(Error::Validation(
            "Due date cannot be earlier than statement date".into(),
        ));
    }
    Ok(())
}

/// Parse a statement/due date pair and enforce their ordering.
pub fn validate_dates(statement_date: &str, due_date: &str) -> Result<(NaiveDate, NaiveDate)> {
    let statement = parse_date(statement_date)?;
    let due = parse_date(due_date)?;
    validate_date_order(statement, due)?;
    Ok((statement, due))
}

#[cfg(test)]
mod tests;
