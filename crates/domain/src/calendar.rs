// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar helpers for day/month based dates.
//!
//! Abstraction windows are recorded as bare day/month pairs carried over from
//! legacy licence data. Those pairs are not always valid for every year (29
//! February, or a 31st in a 30-day month), so building a concrete date clamps
//! to the last day of the month instead of failing or rolling over.

use crate::error::DomainError;
use std::cmp::Ordering;
use time::{Date, Month};

/// Converts a 1-based month number into a `Month`.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonth` if `month` is outside 1..=12.
pub fn month_from_number(month: u8) -> Result<Month, DomainError> {
    Month::try_from(month).map_err(|_| DomainError::InvalidMonth { month })
}

/// Returns the number of days in `month` for `year`, accounting for leap years.
#[must_use]
pub const fn days_in_month(month: Month, year: i32) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if time::util::is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Builds a concrete date from a recurring day/month pair in the given year.
///
/// A day past the end of the month is clamped to the month's last day, so
/// `31/2` becomes 28 February (or 29 February in a leap year). A day of `0`
/// is treated as the 1st.
///
/// # Arguments
///
/// * `day` - Day of month
/// * `month` - 1-based month number
/// * `year` - Calendar year to anchor the date in
///
/// # Errors
///
/// Returns an error if:
/// - The month is outside 1..=12
/// - The year cannot be represented as a `time::Date`
pub fn build_date_from_day_month(day: u8, month: u8, year: i32) -> Result<Date, DomainError> {
    let month: Month = month_from_number(month)?;
    let last_day: u8 = days_in_month(month, year);
    let clamped_day: u8 = day.clamp(1, last_day);

    Date::from_calendar_date(year, month, clamped_day).map_err(|_| {
        DomainError::DateOutOfRange {
            operation: format!("building {clamped_day} {month} {year}"),
        }
    })
}

/// Compares two dates at day granularity.
#[must_use]
pub fn compare_dates(a: Date, b: Date) -> Ordering {
    a.cmp(&b)
}

/// Returns the number of days from `start` to `end`, counting both ends.
///
/// Returns 0 when `end` falls before `start`.
#[must_use]
pub fn days_in_period(start: Date, end: Date) -> i64 {
    match compare_dates(start, end) {
        Ordering::Greater => 0,
        Ordering::Less | Ordering::Equal => (end - start).whole_days() + 1,
    }
}
