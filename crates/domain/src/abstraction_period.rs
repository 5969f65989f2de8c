// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Abstraction period resolution.
//!
//! A licence's charge element carries a recurring annual abstraction window
//! (for example "1 April to 31 October", or "1 November to 31 March" which
//! wraps the new year). Billing works on concrete charge periods, so the
//! window has to be resolved into the concrete date intervals it covers
//! within a given charge period.
//!
//! ## Invariants
//!
//! - Every interval lies within the charge period
//! - Intervals are disjoint and returned in ascending order
//! - Boundaries are inclusive; a single shared day is a one-day overlap
//! - A window that misses the charge period entirely yields no intervals
//! - For charge periods of up to twelve months at most two intervals result
//!
//! Charge periods longer than twelve months are outside the billing domain.
//! The resolver still returns contained, ordered intervals for them, but
//! may omit occurrences of the window beyond the following calendar year.

use crate::calendar::{build_date_from_day_month, compare_dates, days_in_period};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::Date;

/// The date range a charge is being calculated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ChargePeriodFields")]
pub struct ChargePeriod {
    /// Start date (inclusive).
    start_date: Date,
    /// End date (inclusive).
    end_date: Date,
}

impl ChargePeriod {
    /// Creates a new `ChargePeriod`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidChargePeriod` if `start_date` is after `end_date`.
    pub fn new(start_date: Date, end_date: Date) -> Result<Self, DomainError> {
        if compare_dates(start_date, end_date) == Ordering::Greater {
            return Err(DomainError::InvalidChargePeriod {
                start_date,
                end_date,
            });
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Returns the start date (inclusive).
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the end date (inclusive).
    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the number of days in the charge period.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        days_in_period(self.start_date, self.end_date)
    }
}

/// Unvalidated charge period as read from storage.
#[derive(Deserialize)]
struct ChargePeriodFields {
    start_date: Date,
    end_date: Date,
}

impl TryFrom<ChargePeriodFields> for ChargePeriod {
    type Error = DomainError;

    fn try_from(fields: ChargePeriodFields) -> Result<Self, Self::Error> {
        Self::new(fields.start_date, fields.end_date)
    }
}

/// A recurring annual window during which a licence may abstract water.
///
/// Days are not checked against the month's length; they are clamped when
/// the window is anchored to a concrete year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AbstractionWindowFields")]
pub struct AbstractionWindow {
    start_day: u8,
    start_month: u8,
    end_day: u8,
    end_month: u8,
}

impl AbstractionWindow {
    /// Creates a new `AbstractionWindow`.
    ///
    /// # Arguments
    ///
    /// * `start_day` - First day of the window (1-31)
    /// * `start_month` - Month of the first day (1-12)
    /// * `end_day` - Last day of the window (1-31)
    /// * `end_month` - Month of the last day (1-12)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either day is outside 1..=31
    /// - Either month is outside 1..=12
    pub fn new(
        start_day: u8,
        start_month: u8,
        end_day: u8,
        end_month: u8,
    ) -> Result<Self, DomainError> {
        for day in [start_day, end_day] {
            if !(1..=31).contains(&day) {
                return Err(DomainError::InvalidDay { day });
            }
        }
        for month in [start_month, end_month] {
            if !(1..=12).contains(&month) {
                return Err(DomainError::InvalidMonth { month });
            }
        }

        Ok(Self {
            start_day,
            start_month,
            end_day,
            end_month,
        })
    }

    /// Returns the first day of the window.
    #[must_use]
    pub const fn start_day(&self) -> u8 {
        self.start_day
    }

    /// Returns the month of the first day.
    #[must_use]
    pub const fn start_month(&self) -> u8 {
        self.start_month
    }

    /// Returns the last day of the window.
    #[must_use]
    pub const fn end_day(&self) -> u8 {
        self.end_day
    }

    /// Returns the month of the last day.
    #[must_use]
    pub const fn end_month(&self) -> u8 {
        self.end_month
    }

    /// Returns whether the window crosses from December into January.
    ///
    /// A window whose end falls earlier in the calendar than its start
    /// (e.g. 1 November to 31 March, or 15 March to 10 March) wraps.
    #[must_use]
    pub const fn wraps_new_year(&self) -> bool {
        self.end_month < self.start_month
            || (self.end_month == self.start_month && self.end_day < self.start_day)
    }

    /// Anchors the window to a concrete year.
    ///
    /// The window starts in `year`; a wrapping window ends in `year + 1`.
    fn anchored_to(self, year: i32) -> Result<(Date, Date), DomainError> {
        let start: Date = build_date_from_day_month(self.start_day, self.start_month, year)?;
        let end_year: i32 = if self.wraps_new_year() { year + 1 } else { year };
        let end: Date = build_date_from_day_month(self.end_day, self.end_month, end_year)?;

        Ok((start, end))
    }
}

#[derive(Deserialize)]
struct AbstractionWindowFields {
    start_day: u8,
    start_month: u8,
    end_day: u8,
    end_month: u8,
}

impl TryFrom<AbstractionWindowFields> for AbstractionWindow {
    type Error = DomainError;

    fn try_from(fields: AbstractionWindowFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.start_day,
            fields.start_month,
            fields.end_day,
            fields.end_month,
        )
    }
}

/// A concrete part of a charge period covered by an abstraction window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbstractionInterval {
    /// Start date (inclusive).
    pub start_date: Date,
    /// End date (inclusive).
    pub end_date: Date,
}

impl AbstractionInterval {
    /// Returns the number of days in the interval.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        days_in_period(self.start_date, self.end_date)
    }
}

/// Resolves the parts of a charge period covered by an abstraction window.
///
/// The window is anchored to the year before, the year of, and the year after
/// the charge period's start date. Each anchored instance is intersected with
/// the charge period and every non-empty intersection is kept.
///
/// The year before only matters for windows that wrap the new year: its
/// instance is the tail of last season's window running into the start of
/// the charge period.
///
/// Intersections are sorted by start date. Duplicates, and instances that
/// overlap after a 29 February clamp, are merged so the result is disjoint.
///
/// # Arguments
///
/// * `charge_period` - The period being charged
/// * `window` - The licence's recurring abstraction window
///
/// # Returns
///
/// Zero, one or two intervals in ascending order. An empty result means the
/// licence could not abstract at any point in the charge period.
#[must_use]
pub fn determine_abstraction_periods(
    charge_period: &ChargePeriod,
    window: &AbstractionWindow,
) -> Vec<AbstractionInterval> {
    debug_assert!(
        charge_period.start_date() <= charge_period.end_date(),
        "charge period must not end before it starts"
    );

    let year: i32 = charge_period.start_date().year();
    let mut candidates: Vec<AbstractionInterval> = [year - 1, year, year + 1]
        .into_iter()
        // Anchors outside the representable range cannot overlap the period
        .filter_map(|anchor| window.anchored_to(anchor).ok())
        .filter_map(|(window_start, window_end)| {
            intersect(charge_period, window_start, window_end)
        })
        .collect();

    candidates.sort_by(|a, b| compare_dates(a.start_date, b.start_date));

    let mut intervals: Vec<AbstractionInterval> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match intervals.last_mut() {
            Some(last) if candidate.start_date <= last.end_date => {
                last.end_date = last.end_date.max(candidate.end_date);
            }
            _ => intervals.push(candidate),
        }
    }

    intervals
}

/// Intersects an anchored window instance with the charge period.
fn intersect(
    charge_period: &ChargePeriod,
    window_start: Date,
    window_end: Date,
) -> Option<AbstractionInterval> {
    let start_date: Date = window_start.max(charge_period.start_date());
    let end_date: Date = window_end.min(charge_period.end_date());

    match compare_dates(start_date, end_date) {
        Ordering::Greater => None,
        Ordering::Less | Ordering::Equal => Some(AbstractionInterval {
            start_date,
            end_date,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn period(start: Date, end: Date) -> ChargePeriod {
        ChargePeriod::new(start, end).unwrap()
    }

    fn window(start_day: u8, start_month: u8, end_day: u8, end_month: u8) -> AbstractionWindow {
        AbstractionWindow::new(start_day, start_month, end_day, end_month).unwrap()
    }

    fn interval(start_date: Date, end_date: Date) -> AbstractionInterval {
        AbstractionInterval {
            start_date,
            end_date,
        }
    }

    #[test]
    fn test_charge_period_rejects_inverted_dates() {
        let result: Result<ChargePeriod, DomainError> =
            ChargePeriod::new(date!(2024 - 03 - 31), date!(2023 - 04 - 01));
        assert!(matches!(
            result,
            Err(DomainError::InvalidChargePeriod { .. })
        ));
    }

    #[test]
    fn test_charge_period_single_day() {
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2023 - 04 - 01));
        assert_eq!(charge_period.duration_days(), 1);
    }

    #[test]
    fn test_window_rejects_out_of_range_components() {
        assert!(matches!(
            AbstractionWindow::new(0, 1, 31, 12),
            Err(DomainError::InvalidDay { day: 0 })
        ));
        assert!(matches!(
            AbstractionWindow::new(1, 1, 32, 12),
            Err(DomainError::InvalidDay { day: 32 })
        ));
        assert!(matches!(
            AbstractionWindow::new(1, 0, 31, 12),
            Err(DomainError::InvalidMonth { month: 0 })
        ));
        assert!(matches!(
            AbstractionWindow::new(1, 1, 31, 13),
            Err(DomainError::InvalidMonth { month: 13 })
        ));
    }

    #[test]
    fn test_window_accepts_day_too_long_for_month() {
        // Clamped when anchored rather than rejected
        assert!(AbstractionWindow::new(31, 2, 31, 4).is_ok());
    }

    #[test]
    fn test_wraps_new_year() {
        assert!(window(1, 11, 31, 3).wraps_new_year());
        assert!(window(15, 3, 10, 3).wraps_new_year());
        assert!(!window(1, 4, 31, 10).wraps_new_year());
        assert!(!window(1, 1, 31, 12).wraps_new_year());
        assert!(!window(10, 3, 15, 3).wraps_new_year());
        assert!(!window(10, 3, 10, 3).wraps_new_year());
    }

    #[test]
    fn test_all_year_window_returns_whole_charge_period() {
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2024 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 1, 31, 12));

        assert_eq!(
            result,
            vec![interval(date!(2023 - 04 - 01), date!(2024 - 03 - 31))]
        );
    }

    #[test]
    fn test_all_year_window_partial_charge_period() {
        let charge_period: ChargePeriod = period(date!(2023 - 05 - 24), date!(2024 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 1, 31, 12));

        assert_eq!(
            result,
            vec![interval(date!(2023 - 05 - 24), date!(2024 - 03 - 31))]
        );
    }

    #[test]
    fn test_winter_window_against_financial_year() {
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2024 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 11, 31, 3));

        assert_eq!(
            result,
            vec![interval(date!(2023 - 11 - 01), date!(2024 - 03 - 31))]
        );
    }

    #[test]
    fn test_wrapping_window_split_at_both_ends() {
        // 1 October to 30 April covers the start and the end of the financial year
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2024 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 10, 30, 4));

        assert_eq!(
            result,
            vec![
                interval(date!(2023 - 04 - 01), date!(2023 - 04 - 30)),
                interval(date!(2023 - 10 - 01), date!(2024 - 03 - 31)),
            ]
        );
    }

    #[test]
    fn test_wrapping_window_against_calendar_year() {
        let charge_period: ChargePeriod = period(date!(2023 - 01 - 01), date!(2023 - 12 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 11, 31, 3));

        assert_eq!(
            result,
            vec![
                interval(date!(2023 - 01 - 01), date!(2023 - 03 - 31)),
                interval(date!(2023 - 11 - 01), date!(2023 - 12 - 31)),
            ]
        );
    }

    #[test]
    fn test_summer_window_against_financial_year() {
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2024 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 4, 31, 10));

        assert_eq!(
            result,
            vec![interval(date!(2023 - 04 - 01), date!(2023 - 10 - 31))]
        );
    }

    #[test]
    fn test_window_in_second_calendar_year_of_charge_period() {
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2024 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 1, 28, 2));

        assert_eq!(
            result,
            vec![interval(date!(2024 - 01 - 01), date!(2024 - 02 - 28))]
        );
    }

    #[test]
    fn test_non_overlapping_window_is_empty() {
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2023 - 05 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 6, 30, 6));

        assert!(result.is_empty());
    }

    #[test]
    fn test_single_day_touch_at_charge_period_start() {
        let charge_period: ChargePeriod = period(date!(2023 - 06 - 30), date!(2023 - 09 - 30));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 6, 30, 6));

        assert_eq!(
            result,
            vec![interval(date!(2023 - 06 - 30), date!(2023 - 06 - 30))]
        );
        assert_eq!(result[0].duration_days(), 1);
    }

    #[test]
    fn test_single_day_touch_at_charge_period_end() {
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2023 - 06 - 01));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 6, 30, 6));

        assert_eq!(
            result,
            vec![interval(date!(2023 - 06 - 01), date!(2023 - 06 - 01))]
        );
    }

    #[test]
    fn test_leap_day_window_end_is_clamped() {
        // 29 February only exists in 2024; 2023's instance ends on the 28th
        let charge_period: ChargePeriod = period(date!(2022 - 04 - 01), date!(2023 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 12, 29, 2));

        assert_eq!(
            result,
            vec![interval(date!(2022 - 12 - 01), date!(2023 - 02 - 28))]
        );

        let leap_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2024 - 03 - 31));
        let leap_result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&leap_period, &window(1, 12, 29, 2));

        assert_eq!(
            leap_result,
            vec![interval(date!(2023 - 12 - 01), date!(2024 - 02 - 29))]
        );
    }

    #[test]
    fn test_clamped_instances_that_overlap_are_merged() {
        // 30/2 to 29/2 clamps to 28 Feb 2023 - 29 Feb 2024 and 29 Feb 2024 - 28 Feb 2025
        let charge_period: ChargePeriod = period(date!(2023 - 04 - 01), date!(2024 - 03 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(30, 2, 29, 2));

        assert_eq!(
            result,
            vec![interval(date!(2023 - 04 - 01), date!(2024 - 03 - 31))]
        );
    }

    #[test]
    fn test_adjacent_instances_stay_separate() {
        let charge_period: ChargePeriod = period(date!(2023 - 01 - 01), date!(2023 - 12 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 4, 31, 3));

        assert_eq!(
            result,
            vec![
                interval(date!(2023 - 01 - 01), date!(2023 - 03 - 31)),
                interval(date!(2023 - 04 - 01), date!(2023 - 12 - 31)),
            ]
        );
    }

    #[test]
    fn test_charge_period_at_end_of_representable_range() {
        let charge_period: ChargePeriod = period(date!(9999 - 04 - 01), date!(9999 - 12 - 31));
        let result: Vec<AbstractionInterval> =
            determine_abstraction_periods(&charge_period, &window(1, 11, 31, 3));

        // The 9999 instance would end in 10000 and cannot be built
        assert!(result.is_empty());
    }
}
