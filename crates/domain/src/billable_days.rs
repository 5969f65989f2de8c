// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorised and billable day counts for a charge reference.
//!
//! The Charging Module prorates a charge by the number of days the licence
//! could abstract during the financial year (authorised days) and the number
//! of those days that fall in the charge period (billable days).
//!
//! A reference's elements share its charge, so the counts take the element
//! with the most days rather than adding elements together.

use crate::abstraction_period::{
    AbstractionInterval, AbstractionWindow, ChargePeriod, determine_abstraction_periods,
};
use serde::{Deserialize, Serialize};

/// Day counts sent to the Charging Module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillableDays {
    /// Days of abstraction within the billing period.
    pub authorised_days: i64,
    /// Days of abstraction within the charge period.
    pub billable_days: i64,
}

/// Counts the days a window is active within a period.
fn days_covered(period: &ChargePeriod, window: &AbstractionWindow) -> i64 {
    determine_abstraction_periods(period, window)
        .iter()
        .map(AbstractionInterval::duration_days)
        .sum()
}

/// Calculates authorised and billable days across a set of abstraction windows.
///
/// # Arguments
///
/// * `billing_period` - The financial year being billed
/// * `charge_period` - The part of the billing period being charged
/// * `windows` - The abstraction window of every charge element
///
/// # Returns
///
/// The largest authorised and billable day counts across the windows, or
/// zero for both when there are no windows.
#[must_use]
pub fn calculate_authorised_and_billable_days(
    billing_period: &ChargePeriod,
    charge_period: &ChargePeriod,
    windows: &[AbstractionWindow],
) -> BillableDays {
    windows
        .iter()
        .fold(BillableDays::default(), |days, window| BillableDays {
            authorised_days: days
                .authorised_days
                .max(days_covered(billing_period, window)),
            billable_days: days.billable_days.max(days_covered(charge_period, window)),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn financial_year_2024() -> ChargePeriod {
        ChargePeriod::new(date!(2023 - 04 - 01), date!(2024 - 03 - 31)).unwrap()
    }

    #[test]
    fn test_all_year_window_full_charge_period() {
        let billing_period: ChargePeriod = financial_year_2024();
        let windows: Vec<AbstractionWindow> = vec![AbstractionWindow::new(1, 1, 31, 12).unwrap()];

        let days: BillableDays =
            calculate_authorised_and_billable_days(&billing_period, &billing_period, &windows);

        assert_eq!(days.authorised_days, 366);
        assert_eq!(days.billable_days, 366);
    }

    #[test]
    fn test_partial_charge_period() {
        let billing_period: ChargePeriod = financial_year_2024();
        let charge_period: ChargePeriod =
            ChargePeriod::new(date!(2023 - 10 - 01), date!(2024 - 03 - 31)).unwrap();
        // 1 April to 31 October: 214 days, 31 of them from 1 October
        let windows: Vec<AbstractionWindow> = vec![AbstractionWindow::new(1, 4, 31, 10).unwrap()];

        let days: BillableDays =
            calculate_authorised_and_billable_days(&billing_period, &charge_period, &windows);

        assert_eq!(days.authorised_days, 214);
        assert_eq!(days.billable_days, 31);
    }

    #[test]
    fn test_split_window_days_are_added() {
        let billing_period: ChargePeriod = financial_year_2024();
        // 1 October to 30 April: 30 days in April plus 183 from October to March
        let windows: Vec<AbstractionWindow> = vec![AbstractionWindow::new(1, 10, 30, 4).unwrap()];

        let days: BillableDays =
            calculate_authorised_and_billable_days(&billing_period, &billing_period, &windows);

        assert_eq!(days.authorised_days, 213);
        assert_eq!(days.billable_days, 213);
    }

    #[test]
    fn test_largest_element_wins() {
        let billing_period: ChargePeriod = financial_year_2024();
        let windows: Vec<AbstractionWindow> = vec![
            AbstractionWindow::new(1, 6, 30, 6).unwrap(),
            AbstractionWindow::new(1, 4, 31, 10).unwrap(),
        ];

        let days: BillableDays =
            calculate_authorised_and_billable_days(&billing_period, &billing_period, &windows);

        assert_eq!(days.authorised_days, 214);
    }

    #[test]
    fn test_no_windows() {
        let billing_period: ChargePeriod = financial_year_2024();
        let days: BillableDays =
            calculate_authorised_and_billable_days(&billing_period, &billing_period, &[]);

        assert_eq!(days, BillableDays::default());
    }
}
