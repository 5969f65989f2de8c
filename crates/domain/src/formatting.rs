// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display formatting for dates, periods and money.

use crate::abstraction_period::{AbstractionInterval, ChargePeriod};
use time::Date;

/// Formats a date as `D MMMM YYYY`, e.g. "1 April 2023".
#[must_use]
pub fn format_long_date(date: Date) -> String {
    format!("{} {} {}", date.day(), date.month(), date.year())
}

/// Formats an inclusive date range, e.g. "1 April 2023 to 31 March 2024".
#[must_use]
pub fn format_period(start_date: Date, end_date: Date) -> String {
    format!(
        "{} to {}",
        format_long_date(start_date),
        format_long_date(end_date)
    )
}

/// Formats a charge period for display.
#[must_use]
pub fn format_charge_period(charge_period: &ChargePeriod) -> String {
    format_period(charge_period.start_date(), charge_period.end_date())
}

/// Formats each resolved abstraction interval for display.
#[must_use]
pub fn format_abstraction_periods(intervals: &[AbstractionInterval]) -> Vec<String> {
    intervals
        .iter()
        .map(|interval| format_period(interval.start_date, interval.end_date))
        .collect()
}

/// Formats a date the way the Charging Module expects, e.g. "01-APR-2023".
#[must_use]
pub fn format_charging_module_date(date: Date) -> String {
    let month: String = date.month().to_string().to_uppercase();
    let abbreviation: &str = month.get(..3).unwrap_or(&month);
    format!("{:02}-{abbreviation}-{}", date.day(), date.year())
}

/// Formats an amount in pence as pounds, e.g. "£1,234.56".
#[must_use]
pub fn format_money(pence: i64) -> String {
    let sign: &str = if pence < 0 { "-" } else { "" };
    let magnitude: u64 = pence.unsigned_abs();
    let pounds: u64 = magnitude / 100;
    let remainder: u64 = magnitude % 100;

    format!("{sign}£{}.{remainder:02}", group_thousands(pounds))
}

/// Inserts a comma between every group of three digits.
fn group_thousands(value: u64) -> String {
    let digits: String = value.to_string();
    let mut grouped: String = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_format_long_date_has_no_day_padding() {
        assert_eq!(format_long_date(date!(2023 - 04 - 01)), "1 April 2023");
        assert_eq!(format_long_date(date!(2024 - 03 - 31)), "31 March 2024");
    }

    #[test]
    fn test_format_charge_period() {
        let charge_period: ChargePeriod =
            ChargePeriod::new(date!(2023 - 04 - 01), date!(2024 - 03 - 31)).unwrap();
        assert_eq!(
            format_charge_period(&charge_period),
            "1 April 2023 to 31 March 2024"
        );
    }

    #[test]
    fn test_format_abstraction_periods() {
        let intervals: Vec<AbstractionInterval> = vec![
            AbstractionInterval {
                start_date: date!(2023 - 04 - 01),
                end_date: date!(2023 - 04 - 30),
            },
            AbstractionInterval {
                start_date: date!(2023 - 10 - 01),
                end_date: date!(2024 - 03 - 31),
            },
        ];

        assert_eq!(
            format_abstraction_periods(&intervals),
            vec![
                String::from("1 April 2023 to 30 April 2023"),
                String::from("1 October 2023 to 31 March 2024"),
            ]
        );
    }

    #[test]
    fn test_format_abstraction_periods_empty() {
        assert!(format_abstraction_periods(&[]).is_empty());
    }

    #[test]
    fn test_format_charging_module_date() {
        assert_eq!(format_charging_module_date(date!(2023 - 04 - 01)), "01-APR-2023");
        assert_eq!(format_charging_module_date(date!(2024 - 12 - 25)), "25-DEC-2024");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "£0.00");
        assert_eq!(format_money(5), "£0.05");
        assert_eq!(format_money(100_000), "£1,000.00");
        assert_eq!(format_money(123_456), "£1,234.56");
        assert_eq!(format_money(123_456_789), "£1,234,567.89");
        assert_eq!(format_money(-2_050), "-£20.50");
    }
}
