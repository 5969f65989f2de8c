// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Billing financial years.
//!
//! Bill runs cover a financial year running from 1 April to 31 March and
//! are identified by the calendar year the financial year ends in.

use crate::abstraction_period::ChargePeriod;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// A 1 April to 31 March financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialYear {
    /// The calendar year in which the financial year ends.
    ending_year: i32,
}

impl FinancialYear {
    /// Creates a `FinancialYear` from the year it ends in.
    #[must_use]
    pub const fn ending(ending_year: i32) -> Self {
        Self { ending_year }
    }

    /// Returns the financial year a date falls in.
    #[must_use]
    pub fn containing(date: Date) -> Self {
        if u8::from(date.month()) >= u8::from(Month::April) {
            Self::ending(date.year() + 1)
        } else {
            Self::ending(date.year())
        }
    }

    /// Returns the calendar year the financial year ends in.
    #[must_use]
    pub const fn ending_year(&self) -> i32 {
        self.ending_year
    }

    /// Returns 1 April of the starting calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be represented.
    pub fn start_date(&self) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.ending_year - 1, Month::April, 1).map_err(|_| {
            DomainError::DateOutOfRange {
                operation: format!("calculating start of financial year {self}"),
            }
        })
    }

    /// Returns 31 March of the ending calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be represented.
    pub fn end_date(&self) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.ending_year, Month::March, 31).map_err(|_| {
            DomainError::DateOutOfRange {
                operation: format!("calculating end of financial year {self}"),
            }
        })
    }

    /// Returns the whole financial year as a charge period.
    ///
    /// # Errors
    ///
    /// Returns an error if either boundary cannot be represented.
    pub fn charge_period(&self) -> Result<ChargePeriod, DomainError> {
        ChargePeriod::new(self.start_date()?, self.end_date()?)
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.ending_year - 1, self.ending_year)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_containing_after_april() {
        assert_eq!(
            FinancialYear::containing(date!(2023 - 04 - 01)),
            FinancialYear::ending(2024)
        );
        assert_eq!(
            FinancialYear::containing(date!(2023 - 12 - 31)),
            FinancialYear::ending(2024)
        );
    }

    #[test]
    fn test_containing_before_april() {
        assert_eq!(
            FinancialYear::containing(date!(2024 - 03 - 31)),
            FinancialYear::ending(2024)
        );
        assert_eq!(
            FinancialYear::containing(date!(2024 - 01 - 01)),
            FinancialYear::ending(2024)
        );
    }

    #[test]
    fn test_boundaries() {
        let year: FinancialYear = FinancialYear::ending(2024);
        assert_eq!(year.start_date().unwrap(), date!(2023 - 04 - 01));
        assert_eq!(year.end_date().unwrap(), date!(2024 - 03 - 31));
        assert_eq!(year.charge_period().unwrap().duration_days(), 366);
    }

    #[test]
    fn test_display() {
        assert_eq!(FinancialYear::ending(2023).to_string(), "2022 to 2023");
    }
}
