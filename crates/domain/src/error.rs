// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur while building domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Charge period start date falls after its end date.
    InvalidChargePeriod {
        /// The requested start date.
        start_date: Date,
        /// The requested end date.
        end_date: Date,
    },
    /// A day of month outside 1..=31.
    InvalidDay {
        /// The rejected day value.
        day: u8,
    },
    /// A month outside 1..=12.
    InvalidMonth {
        /// The rejected month value.
        month: u8,
    },
    /// A concrete date could not be represented.
    DateOutOfRange {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A volume or factor that must not be negative.
    InvalidVolume {
        /// The field holding the value.
        field: &'static str,
        /// The rejected value, as entered.
        value: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChargePeriod {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Charge period start date {start_date} is after end date {end_date}"
                )
            }
            Self::InvalidDay { day } => {
                write!(f, "Invalid day: {day}. Must be between 1 and 31")
            }
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::DateOutOfRange { operation } => {
                write!(f, "Date out of range while {operation}")
            }
            Self::InvalidVolume { field, value } => {
                write!(f, "Invalid {field}: {value}. Must not be negative")
            }
        }
    }
}

impl std::error::Error for DomainError {}
