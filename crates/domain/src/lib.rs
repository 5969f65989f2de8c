// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod abstraction_period;
mod aggregation;
mod billable_days;
mod calendar;
mod charge_reference;
mod error;
mod financial_year;
mod formatting;

#[cfg(test)]
mod tests;

pub use abstraction_period::{
    AbstractionInterval, AbstractionWindow, ChargePeriod, determine_abstraction_periods,
};
pub use aggregation::{
    additional_charge_descriptions, adjustment_descriptions, has_aggregate_or_charge_factor,
    total_billable_returns,
};
pub use billable_days::{BillableDays, calculate_authorised_and_billable_days};
pub use calendar::{
    build_date_from_day_month, compare_dates, days_in_month, days_in_period, month_from_number,
};
pub use charge_reference::{
    AdditionalCharges, Adjustments, ChargeElement, ChargeReference, Loss, SupportedSource,
};
pub use error::DomainError;
pub use financial_year::FinancialYear;
pub use formatting::{
    format_abstraction_periods, format_charge_period, format_charging_module_date,
    format_long_date, format_money, format_period,
};
