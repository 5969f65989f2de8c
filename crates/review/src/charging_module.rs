// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound calculation requests to the Charging Module.
//!
//! The Charging Module is an external service that prices a charge from its
//! charge factors. A review preview builds the same request a bill run would
//! send, with the volumes and factors as amended during the review.

use crate::review_record::ReviewChargeReference;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wrls_domain::{
    AbstractionWindow, Adjustments, BillableDays, ChargePeriod, DomainError, Loss,
    calculate_authorised_and_billable_days, format_charging_module_date,
};

/// Ruleset for charges under the Strategic Review of Charges scheme.
pub const SROC_RULESET: &str = "sroc";

/// Errors returned when calculating a charge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChargingModuleError {
    /// The service rejected the request.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status returned.
        status: u16,
        /// Error message returned.
        message: String,
    },

    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Body of a charge calculation request.
///
/// Volumes and factors are sent as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateChargeRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub abatement_factor: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub actual_volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub adjustment_factor: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub aggregate_proportion: Decimal,
    pub authorised_days: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub authorised_volume: Decimal,
    pub billable_days: i64,
    pub charge_category_code: String,
    pub compensation_charge: bool,
    pub credit: bool,
    pub loss: Loss,
    pub period_start: String,
    pub period_end: String,
    pub ruleset: String,
    pub section_127_agreement: bool,
    pub section_130_agreement: bool,
    pub supported_source: bool,
    pub supported_source_name: Option<String>,
    pub two_part_tariff: bool,
    pub water_company_charge: bool,
    pub water_undertaker: bool,
    pub winter_only: bool,
}

/// Result of a charge calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateChargeResponse {
    /// The calculated charge in pence.
    pub charge_value: i64,
}

/// A charge calculator.
pub trait ChargingModule {
    /// Calculates the charge for a request.
    ///
    /// # Errors
    ///
    /// Returns a `ChargingModuleError` if the charge cannot be calculated.
    fn calculate_charge(
        &self,
        request: &CalculateChargeRequest,
    ) -> Result<CalculateChargeResponse, ChargingModuleError>;
}

/// Builds the calculation request for a reviewed charge reference.
///
/// Actual volume is the return volume allocated across the reference's
/// elements. Days are counted from the abstraction window of every element
/// against the financial year and the charge period.
///
/// # Errors
///
/// Returns a `DomainError` if the financial year cannot be represented.
pub fn build_calculate_charge_request(
    record: &ReviewChargeReference,
) -> Result<CalculateChargeRequest, DomainError> {
    let billing_period: ChargePeriod = record.financial_year.charge_period()?;
    let windows: Vec<AbstractionWindow> = record
        .charge_elements
        .iter()
        .map(|element| element.charge_element.abstraction_window)
        .collect();
    let days: BillableDays =
        calculate_authorised_and_billable_days(&billing_period, &record.charge_period, &windows);

    let reference = &record.charge_reference;
    let adjustments: Adjustments = record.effective_adjustments();
    let supported_source = reference.additional_charges.supported_source.as_ref();

    Ok(CalculateChargeRequest {
        abatement_factor: adjustments.s126.unwrap_or(Decimal::ONE),
        actual_volume: record.total_billable_returns(),
        adjustment_factor: adjustments.charge.unwrap_or(Decimal::ONE),
        aggregate_proportion: adjustments.aggregate.unwrap_or(Decimal::ONE),
        authorised_days: days.authorised_days,
        authorised_volume: record.amended_authorised_volume,
        billable_days: days.billable_days,
        charge_category_code: reference.charge_category_code.clone(),
        compensation_charge: false,
        credit: false,
        loss: reference.loss,
        period_start: format_charging_module_date(record.charge_period.start_date()),
        period_end: format_charging_module_date(record.charge_period.end_date()),
        ruleset: SROC_RULESET.to_string(),
        section_127_agreement: adjustments.s127,
        section_130_agreement: adjustments.s130,
        supported_source: supported_source.is_some(),
        supported_source_name: supported_source.map(|source| source.name.clone()),
        two_part_tariff: true,
        water_company_charge: reference.additional_charges.is_supply_public_water,
        water_undertaker: reference.water_undertaker,
        winter_only: adjustments.winter,
    })
}
