// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! View models for the review pages.
//!
//! Presenters take review records and produce the display-ready values a page
//! renders. They never touch the store.

use crate::form_validation::AdjustmentFactorsForm;
use crate::review_record::{MatchedReturn, ReviewChargeElement, ReviewChargeReference};
use rust_decimal::Decimal;
use serde::Serialize;
use wrls_domain::{
    AbstractionInterval, additional_charge_descriptions, adjustment_descriptions,
    determine_abstraction_periods, format_abstraction_periods, format_charge_period,
    format_period, has_aggregate_or_charge_factor,
};

/// Summary of a charge element on the charge reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeElementSummary {
    /// 1-based position of the element on the reference.
    pub element_index: usize,
    /// Purpose description.
    pub description: String,
    /// Review status label.
    pub status: String,
    /// Return volume allocated to the element.
    pub billable_returns: String,
    /// Parts of the charge period in which the element's window is open.
    pub abstraction_periods: Vec<String>,
}

/// The review charge reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeReferenceView {
    /// Identifier of the review record.
    pub review_charge_reference_id: String,
    /// The bill run under review.
    pub bill_run_id: String,
    /// Identifier of the licence.
    pub licence_id: String,
    /// Licence reference.
    pub licence_ref: String,
    /// Financial year, e.g. "2023 to 2024".
    pub financial_year: String,
    /// Charge period, e.g. "1 April 2023 to 31 March 2024".
    pub charge_period: String,
    /// Charge category code.
    pub charge_category: String,
    /// Charge category description.
    pub charge_description: String,
    /// Authorised volume after review.
    pub authorised_volume: String,
    /// Return volume allocated across all elements.
    pub total_billable_returns: String,
    /// Adjustments in effect, with amended factors applied.
    pub adjustments: Vec<String>,
    /// Additional charges on the reference.
    pub additional_charges: Vec<String>,
    /// Whether the adjustment factors can be amended from this page.
    pub can_amend_factors: bool,
    /// Confirmation shown after an amendment was saved.
    pub banner: Option<String>,
    /// The reference's charge elements, in order.
    pub charge_elements: Vec<ChargeElementSummary>,
}

/// A return matched to the element being reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedReturnView {
    /// Return reference.
    pub return_reference: String,
    /// Purpose description from the return.
    pub description: String,
    /// Return period, e.g. "1 April 2023 to 31 October 2023".
    pub return_period: String,
    /// Total quantity reported on the return.
    pub quantity: String,
    /// Quantity allocated to the element.
    pub allocated: String,
    /// Review status label.
    pub status: String,
}

/// The review charge element page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeElementView {
    /// Identifier of the review record.
    pub review_charge_reference_id: String,
    /// The bill run under review.
    pub bill_run_id: String,
    /// Identifier of the licence.
    pub licence_id: String,
    /// 1-based position of the element on the reference.
    pub element_index: usize,
    /// Number of elements on the reference.
    pub element_count: usize,
    /// Financial year, e.g. "2023 to 2024".
    pub financial_year: String,
    /// Charge period, e.g. "1 April 2023 to 31 March 2024".
    pub charge_period: String,
    /// Purpose description.
    pub description: String,
    /// Review status label.
    pub status: String,
    /// Issues raised while matching.
    pub issues: Vec<String>,
    /// Annual quantity authorised for the element.
    pub authorised_volume: String,
    /// Return volume allocated to the element.
    pub billable_returns: String,
    /// Parts of the charge period in which the element's window is open.
    pub abstraction_periods: Vec<String>,
    /// Returns matched to the element.
    pub matched_returns: Vec<MatchedReturnView>,
}

/// The amend authorised volume page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendAuthorisedVolumeView {
    /// Identifier of the review record.
    pub review_charge_reference_id: String,
    /// The bill run under review.
    pub bill_run_id: String,
    /// Identifier of the licence.
    pub licence_id: String,
    /// Financial year, e.g. "2023 to 2024".
    pub financial_year: String,
    /// Charge period, e.g. "1 April 2023 to 31 March 2024".
    pub charge_period: String,
    /// Charge category description.
    pub charge_description: String,
    /// Charge category code.
    pub charge_category: String,
    /// Current volume, or the rejected input when the form is shown again.
    pub authorised_volume: String,
    /// Return volume allocated across all elements; the volume's lower bound.
    pub total_billable_returns: String,
}

/// The amend adjustment factors page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendAdjustmentFactorsView {
    /// Identifier of the review record.
    pub review_charge_reference_id: String,
    /// The bill run under review.
    pub bill_run_id: String,
    /// Identifier of the licence.
    pub licence_id: String,
    /// Financial year, e.g. "2023 to 2024".
    pub financial_year: String,
    /// Charge period, e.g. "1 April 2023 to 31 March 2024".
    pub charge_period: String,
    /// Aggregate factor field value.
    pub aggregate_factor: String,
    /// Charge adjustment factor field value.
    pub charge_adjustment: String,
    /// Every adjustment on the reference, with amended factors applied.
    pub adjustments: Vec<String>,
}

fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

fn resolve_abstraction_periods(
    record: &ReviewChargeReference,
    element: &ReviewChargeElement,
) -> Vec<String> {
    let intervals: Vec<AbstractionInterval> = determine_abstraction_periods(
        &record.charge_period,
        &element.charge_element.abstraction_window,
    );
    format_abstraction_periods(&intervals)
}

fn matched_return_view(matched_return: &MatchedReturn) -> MatchedReturnView {
    MatchedReturnView {
        return_reference: matched_return.return_reference.clone(),
        description: matched_return.description.clone(),
        return_period: format_period(matched_return.start_date, matched_return.end_date),
        quantity: format_quantity(matched_return.quantity),
        allocated: format_quantity(matched_return.allocated),
        status: matched_return.status.to_string(),
    }
}

/// Factor shown in a form field; a missing factor reads as 1.
fn factor_field(factor: Option<Decimal>) -> String {
    format_quantity(factor.unwrap_or(Decimal::ONE))
}

/// Presents the review charge reference page.
#[must_use]
pub fn charge_reference_view(
    record: &ReviewChargeReference,
    banner: Option<String>,
) -> ChargeReferenceView {
    let reference = &record.charge_reference;
    let adjustments = record.effective_adjustments();

    let charge_elements: Vec<ChargeElementSummary> = record
        .charge_elements
        .iter()
        .enumerate()
        .map(|(index, element)| ChargeElementSummary {
            element_index: index + 1,
            description: element.charge_element.description.clone(),
            status: element.status.to_string(),
            billable_returns: format_quantity(element.charge_element.allocated_quantity),
            abstraction_periods: resolve_abstraction_periods(record, element),
        })
        .collect();

    ChargeReferenceView {
        review_charge_reference_id: record.id.clone(),
        bill_run_id: record.bill_run_id.clone(),
        licence_id: record.licence_id.clone(),
        licence_ref: record.licence_ref.clone(),
        financial_year: record.financial_year.to_string(),
        charge_period: format_charge_period(&record.charge_period),
        charge_category: reference.charge_category_code.clone(),
        charge_description: reference.description.clone(),
        authorised_volume: format_quantity(record.amended_authorised_volume),
        total_billable_returns: format_quantity(record.total_billable_returns()),
        adjustments: adjustment_descriptions(&adjustments),
        additional_charges: additional_charge_descriptions(&reference.additional_charges),
        can_amend_factors: has_aggregate_or_charge_factor(&reference.adjustments)
            || has_aggregate_or_charge_factor(&adjustments),
        banner,
        charge_elements,
    }
}

/// Presents the review charge element page for the element at a 1-based index.
#[must_use]
pub fn charge_element_view(
    record: &ReviewChargeReference,
    element_index: usize,
    element: &ReviewChargeElement,
) -> ChargeElementView {
    ChargeElementView {
        review_charge_reference_id: record.id.clone(),
        bill_run_id: record.bill_run_id.clone(),
        licence_id: record.licence_id.clone(),
        element_index,
        element_count: record.charge_elements.len(),
        financial_year: record.financial_year.to_string(),
        charge_period: format_charge_period(&record.charge_period),
        description: element.charge_element.description.clone(),
        status: element.status.to_string(),
        issues: element.issues.clone(),
        authorised_volume: format_quantity(element.charge_element.authorised_annual_quantity),
        billable_returns: format_quantity(element.charge_element.allocated_quantity),
        abstraction_periods: resolve_abstraction_periods(record, element),
        matched_returns: element
            .matched_returns
            .iter()
            .map(matched_return_view)
            .collect(),
    }
}

/// Presents the amend authorised volume page.
///
/// `entered` is the rejected input when the form is shown again after a
/// validation failure.
#[must_use]
pub fn amend_authorised_volume_view(
    record: &ReviewChargeReference,
    entered: Option<&str>,
) -> AmendAuthorisedVolumeView {
    AmendAuthorisedVolumeView {
        review_charge_reference_id: record.id.clone(),
        bill_run_id: record.bill_run_id.clone(),
        licence_id: record.licence_id.clone(),
        financial_year: record.financial_year.to_string(),
        charge_period: format_charge_period(&record.charge_period),
        charge_description: record.charge_reference.description.clone(),
        charge_category: record.charge_reference.charge_category_code.clone(),
        authorised_volume: entered.map_or_else(
            || format_quantity(record.amended_authorised_volume),
            str::to_string,
        ),
        total_billable_returns: format_quantity(record.total_billable_returns()),
    }
}

/// Presents the amend adjustment factors page.
///
/// `entered` is the rejected form when shown again after a validation
/// failure.
#[must_use]
pub fn amend_adjustment_factors_view(
    record: &ReviewChargeReference,
    entered: Option<&AdjustmentFactorsForm>,
) -> AmendAdjustmentFactorsView {
    let adjustments = record.effective_adjustments();

    let (aggregate_factor, charge_adjustment) = match entered {
        Some(form) => (
            form.amended_aggregate_factor.clone().unwrap_or_default(),
            form.amended_charge_adjustment.clone().unwrap_or_default(),
        ),
        None => (
            factor_field(adjustments.aggregate),
            factor_field(adjustments.charge),
        ),
    };

    AmendAdjustmentFactorsView {
        review_charge_reference_id: record.id.clone(),
        bill_run_id: record.bill_run_id.clone(),
        licence_id: record.licence_id.clone(),
        financial_year: record.financial_year.to_string(),
        charge_period: format_charge_period(&record.charge_period),
        aggregate_factor,
        charge_adjustment,
        adjustments: adjustment_descriptions(&adjustments),
    }
}
