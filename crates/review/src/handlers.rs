// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Review workflow operations.
//!
//! Each operation fetches the review record, presents or validates, and
//! patches the store. Page routing and session handling sit outside this
//! crate; a saved amendment returns the banner the caller should show on the
//! next page.

use crate::charging_module::{
    CalculateChargeRequest, CalculateChargeResponse, ChargingModule,
    build_calculate_charge_request,
};
use crate::error::ReviewError;
use crate::form_validation::{
    AdjustmentFactors, AdjustmentFactorsForm, AuthorisedVolumeForm, FormValidationError,
    validate_adjustment_factors, validate_authorised_volume,
};
use crate::presenters::{
    AmendAdjustmentFactorsView, AmendAuthorisedVolumeView, ChargeElementView,
    ChargeReferenceView, amend_adjustment_factors_view, amend_authorised_volume_view,
    charge_element_view, charge_reference_view,
};
use crate::review_record::{ReviewChargeElement, ReviewChargeReference};
use crate::store::ReviewStore;
use tracing::{debug, info, warn};
use wrls_domain::format_money;

/// Banner shown after the authorised volume is saved.
pub const AUTHORISED_VOLUME_UPDATED: &str =
    "The authorised volume for this licence has been updated";

/// Banner shown after the adjustment factors are saved.
pub const ADJUSTMENT_FACTORS_UPDATED: &str =
    "The adjustment factors for this licence have been updated";

/// Result of submitting an amendment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome<V> {
    /// The amendment was stored.
    Saved {
        /// Confirmation to show on the review page.
        banner: String,
    },
    /// The input was rejected; the form is shown again with the error.
    Invalid {
        /// The form view, carrying the rejected input.
        view: V,
        /// The reason the input was rejected.
        error: FormValidationError,
    },
}

fn fetch_record<S>(store: &S, id: &str) -> Result<ReviewChargeReference, ReviewError>
where
    S: ReviewStore + ?Sized,
{
    store.fetch_review_charge_reference(id)?.ok_or_else(|| {
        warn!(review_charge_reference_id = id, "Review charge reference not found");
        ReviewError::ChargeReferenceNotFound { id: id.to_string() }
    })
}

/// Presents the review charge reference page.
///
/// # Errors
///
/// Returns an error if the record does not exist or the store fails.
pub fn review_charge_reference<S>(
    store: &S,
    id: &str,
    banner: Option<String>,
) -> Result<ChargeReferenceView, ReviewError>
where
    S: ReviewStore + ?Sized,
{
    let record: ReviewChargeReference = fetch_record(store, id)?;
    debug!(
        review_charge_reference_id = id,
        elements = record.charge_elements.len(),
        "Presenting review charge reference"
    );

    Ok(charge_reference_view(&record, banner))
}

/// Presents the review page for one charge element.
///
/// `element_index` is 1-based, matching the order elements are listed on
/// the charge reference page.
///
/// # Errors
///
/// Returns an error if the record or element does not exist, or the store
/// fails.
pub fn review_charge_element<S>(
    store: &S,
    id: &str,
    element_index: usize,
) -> Result<ChargeElementView, ReviewError>
where
    S: ReviewStore + ?Sized,
{
    let record: ReviewChargeReference = fetch_record(store, id)?;

    let element: &ReviewChargeElement = element_index
        .checked_sub(1)
        .and_then(|position| record.charge_elements.get(position))
        .ok_or_else(|| {
            warn!(
                review_charge_reference_id = id,
                element_index, "Charge element not found"
            );
            ReviewError::ChargeElementNotFound {
                id: id.to_string(),
                element_index,
            }
        })?;

    Ok(charge_element_view(&record, element_index, element))
}

/// Presents the amend authorised volume form.
///
/// # Errors
///
/// Returns an error if the record does not exist or the store fails.
pub fn amend_authorised_volume<S>(
    store: &S,
    id: &str,
) -> Result<AmendAuthorisedVolumeView, ReviewError>
where
    S: ReviewStore + ?Sized,
{
    let record: ReviewChargeReference = fetch_record(store, id)?;
    Ok(amend_authorised_volume_view(&record, None))
}

/// Validates and stores an amended authorised volume.
///
/// # Errors
///
/// Returns an error if the record does not exist or the store fails. Invalid
/// input is reported through `SubmissionOutcome::Invalid`.
pub fn submit_amended_authorised_volume<S>(
    store: &mut S,
    id: &str,
    form: &AuthorisedVolumeForm,
) -> Result<SubmissionOutcome<AmendAuthorisedVolumeView>, ReviewError>
where
    S: ReviewStore + ?Sized,
{
    let record: ReviewChargeReference = fetch_record(&*store, id)?;

    match validate_authorised_volume(form, record.total_billable_returns()) {
        Ok(volume) => {
            store.update_authorised_volume(id, volume)?;
            info!(
                review_charge_reference_id = id,
                %volume,
                "Authorised volume amended"
            );
            Ok(SubmissionOutcome::Saved {
                banner: AUTHORISED_VOLUME_UPDATED.to_string(),
            })
        }
        Err(error) => {
            debug!(review_charge_reference_id = id, %error, "Authorised volume rejected");
            Ok(SubmissionOutcome::Invalid {
                view: amend_authorised_volume_view(&record, form.authorised_volume.as_deref()),
                error,
            })
        }
    }
}

/// Presents the amend adjustment factors form.
///
/// # Errors
///
/// Returns an error if the record does not exist or the store fails.
pub fn amend_adjustment_factors<S>(
    store: &S,
    id: &str,
) -> Result<AmendAdjustmentFactorsView, ReviewError>
where
    S: ReviewStore + ?Sized,
{
    let record: ReviewChargeReference = fetch_record(store, id)?;
    Ok(amend_adjustment_factors_view(&record, None))
}

/// Validates and stores amended adjustment factors.
///
/// # Errors
///
/// Returns an error if the record does not exist or the store fails. Invalid
/// input is reported through `SubmissionOutcome::Invalid`.
pub fn submit_amended_adjustment_factors<S>(
    store: &mut S,
    id: &str,
    form: &AdjustmentFactorsForm,
) -> Result<SubmissionOutcome<AmendAdjustmentFactorsView>, ReviewError>
where
    S: ReviewStore + ?Sized,
{
    let record: ReviewChargeReference = fetch_record(&*store, id)?;

    match validate_adjustment_factors(form) {
        Ok(AdjustmentFactors {
            aggregate,
            charge_adjustment,
        }) => {
            store.update_adjustment_factors(id, aggregate, charge_adjustment)?;
            info!(
                review_charge_reference_id = id,
                %aggregate,
                %charge_adjustment,
                "Adjustment factors amended"
            );
            Ok(SubmissionOutcome::Saved {
                banner: ADJUSTMENT_FACTORS_UPDATED.to_string(),
            })
        }
        Err(error) => {
            debug!(review_charge_reference_id = id, %error, "Adjustment factors rejected");
            Ok(SubmissionOutcome::Invalid {
                view: amend_adjustment_factors_view(&record, Some(form)),
                error,
            })
        }
    }
}

/// Asks the Charging Module for an example charge using the reviewed values.
///
/// Returns the banner to show on the charge reference page.
///
/// # Errors
///
/// Returns an error if the record does not exist, the store fails, or the
/// Charging Module cannot calculate the charge.
pub fn preview_charge<S, C>(
    store: &S,
    charging_module: &C,
    id: &str,
) -> Result<String, ReviewError>
where
    S: ReviewStore + ?Sized,
    C: ChargingModule + ?Sized,
{
    let record: ReviewChargeReference = fetch_record(store, id)?;
    let request: CalculateChargeRequest = build_calculate_charge_request(&record)?;
    debug!(
        review_charge_reference_id = id,
        authorised_days = request.authorised_days,
        billable_days = request.billable_days,
        "Requesting example charge"
    );

    let response: CalculateChargeResponse =
        charging_module.calculate_charge(&request).map_err(|err| {
            warn!(review_charge_reference_id = id, %err, "Charge calculation failed");
            ReviewError::from(err)
        })?;

    info!(
        review_charge_reference_id = id,
        charge_value = response.charge_value,
        actual_volume = %request.actual_volume,
        authorised_volume = %request.authorised_volume,
        "Example charge calculated"
    );

    Ok(format!(
        "Based on this information the example charge is {}",
        format_money(response.charge_value)
    ))
}

