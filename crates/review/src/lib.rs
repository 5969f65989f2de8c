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

mod charging_module;
mod error;
mod form_validation;
mod handlers;
mod presenters;
mod review_record;
mod store;

#[cfg(test)]
mod tests;

pub use charging_module::{
    CalculateChargeRequest, CalculateChargeResponse, ChargingModule, ChargingModuleError,
    SROC_RULESET, build_calculate_charge_request,
};
pub use error::ReviewError;
pub use form_validation::{
    AUTHORISED_VOLUME_MAX_DECIMAL_PLACES, AdjustmentFactors, AdjustmentFactorsForm,
    AuthorisedVolumeForm, FACTOR_MAX_DECIMAL_PLACES, Factor, FormValidationError,
    validate_adjustment_factors, validate_authorised_volume,
};
pub use handlers::{
    ADJUSTMENT_FACTORS_UPDATED, AUTHORISED_VOLUME_UPDATED, SubmissionOutcome,
    amend_adjustment_factors, amend_authorised_volume, preview_charge, review_charge_element,
    review_charge_reference, submit_amended_adjustment_factors, submit_amended_authorised_volume,
};
pub use presenters::{
    AmendAdjustmentFactorsView, AmendAuthorisedVolumeView, ChargeElementSummary,
    ChargeElementView, ChargeReferenceView, MatchedReturnView, amend_adjustment_factors_view,
    amend_authorised_volume_view, charge_element_view, charge_reference_view,
};
pub use review_record::{MatchedReturn, ReviewChargeElement, ReviewChargeReference, ReviewStatus};
pub use store::{MemoryReviewStore, ReviewStore, StoreError};
