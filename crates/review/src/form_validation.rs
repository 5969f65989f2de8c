// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of the review amendment forms.
//!
//! Form fields arrive as the raw text the user typed. Each validator parses
//! and checks the input, returning the value to store or the message to show
//! beside the field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Maximum decimal places accepted for an authorised volume.
pub const AUTHORISED_VOLUME_MAX_DECIMAL_PLACES: usize = 6;

/// Maximum decimal places accepted for an adjustment factor.
pub const FACTOR_MAX_DECIMAL_PLACES: usize = 15;

/// The adjustment factor a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    /// The aggregate factor.
    Aggregate,
    /// The charge adjustment factor.
    Charge,
}

impl Factor {
    /// Returns the field label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate factor",
            Self::Charge => "charge factor",
        }
    }

    const fn article(self) -> &'static str {
        match self {
            Self::Aggregate => "an",
            Self::Charge => "a",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A rejected form submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormValidationError {
    /// No authorised volume was entered.
    #[error("Enter an authorised volume")]
    MissingAuthorisedVolume,

    /// The authorised volume is not a number.
    #[error("The authorised volume must be a number")]
    AuthorisedVolumeNotNumber,

    /// The authorised volume is below the volume already billed from returns.
    #[error("The authorised volume must be greater than {total_billable_returns}")]
    AuthorisedVolumeBelowReturns {
        /// Sum of return volumes allocated to the reference.
        total_billable_returns: Decimal,
    },

    /// The authorised volume has too many decimal places.
    #[error("The authorised volume must not have more than {max} decimal places")]
    AuthorisedVolumeTooPrecise {
        /// The number of decimal places allowed.
        max: usize,
    },

    /// No factor was entered.
    #[error("Enter {} {factor}", .factor.article())]
    MissingFactor {
        /// The factor field.
        factor: Factor,
    },

    /// The factor is not a number.
    #[error("The {factor} must be a number")]
    FactorNotNumber {
        /// The factor field.
        factor: Factor,
    },

    /// The factor is zero or negative.
    #[error("The {factor} must be greater than 0")]
    FactorNotPositive {
        /// The factor field.
        factor: Factor,
    },

    /// The factor has too many decimal places.
    #[error("The {factor} must not have more than {max} decimal places")]
    FactorTooPrecise {
        /// The factor field.
        factor: Factor,
        /// The number of decimal places allowed.
        max: usize,
    },
}

/// Submitted authorised volume form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorisedVolumeForm {
    /// The volume as typed.
    pub authorised_volume: Option<String>,
}

/// Submitted adjustment factors form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentFactorsForm {
    /// The aggregate factor as typed.
    pub amended_aggregate_factor: Option<String>,
    /// The charge adjustment factor as typed.
    pub amended_charge_adjustment: Option<String>,
}

/// Validated adjustment factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentFactors {
    /// The aggregate factor.
    pub aggregate: Decimal,
    /// The charge adjustment factor.
    pub charge_adjustment: Decimal,
}

enum FieldProblem {
    Missing,
    NotNumber,
    TooPrecise,
}

/// Plain decimal notation: an optional sign, digits, and at most one point.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned: &str = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|byte| byte.is_ascii_digit())
        && fraction.bytes().all(|byte| byte.is_ascii_digit())
}

fn parse_decimal_field(
    raw: Option<&str>,
    max_decimal_places: usize,
) -> Result<Decimal, FieldProblem> {
    let text: &str = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(FieldProblem::Missing);
    }

    if !is_plain_decimal(text) {
        return Err(FieldProblem::NotNumber);
    }
    let value: Decimal = Decimal::from_str(text).map_err(|_| FieldProblem::NotNumber)?;

    let decimal_places: usize = text
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len());
    if decimal_places > max_decimal_places {
        return Err(FieldProblem::TooPrecise);
    }

    Ok(value)
}

/// Validates a submitted authorised volume.
///
/// The volume may equal the total billable returns but not fall below it.
///
/// # Errors
///
/// Returns the `FormValidationError` to show against the field.
pub fn validate_authorised_volume(
    form: &AuthorisedVolumeForm,
    total_billable_returns: Decimal,
) -> Result<Decimal, FormValidationError> {
    let volume: Decimal = parse_decimal_field(
        form.authorised_volume.as_deref(),
        AUTHORISED_VOLUME_MAX_DECIMAL_PLACES,
    )
    .map_err(|problem| match problem {
        FieldProblem::Missing => FormValidationError::MissingAuthorisedVolume,
        FieldProblem::NotNumber => FormValidationError::AuthorisedVolumeNotNumber,
        FieldProblem::TooPrecise => FormValidationError::AuthorisedVolumeTooPrecise {
            max: AUTHORISED_VOLUME_MAX_DECIMAL_PLACES,
        },
    })?;

    if volume < total_billable_returns {
        return Err(FormValidationError::AuthorisedVolumeBelowReturns {
            total_billable_returns,
        });
    }

    Ok(volume)
}

fn validate_factor(raw: Option<&str>, factor: Factor) -> Result<Decimal, FormValidationError> {
    let value: Decimal =
        parse_decimal_field(raw, FACTOR_MAX_DECIMAL_PLACES).map_err(|problem| match problem {
            FieldProblem::Missing => FormValidationError::MissingFactor { factor },
            FieldProblem::NotNumber => FormValidationError::FactorNotNumber { factor },
            FieldProblem::TooPrecise => FormValidationError::FactorTooPrecise {
                factor,
                max: FACTOR_MAX_DECIMAL_PLACES,
            },
        })?;

    if value <= Decimal::ZERO {
        return Err(FormValidationError::FactorNotPositive { factor });
    }

    Ok(value)
}

/// Validates submitted adjustment factors.
///
/// The aggregate factor is checked first.
///
/// # Errors
///
/// Returns the `FormValidationError` for the first invalid field.
pub fn validate_adjustment_factors(
    form: &AdjustmentFactorsForm,
) -> Result<AdjustmentFactors, FormValidationError> {
    let aggregate: Decimal =
        validate_factor(form.amended_aggregate_factor.as_deref(), Factor::Aggregate)?;
    let charge_adjustment: Decimal =
        validate_factor(form.amended_charge_adjustment.as_deref(), Factor::Charge)?;

    Ok(AdjustmentFactors {
        aggregate,
        charge_adjustment,
    })
}
