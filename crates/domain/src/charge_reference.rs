// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Charge reference and charge element model.
//!
//! A charge reference is the charge category a licence is billed under,
//! together with the adjustments and additional charges that apply to it.
//! Charge elements are the individual purposes of abstraction billed under a
//! reference, each with its own abstraction window.

use crate::abstraction_period::AbstractionWindow;
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The loss category of a charge reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loss {
    /// High loss.
    High,
    /// Medium loss.
    Medium,
    /// Low loss.
    Low,
}

impl Loss {
    /// Returns the lowercase name used by the Charging Module.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Loss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Adjustments applied to a charge reference.
///
/// Factors of exactly 1 and `false` flags have no effect on the charge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adjustments {
    /// Aggregate factor.
    pub aggregate: Option<Decimal>,
    /// Charge adjustment factor.
    pub charge: Option<Decimal>,
    /// Abatement agreement factor (section 126).
    pub s126: Option<Decimal>,
    /// Two-part tariff agreement (section 127).
    pub s127: bool,
    /// Canal and River Trust agreement (section 130).
    pub s130: bool,
    /// Winter discount.
    pub winter: bool,
}

impl Adjustments {
    /// Returns a copy with the aggregate and charge factors replaced.
    ///
    /// Used to show factors amended during a review in place of the ones
    /// recorded against the licence.
    #[must_use]
    pub fn with_factors(&self, aggregate: Option<Decimal>, charge: Option<Decimal>) -> Self {
        Self {
            aggregate,
            charge,
            ..self.clone()
        }
    }
}

/// A supported source the licence draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedSource {
    /// Name of the source, e.g. "Thames".
    pub name: String,
    /// Charge for the source in pence.
    pub charge_pence: i64,
}

/// Additional charges applied on top of the charge category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdditionalCharges {
    /// Supported source charge, if any.
    pub supported_source: Option<SupportedSource>,
    /// Whether the water is supplied for public water supply.
    pub is_supply_public_water: bool,
}

/// A single purpose of abstraction under a charge reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChargeElementFields")]
pub struct ChargeElement {
    /// Purpose description, e.g. "Spray irrigation - direct".
    pub description: String,
    /// Recurring window during which abstraction is permitted.
    pub abstraction_window: AbstractionWindow,
    /// Annual quantity authorised by the licence (megalitres).
    pub authorised_annual_quantity: Decimal,
    /// Return volume allocated to this element during matching (megalitres).
    pub allocated_quantity: Decimal,
}

impl ChargeElement {
    /// Creates a new `ChargeElement`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVolume` if either quantity is negative.
    pub fn new(
        description: String,
        abstraction_window: AbstractionWindow,
        authorised_annual_quantity: Decimal,
        allocated_quantity: Decimal,
    ) -> Result<Self, DomainError> {
        if authorised_annual_quantity.is_sign_negative() {
            return Err(DomainError::InvalidVolume {
                field: "authorised annual quantity",
                value: authorised_annual_quantity.to_string(),
            });
        }
        if allocated_quantity.is_sign_negative() {
            return Err(DomainError::InvalidVolume {
                field: "allocated quantity",
                value: allocated_quantity.to_string(),
            });
        }

        Ok(Self {
            description,
            abstraction_window,
            authorised_annual_quantity,
            allocated_quantity,
        })
    }
}

/// Unvalidated charge element as read from storage.
#[derive(Deserialize)]
struct ChargeElementFields {
    description: String,
    abstraction_window: AbstractionWindow,
    authorised_annual_quantity: Decimal,
    allocated_quantity: Decimal,
}

impl TryFrom<ChargeElementFields> for ChargeElement {
    type Error = DomainError;

    fn try_from(fields: ChargeElementFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.description,
            fields.abstraction_window,
            fields.authorised_annual_quantity,
            fields.allocated_quantity,
        )
    }
}

/// The charge category a licence is billed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReference {
    /// Charge category code, e.g. "4.6.12".
    pub charge_category_code: String,
    /// Charge category description.
    pub description: String,
    /// Authorised volume for the reference (megalitres).
    pub volume: Decimal,
    /// Loss category.
    pub loss: Loss,
    /// Whether the licence holder is a water undertaker.
    pub water_undertaker: bool,
    /// Adjustments recorded against the reference.
    #[serde(default)]
    pub adjustments: Adjustments,
    /// Additional charges recorded against the reference.
    #[serde(default)]
    pub additional_charges: AdditionalCharges,
}
