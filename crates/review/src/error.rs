// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the review workflow.

use crate::charging_module::ChargingModuleError;
use crate::store::StoreError;
use wrls_domain::DomainError;

/// Errors raised while reviewing a charge reference.
///
/// Invalid form input is not an error; it is reported back through the
/// submission outcome so the form can be shown again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// The review charge reference does not exist.
    ChargeReferenceNotFound {
        /// The review charge reference identifier.
        id: String,
    },
    /// The charge element index is out of range for the reference.
    ChargeElementNotFound {
        /// The review charge reference identifier.
        id: String,
        /// The 1-based element index requested.
        element_index: usize,
    },
    /// The review store failed.
    Store(StoreError),
    /// The Charging Module could not calculate the charge.
    ChargingModule(ChargingModuleError),
    /// A domain value could not be built.
    Domain(DomainError),
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChargeReferenceNotFound { id } => {
                write!(f, "Review charge reference '{id}' not found")
            }
            Self::ChargeElementNotFound { id, element_index } => {
                write!(
                    f,
                    "Charge element {element_index} not found on review charge reference '{id}'"
                )
            }
            Self::Store(err) => write!(f, "Review store error: {err}"),
            Self::ChargingModule(err) => write!(f, "Charging Module error: {err}"),
            Self::Domain(err) => write!(f, "Domain error: {err}"),
        }
    }
}

impl std::error::Error for ReviewError {}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<StoreError> for ReviewError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ChargingModuleError> for ReviewError {
    fn from(err: ChargingModuleError) -> Self {
        Self::ChargingModule(err)
    }
}
