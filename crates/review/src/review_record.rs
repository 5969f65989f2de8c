// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Records produced by two-part tariff return matching.
//!
//! A two-part tariff bill run matches a licence's returns to its charge
//! elements and stores the result as review records. Billing staff review
//! those records, amend volumes and factors where needed, and then send the
//! bill run on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use wrls_domain::{
    Adjustments, ChargeElement, ChargePeriod, ChargeReference, FinancialYear,
    total_billable_returns,
};

/// Review status of a charge element or return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Matching found nothing that needs checking.
    Ready,
    /// Matching raised issues that need a person to check.
    Review,
}

impl ReviewStatus {
    /// Returns the status label shown to staff.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Review => "review",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A return log matched to a charge element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedReturn {
    /// Return reference, e.g. "10031343".
    pub return_reference: String,
    /// Purpose description from the return.
    pub description: String,
    /// Start of the return period.
    pub start_date: Date,
    /// End of the return period.
    pub end_date: Date,
    /// Total quantity reported on the return (megalitres).
    pub quantity: Decimal,
    /// Quantity of the return allocated to the element (megalitres).
    pub allocated: Decimal,
    /// Review status of the return.
    pub status: ReviewStatus,
}

/// Matching result for a single charge element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewChargeElement {
    /// The charge element being reviewed.
    pub charge_element: ChargeElement,
    /// Review status.
    pub status: ReviewStatus,
    /// Issues raised while matching, e.g. "Aggregate" or "Over abstraction".
    #[serde(default)]
    pub issues: Vec<String>,
    /// Returns matched to the element.
    #[serde(default)]
    pub matched_returns: Vec<MatchedReturn>,
}

/// Matching result for a single charge reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewChargeReference {
    /// Identifier of the review record.
    pub id: String,
    /// The bill run the review belongs to.
    pub bill_run_id: String,
    /// Identifier of the licence.
    pub licence_id: String,
    /// Licence reference, e.g. "01/123/ABC".
    pub licence_ref: String,
    /// Financial year being billed.
    pub financial_year: FinancialYear,
    /// The part of the financial year being charged.
    pub charge_period: ChargePeriod,
    /// The charge reference recorded against the licence.
    pub charge_reference: ChargeReference,
    /// Authorised volume after review (megalitres).
    pub amended_authorised_volume: Decimal,
    /// Aggregate factor after review.
    pub amended_aggregate: Option<Decimal>,
    /// Charge adjustment factor after review.
    pub amended_charge_adjustment: Option<Decimal>,
    /// Matching results for each charge element.
    pub charge_elements: Vec<ReviewChargeElement>,
}

impl ReviewChargeReference {
    /// Sums the return volume allocated across all charge elements.
    #[must_use]
    pub fn total_billable_returns(&self) -> Decimal {
        total_billable_returns(
            self.charge_elements
                .iter()
                .map(|element| &element.charge_element),
        )
    }

    /// Returns the adjustments in effect, with amended factors applied.
    ///
    /// A factor not yet amended keeps the value recorded against the licence.
    #[must_use]
    pub fn effective_adjustments(&self) -> Adjustments {
        let recorded: &Adjustments = &self.charge_reference.adjustments;
        recorded.with_factors(
            self.amended_aggregate.or(recorded.aggregate),
            self.amended_charge_adjustment.or(recorded.charge),
        )
    }
}
