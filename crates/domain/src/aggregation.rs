// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reductions over charge elements and charge reference adjustments.

use crate::charge_reference::{AdditionalCharges, Adjustments, ChargeElement};
use crate::formatting::format_money;
use rust_decimal::Decimal;

/// Sums the return volume allocated to each charge element.
#[must_use]
pub fn total_billable_returns<'a, I>(charge_elements: I) -> Decimal
where
    I: IntoIterator<Item = &'a ChargeElement>,
{
    charge_elements
        .into_iter()
        .map(|element| element.allocated_quantity)
        .sum()
}

/// Keeps a factor only when it changes the charge.
fn applied_factor(factor: Option<Decimal>) -> Option<Decimal> {
    factor.filter(|value| *value != Decimal::ONE)
}

/// Lists the adjustments that affect the charge, in display order.
///
/// Factors of exactly 1 and unset flags are left out.
#[must_use]
pub fn adjustment_descriptions(adjustments: &Adjustments) -> Vec<String> {
    let mut descriptions: Vec<String> = Vec::new();

    if let Some(aggregate) = applied_factor(adjustments.aggregate) {
        descriptions.push(format!("Aggregate factor ({})", aggregate.normalize()));
    }
    if let Some(charge) = applied_factor(adjustments.charge) {
        descriptions.push(format!("Charge adjustment ({})", charge.normalize()));
    }
    if let Some(s126) = applied_factor(adjustments.s126) {
        descriptions.push(format!("Abatement agreement ({})", s126.normalize()));
    }
    if adjustments.s127 {
        descriptions.push(String::from("Two part tariff agreement"));
    }
    if adjustments.s130 {
        descriptions.push(String::from("Canal and River Trust agreement"));
    }
    if adjustments.winter {
        descriptions.push(String::from("Winter discount"));
    }

    descriptions
}

/// Lists the additional charges that apply to a charge reference.
#[must_use]
pub fn additional_charge_descriptions(additional_charges: &AdditionalCharges) -> Vec<String> {
    let mut descriptions: Vec<String> = Vec::new();

    if let Some(source) = &additional_charges.supported_source {
        descriptions.push(format!(
            "Supported source {} ({})",
            source.name,
            format_money(source.charge_pence)
        ));
    }
    if additional_charges.is_supply_public_water {
        descriptions.push(String::from("Public Water Supply"));
    }

    descriptions
}

/// Returns whether an aggregate or charge adjustment factor is in effect.
#[must_use]
pub fn has_aggregate_or_charge_factor(adjustments: &Adjustments) -> bool {
    applied_factor(adjustments.aggregate).is_some()
        || applied_factor(adjustments.charge).is_some()
}
