// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::RefCell;
use time::macros::date;
use wrls_domain::{
    AbstractionWindow, AdditionalCharges, Adjustments, ChargeElement, ChargePeriod,
    ChargeReference, FinancialYear, Loss,
};

use crate::{
    CalculateChargeRequest, CalculateChargeResponse, ChargingModule, ChargingModuleError,
    MatchedReturn, MemoryReviewStore, ReviewChargeElement, ReviewChargeReference, ReviewStatus,
    ReviewStore, StoreError,
};

pub const TEST_REFERENCE_ID: &str = "review-ref-1";

pub const REVIEW_FIXTURE_JSON: &str = include_str!("../../../../demos/review_fixture.json");

pub fn create_test_element(
    description: &str,
    window: (u8, u8, u8, u8),
    authorised: Decimal,
    allocated: Decimal,
    status: ReviewStatus,
) -> ReviewChargeElement {
    let (start_day, start_month, end_day, end_month) = window;
    ReviewChargeElement {
        charge_element: ChargeElement::new(
            String::from(description),
            AbstractionWindow::new(start_day, start_month, end_day, end_month).unwrap(),
            authorised,
            allocated,
        )
        .unwrap(),
        status,
        issues: Vec::new(),
        matched_returns: Vec::new(),
    }
}

/// Review record matching `review-ref-1` in the demo fixture.
///
/// Summer element 1 April to 31 October, winter element 1 November to
/// 31 March, 14.75 ML allocated from returns in total.
pub fn create_test_record() -> ReviewChargeReference {
    let mut summer: ReviewChargeElement = create_test_element(
        "Spray irrigation - direct",
        (1, 4, 31, 10),
        dec!(20),
        dec!(10.5),
        ReviewStatus::Ready,
    );
    summer.matched_returns.push(MatchedReturn {
        return_reference: String::from("10031343"),
        description: String::from("Spray irrigation at Example Farm"),
        start_date: date!(2023 - 04 - 01),
        end_date: date!(2024 - 03 - 31),
        quantity: dec!(12),
        allocated: dec!(10.5),
        status: ReviewStatus::Ready,
    });

    let mut winter: ReviewChargeElement = create_test_element(
        "Spray irrigation - storage",
        (1, 11, 31, 3),
        dec!(12),
        dec!(4.25),
        ReviewStatus::Review,
    );
    winter.issues.push(String::from("Aggregate"));

    ReviewChargeReference {
        id: String::from(TEST_REFERENCE_ID),
        bill_run_id: String::from("bill-run-2024-tpt"),
        licence_id: String::from("licence-1"),
        licence_ref: String::from("01/123/ABC"),
        financial_year: FinancialYear::ending(2024),
        charge_period: ChargePeriod::new(date!(2023 - 04 - 01), date!(2024 - 03 - 31)).unwrap(),
        charge_reference: ChargeReference {
            charge_category_code: String::from("4.6.12"),
            description: String::from(
                "High loss, non-tidal, restricted water, up to and including 15 ML/yr, Tier 1 model",
            ),
            volume: dec!(32),
            loss: Loss::High,
            water_undertaker: false,
            adjustments: Adjustments {
                aggregate: Some(dec!(0.5)),
                s127: true,
                ..Adjustments::default()
            },
            additional_charges: AdditionalCharges::default(),
        },
        amended_authorised_volume: dec!(32),
        amended_aggregate: Some(dec!(0.5)),
        amended_charge_adjustment: None,
        charge_elements: vec![summer, winter],
    }
}

pub fn create_test_store() -> MemoryReviewStore {
    let mut store: MemoryReviewStore = MemoryReviewStore::new();
    store.insert(create_test_record());
    store
}

/// Charging Module double returning a fixed charge and recording requests.
pub struct FakeChargingModule {
    pub charge_value: i64,
    pub requests: RefCell<Vec<CalculateChargeRequest>>,
}

impl FakeChargingModule {
    pub const fn new(charge_value: i64) -> Self {
        Self {
            charge_value,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl ChargingModule for FakeChargingModule {
    fn calculate_charge(
        &self,
        request: &CalculateChargeRequest,
    ) -> Result<CalculateChargeResponse, ChargingModuleError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(CalculateChargeResponse {
            charge_value: self.charge_value,
        })
    }
}

/// Charging Module double that rejects every request.
pub struct RejectingChargingModule;

impl ChargingModule for RejectingChargingModule {
    fn calculate_charge(
        &self,
        _request: &CalculateChargeRequest,
    ) -> Result<CalculateChargeResponse, ChargingModuleError> {
        Err(ChargingModuleError::Rejected {
            status: 422,
            message: String::from("\"chargeCategoryCode\" is required"),
        })
    }
}

/// Store double that is never reachable.
pub struct UnavailableStore;

impl ReviewStore for UnavailableStore {
    fn fetch_review_charge_reference(
        &self,
        _id: &str,
    ) -> Result<Option<ReviewChargeReference>, StoreError> {
        Err(StoreError::Unavailable(String::from("connection refused")))
    }

    fn update_authorised_volume(&mut self, _id: &str, _volume: Decimal) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(String::from("connection refused")))
    }

    fn update_adjustment_factors(
        &mut self,
        _id: &str,
        _aggregate: Decimal,
        _charge_adjustment: Decimal,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(String::from("connection refused")))
    }
}
