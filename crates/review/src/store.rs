// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage boundary for review records.
//!
//! The relational store behind the review pages is not part of this crate;
//! the workflow only needs to fetch a review charge reference and patch its
//! amended values. `MemoryReviewStore` backs tests and the command line.

use crate::review_record::ReviewChargeReference;
use rust_decimal::Decimal;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised by a review store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The record to update does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Stored data could not be read.
    #[error("Failed to load review records: {0}")]
    Load(String),

    /// The store could not be reached.
    #[error("Review store unavailable: {0}")]
    Unavailable(String),
}

/// Read and patch access to review charge references.
pub trait ReviewStore {
    /// Fetches a review charge reference with its elements and returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried. A missing record is
    /// `Ok(None)`.
    fn fetch_review_charge_reference(
        &self,
        id: &str,
    ) -> Result<Option<ReviewChargeReference>, StoreError>;

    /// Records the reviewed authorised volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or cannot be updated.
    fn update_authorised_volume(&mut self, id: &str, volume: Decimal) -> Result<(), StoreError>;

    /// Records the reviewed aggregate and charge adjustment factors.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or cannot be updated.
    fn update_adjustment_factors(
        &mut self,
        id: &str,
        aggregate: Decimal,
        charge_adjustment: Decimal,
    ) -> Result<(), StoreError>;
}

/// In-memory review store keyed by review charge reference id.
#[derive(Debug, Clone, Default)]
pub struct MemoryReviewStore {
    records: HashMap<String, ReviewChargeReference>,
}

impl MemoryReviewStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a JSON array of review charge references.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Load` if the JSON is malformed or a record fails
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let records: Vec<ReviewChargeReference> =
            serde_json::from_str(json).map_err(|e| StoreError::Load(e.to_string()))?;

        let mut store: Self = Self::new();
        for record in records {
            store.insert(record);
        }
        debug!(records = store.records.len(), "Loaded review records");

        Ok(store)
    }

    /// Adds or replaces a record.
    pub fn insert(&mut self, record: ReviewChargeReference) {
        self.records.insert(record.id.clone(), record);
    }

    /// Returns the ids of all records, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn record_mut(&mut self, id: &str) -> Result<&mut ReviewChargeReference, StoreError> {
        self.records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl ReviewStore for MemoryReviewStore {
    fn fetch_review_charge_reference(
        &self,
        id: &str,
    ) -> Result<Option<ReviewChargeReference>, StoreError> {
        Ok(self.records.get(id).cloned())
    }

    fn update_authorised_volume(&mut self, id: &str, volume: Decimal) -> Result<(), StoreError> {
        self.record_mut(id)?.amended_authorised_volume = volume;
        Ok(())
    }

    fn update_adjustment_factors(
        &mut self,
        id: &str,
        aggregate: Decimal,
        charge_adjustment: Decimal,
    ) -> Result<(), StoreError> {
        let record: &mut ReviewChargeReference = self.record_mut(id)?;
        record.amended_aggregate = Some(aggregate);
        record.amended_charge_adjustment = Some(charge_adjustment);
        Ok(())
    }
}
