//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, PoisonError, RwLock};

use crate::calculation::{CURRENT_TABLES, TaxTables};
use crate::config::RateStore;
use crate::models::{ConsumptionTaxTreatment, RateSet};

/// Shared application state.
///
/// Holds the session rates (the values the calculator uses), the store they
/// are persisted to, and the tables in force. Concurrent rate updates are
/// last-write-wins.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RateStore>,
    rates: Arc<RwLock<RateSet>>,
    treatment: ConsumptionTaxTreatment,
    tables: TaxTables,
}

impl AppState {
    /// Creates the state with the given store and initial session rates.
    pub fn new(store: RateStore, rates: RateSet, treatment: ConsumptionTaxTreatment) -> Self {
        Self {
            store: Arc::new(store),
            rates: Arc::new(RwLock::new(rates)),
            treatment,
            tables: CURRENT_TABLES,
        }
    }

    /// Creates the state with rates loaded from the store.
    pub fn load(store: RateStore, treatment: ConsumptionTaxTreatment) -> Self {
        let rates = store.load();
        Self::new(store, rates, treatment)
    }

    /// Returns the current session rates.
    pub fn rates(&self) -> RateSet {
        // RateSet is Copy, so a poisoned lock still holds a whole value.
        *self.rates.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the session rates.
    pub fn set_rates(&self, rates: RateSet) {
        *self.rates.write().unwrap_or_else(PoisonError::into_inner) = rates;
    }

    /// Returns the rate store.
    pub fn store(&self) -> &RateStore {
        &self.store
    }

    /// Returns the default CBS/IBS treatment.
    pub fn treatment(&self) -> ConsumptionTaxTreatment {
        self.treatment
    }

    /// Returns the tables in force.
    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }
}
