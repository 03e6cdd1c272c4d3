#![doc(test(attr(deny(warnings))))]

//! Forecast Core offers recurring-transaction expansion, balance projection,
//! and budget-threshold alerting primitives that power higher level
//! personal-finance workflows.
//!
//! The crate is a pure data-in/data-out engine: record stores, notification
//! delivery, and clocks live with the caller. Every public function takes an
//! explicit reference date and borrows its inputs immutably, so identical
//! inputs always yield identical output.

pub mod alerts;
pub mod domain;
pub mod errors;
pub mod projection;
pub mod records;
pub mod recurrence;
pub mod reports;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Forecast Core tracing initialized.");
    });
}
