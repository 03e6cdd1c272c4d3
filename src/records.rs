//! Lenient decoding of store snapshots.
//!
//! The external record store hands the engine raw JSON documents. A single
//! malformed record (bad date, missing field) must not abort a recomputation
//! pass, so batch decoding skips and logs bad entries while [`decode`] stays
//! strict for callers that want the failure.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::errors::{ForecastError, Result};

/// Strictly decodes one record.
pub fn decode<T: DeserializeOwned>(record: &Value) -> Result<T> {
    serde_json::from_value(record.clone())
        .map_err(|err| ForecastError::MalformedRecord(err.to_string()))
}

/// Decodes a batch of records, skipping malformed entries.
///
/// Skipped entries are logged at `warn` with the record kind so the caller
/// can re-fetch cleaner data if the count looks wrong.
pub fn decode_all<T: DeserializeOwned>(records: &[Value], kind: &str) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| match decode::<T>(record) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(%err, kind, "skipping malformed record");
                None
            }
        })
        .collect()
}
