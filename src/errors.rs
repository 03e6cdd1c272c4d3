use thiserror::Error;
use uuid::Uuid;

/// Error type that captures the recoverable failures this engine can signal.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Expansion truncated for series {0}: occurrence cap reached before window end")]
    ExpansionTruncated(Uuid),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
