use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the candles workspace.
///
/// Parse failures carry the 1-based input line number so the diagnostic can
/// point at the offending record. Foreign errors are flattened to strings to
/// keep the type `Clone` and serializable.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CandlesError {
    /// A record did not have the three required comma-separated fields.
    #[error("bad user input at line {line}: {record}")]
    MalformedRecord {
        /// 1-based line number of the record.
        line: usize,
        /// The raw record text.
        record: String,
    },

    /// The price field could not be parsed as a finite 64-bit float.
    #[error("invalid price {value:?} at line {line}: {reason}")]
    InvalidPrice {
        /// 1-based line number of the record.
        line: usize,
        /// The raw price field.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The timestamp field is not a valid RFC 3339 timestamp.
    #[error("invalid timestamp {value:?} at line {line}: {reason}")]
    InvalidTimestamp {
        /// 1-based line number of the record.
        line: usize,
        /// The raw timestamp field.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A bucket selected for aggregation had no member observations.
    ///
    /// Indicates an internal inconsistency in bucket construction.
    #[error("internal error: empty bucket {bucket_start} for {instrument}")]
    EmptyBucket {
        /// Instrument whose bucket was empty.
        instrument: String,
        /// RFC 3339 rendering of the bucket start.
        bucket_start: String,
    },

    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(String),
}

impl CandlesError {
    /// Helper: build a `MalformedRecord` error.
    pub fn malformed(line: usize, record: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            record: record.into(),
        }
    }

    /// Helper: build an `InvalidPrice` error.
    pub fn invalid_price(line: usize, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            line,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build an `InvalidTimestamp` error.
    pub fn invalid_timestamp(
        line: usize,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTimestamp {
            line,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build an `EmptyBucket` error.
    pub fn empty_bucket(instrument: impl Into<String>, bucket_start: impl Into<String>) -> Self {
        Self::EmptyBucket {
            instrument: instrument.into(),
            bucket_start: bucket_start.into(),
        }
    }

    /// Returns true if the error was caused by the input data rather than by
    /// the environment or an internal defect.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. } | Self::InvalidPrice { .. } | Self::InvalidTimestamp { .. }
        )
    }
}

impl From<std::io::Error> for CandlesError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
