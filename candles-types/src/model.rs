//! Observation and candle records.

use chrono::{DateTime, FixedOffset};

use crate::CandleInterval;

/// A single price observation for an instrument.
///
/// The timestamp keeps the offset it was written with; bucketing uses the
/// absolute instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Instrument the observation belongs to.
    pub instrument_id: String,
    /// Observed price.
    pub price: f64,
    /// Observation time.
    pub ts: DateTime<FixedOffset>,
}

impl Observation {
    /// Convenience constructor.
    pub fn new(instrument_id: impl Into<String>, price: f64, ts: DateTime<FixedOffset>) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            price,
            ts,
        }
    }
}

/// OHLC aggregate of the observations of one instrument inside
/// `[bucket_start, bucket_start + interval)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Instrument the candle aggregates.
    pub instrument_id: String,
    /// Price of the first member observation.
    pub open: f64,
    /// Highest member price.
    pub high: f64,
    /// Lowest member price.
    pub low: f64,
    /// Price of the last member observation.
    pub close: f64,
    /// Inclusive start of the bucket, aligned to the `interval` grid.
    pub bucket_start: DateTime<FixedOffset>,
    /// Bucket length.
    pub interval: CandleInterval,
}

impl Candle {
    /// Exclusive end of the bucket.
    #[must_use]
    pub fn bucket_end(&self) -> DateTime<FixedOffset> {
        self.bucket_start + self.interval.as_delta()
    }

    /// Whether `ts` falls inside the bucket, compared at whole-second resolution.
    #[must_use]
    pub fn contains(&self, ts: &DateTime<FixedOffset>) -> bool {
        let start = self.bucket_start.timestamp();
        let secs = ts.timestamp();
        start <= secs && secs < start + self.interval.as_seconds()
    }
}
