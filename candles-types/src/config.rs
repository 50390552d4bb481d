//! Configuration types shared by the aggregator and the command-line front end.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CandleInterval, CandlesError};

/// Which observation counts as "first" and "last" inside a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceOrder {
    /// Open and close follow input line order, even when the input is not
    /// time-sorted. This matches the historical output of the tool.
    #[default]
    InputOrder,
    /// Open and close follow timestamp order; ties keep input order.
    Chronological,
}

/// Configuration for a single aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Candidate base durations probed by interval inference, in probe order.
    pub base_intervals: Vec<Duration>,
    /// Open/close selection rule inside a bucket.
    pub price_order: PriceOrder,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            base_intervals: vec![
                Duration::from_secs(60),
                Duration::from_secs(2 * 60),
                Duration::from_secs(5 * 60),
            ],
            price_order: PriceOrder::InputOrder,
        }
    }
}

impl AggregationConfig {
    /// Check the catalog and convert it to candle intervals.
    ///
    /// # Errors
    /// Returns `CandlesError::InvalidArg` if the catalog is empty or contains a
    /// zero or fractional-second duration.
    pub fn validate(&self) -> Result<Vec<CandleInterval>, CandlesError> {
        if self.base_intervals.is_empty() {
            return Err(CandlesError::InvalidArg(
                "base interval catalog must not be empty".into(),
            ));
        }
        self.base_intervals
            .iter()
            .map(|d| {
                CandleInterval::from_std(*d).ok_or_else(|| {
                    CandlesError::InvalidArg(format!(
                        "base interval must be a positive whole number of seconds, got {d:?}"
                    ))
                })
            })
            .collect()
    }
}
