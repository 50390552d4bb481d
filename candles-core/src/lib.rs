//! candles-core
//!
//! Time-series building blocks for turning raw price observations into OHLC
//! candles.
//!
//! - `timeseries::infer`: discover the candle intervals a series supports.
//! - `timeseries::aggregate`: fold observations into interval-aligned buckets.
//! - `timeseries::order`: the canonical output ordering of candles.
//!
//! Everything here is synchronous and allocation-local; no state survives a
//! call.
#![warn(missing_docs)]

/// Time-series utilities for inference, aggregation, and ordering.
pub mod timeseries;

pub use candles_types::{
    AggregationConfig, Candle, CandleInterval, CandlesError, Observation, PriceOrder,
};
pub use timeseries::aggregate::{aggregate, aggregate_with_order};
pub use timeseries::infer::infer_intervals;
pub use timeseries::order::{candle_order, sort_candles};
pub use timeseries::util::{GRID_ORIGIN_OFFSET, bucket_start, truncate_secs};
