//! Time-series utilities used by the aggregation pipeline.
//!
//! Modules include:
//! - `infer`: infer candle intervals from observation cadence
//! - `aggregate`: fold observations into OHLC buckets
//! - `order`: deterministic ordering of the produced candles
//! - `util`: the bucket truncation grid
/// Candle aggregation over interval-aligned buckets.
pub mod aggregate;
/// Interval inference from timestamp transitions.
pub mod infer;
/// Canonical candle ordering.
pub mod order;
/// Truncation helpers shared by inference and aggregation.
pub mod util;
