//! candles turns timestamped price observations into OHLC candles over
//! intervals inferred from the data itself.
//!
//! Overview
//! - Groups observations by instrument id, keeping input order per instrument.
//! - Infers the candle intervals each instrument's cadence supports by probing
//!   a small catalog of base intervals (1, 2 and 5 minutes by default).
//! - Aggregates each (instrument, interval) pair into interval-aligned buckets.
//! - Sorts the result by instrument id, interval, then bucket start.
//!
//! Key behaviors and trade-offs
//! - Batch only: the full input is read before any aggregation starts.
//! - Open/close follow input line order by default, so an unsorted input can
//!   open a bucket with a price that is not the earliest one. Select
//!   `PriceOrder::Chronological` to order by timestamp instead.
//! - Bucket membership is decided at whole-second resolution.
//! - The first malformed record aborts the run; no partial output is written.
//!
//! Examples
//! ```rust
//! use candles::Aggregator;
//! use candles::io::{CandleWriter, read_observations};
//!
//! let input = "A,10.00,2024-01-01T00:00:00Z\n\
//!              A,12.00,2024-01-01T00:00:30Z\n\
//!              A,11.00,2024-01-01T00:01:10Z\n\n";
//! let observations = read_observations(input.as_bytes()).unwrap();
//! let candles = Aggregator::builder().build().unwrap().run(observations).unwrap();
//!
//! let mut writer = CandleWriter::new(Vec::new());
//! writer.write_all(&candles).unwrap();
//! let out = String::from_utf8(writer.finish().unwrap()).unwrap();
//! assert_eq!(
//!     out,
//!     "A,10.00,12.00,10.00,12.00,2024-01-01T00:00:00Z,1m\n\
//!      A,11.00,11.00,11.00,11.00,2024-01-01T00:01:00Z,1m\n"
//! );
//! ```
#![warn(missing_docs)]

/// Command-line front end used by the `candles` binary.
#[cfg(feature = "cli")]
pub mod cli;
pub(crate) mod core;
/// Observation input and candle CSV output.
pub mod io;

pub use self::core::{Aggregator, AggregatorBuilder, group_by_instrument};

// Re-export core types for convenience
pub use candles_core::{
    AggregationConfig, Candle, CandleInterval, CandlesError, Observation, PriceOrder,
};
