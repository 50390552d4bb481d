//! Data model and configuration primitives shared by the candles workspace.
#![warn(missing_docs)]

mod config;
mod error;
mod interval;
mod model;

pub use config::{AggregationConfig, PriceOrder};
pub use error::CandlesError;
pub use interval::CandleInterval;
pub use model::{Candle, Observation};
