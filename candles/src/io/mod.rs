//! Line-oriented input and CSV output.

/// Observation record parsing.
pub mod reader;
/// Candle CSV emission.
pub mod writer;

pub use reader::{parse_record, read_observations};
pub use writer::{CandleWriter, candle_record};
