//! Command-line front end.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use candles_core::{Candle, CandlesError, PriceOrder};
use clap::{Parser, ValueEnum};

use crate::Aggregator;
use crate::io::{CandleWriter, read_observations};

/// Aggregate timestamped price observations into OHLC candles over inferred
/// intervals.
///
/// Reads `instrument_id,price,timestamp` records until the first empty line
/// and writes `instrument_id,open,high,low,close,bucket_start,interval` rows.
#[derive(Debug, Parser)]
#[command(name = "candles", version, about, long_about = None)]
pub struct Cli {
    /// Read observations from PATH instead of standard input.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write candles to PATH instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Which observation opens and closes a bucket.
    #[arg(long, value_enum, default_value_t = PriceOrderArg::Input)]
    pub price_order: PriceOrderArg,
}

/// CLI spelling of [`PriceOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriceOrderArg {
    /// First and last observation in input line order.
    Input,
    /// First and last observation by timestamp.
    Chronological,
}

impl From<PriceOrderArg> for PriceOrder {
    fn from(arg: PriceOrderArg) -> Self {
        match arg {
            PriceOrderArg::Input => Self::InputOrder,
            PriceOrderArg::Chronological => Self::Chronological,
        }
    }
}

fn io_err(path: &Path, e: &io::Error) -> CandlesError {
    CandlesError::Io(format!("{}: {e}", path.display()))
}

fn write_candles<W: Write>(out: W, candles: &[Candle]) -> Result<(), CandlesError> {
    let mut writer = CandleWriter::new(out);
    writer.write_all(candles)?;
    writer.finish()?.flush()?;
    Ok(())
}

/// Run one aggregation: read everything, aggregate, then write.
///
/// Nothing is written unless the whole input parsed and aggregated cleanly;
/// an output file is only created at that point.
///
/// Returns the number of candles written.
///
/// # Errors
/// Returns the first parse, aggregation, or I/O error.
pub fn run(cli: &Cli) -> Result<usize, CandlesError> {
    let aggregator = Aggregator::builder()
        .price_order(cli.price_order.into())
        .build()?;

    let observations = match &cli.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| io_err(path, &e))?;
            read_observations(BufReader::new(file))?
        }
        None => read_observations(io::stdin().lock())?,
    };

    let candles = aggregator.run(observations)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| io_err(path, &e))?;
            write_candles(file, &candles)?;
        }
        None => write_candles(io::stdout().lock(), &candles)?,
    }
    Ok(candles.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_stdio_and_input_order() {
        let cli = Cli::try_parse_from(["candles"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert_eq!(PriceOrder::from(cli.price_order), PriceOrder::InputOrder);
    }

    #[test]
    fn parses_paths_and_price_order() {
        let cli = Cli::try_parse_from([
            "candles",
            "--input",
            "ticks.csv",
            "-o",
            "out.csv",
            "--price-order",
            "chronological",
        ])
        .unwrap();
        assert_eq!(cli.input.as_deref(), Some(Path::new("ticks.csv")));
        assert_eq!(cli.output.as_deref(), Some(Path::new("out.csv")));
        assert_eq!(PriceOrder::from(cli.price_order), PriceOrder::Chronological);
    }

    #[test]
    fn rejects_unknown_price_order() {
        assert!(Cli::try_parse_from(["candles", "--price-order", "random"]).is_err());
    }
}
