use std::io::Write;

use candles_core::{Candle, CandlesError};
use chrono::SecondsFormat;

/// Render a candle as its seven output fields:
/// `instrument_id, open, high, low, close, bucket_start, interval`.
///
/// Prices use two fixed decimals, the bucket start is RFC 3339 at whole
/// seconds (`Z` for a zero offset), and the interval uses its compact label.
#[must_use]
pub fn candle_record(c: &Candle) -> [String; 7] {
    [
        c.instrument_id.clone(),
        format!("{:.2}", c.open),
        format!("{:.2}", c.high),
        format!("{:.2}", c.low),
        format!("{:.2}", c.close),
        c.bucket_start.to_rfc3339_opts(SecondsFormat::Secs, true),
        c.interval.label(),
    ]
}

/// Writes candles as header-less, `\n`-terminated CSV rows.
pub struct CandleWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> CandleWriter<W> {
    /// Wrap an output stream.
    pub fn new(out: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);
        Self { inner }
    }

    /// Write a single candle row.
    ///
    /// # Errors
    /// Returns `Io` if the underlying stream fails.
    pub fn write_candle(&mut self, candle: &Candle) -> Result<(), CandlesError> {
        self.inner
            .write_record(&candle_record(candle))
            .map_err(|e| CandlesError::Io(e.to_string()))
    }

    /// Write every candle, in the given order.
    ///
    /// # Errors
    /// Returns `Io` on the first failed write.
    pub fn write_all(&mut self, candles: &[Candle]) -> Result<(), CandlesError> {
        for c in candles {
            self.write_candle(c)?;
        }
        Ok(())
    }

    /// Flush buffered rows and return the underlying stream.
    ///
    /// # Errors
    /// Returns `Io` if the final flush fails.
    pub fn finish(self) -> Result<W, CandlesError> {
        self.inner
            .into_inner()
            .map_err(|e| CandlesError::Io(e.error().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candles_core::CandleInterval;
    use chrono::DateTime;

    fn candle(id: &str, ts: &str, interval: CandleInterval) -> Candle {
        Candle {
            instrument_id: id.to_string(),
            open: 10.0,
            high: 12.0,
            low: 9.995,
            close: 11.5,
            bucket_start: DateTime::parse_from_rfc3339(ts).unwrap(),
            interval,
        }
    }

    fn render(candles: &[Candle]) -> String {
        let mut w = CandleWriter::new(Vec::new());
        w.write_all(candles).unwrap();
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn writes_seven_fields_without_header() {
        let out = render(&[candle("A", "2024-01-01T00:00:00Z", CandleInterval::ONE_MINUTE)]);
        assert_eq!(out, "A,10.00,12.00,9.99,11.50,2024-01-01T00:00:00Z,1m\n");
    }

    #[test]
    fn keeps_non_utc_offset() {
        let out = render(&[candle(
            "A",
            "2024-01-01T03:00:00+03:00",
            CandleInterval::from_minutes(90).unwrap(),
        )]);
        assert!(out.ends_with(",2024-01-01T03:00:00+03:00,1h30m\n"), "{out}");
    }

    #[test]
    fn quotes_ids_that_need_it() {
        let out = render(&[candle("A\"B", "2024-01-01T00:00:00Z", CandleInterval::ONE_MINUTE)]);
        assert!(out.starts_with("\"A\"\"B\","), "{out}");
    }
}
