use std::io::BufRead;

use candles_core::{CandlesError, Observation};
use chrono::{DateTime, FixedOffset};

/// Parse an RFC 3339 timestamp in its strict form: an upper-case `T` between
/// date and time, and a zero offset spelled `Z` or `+hh:mm`.
fn parse_timestamp(line: usize, raw: &str) -> Result<DateTime<FixedOffset>, CandlesError> {
    let bytes = raw.as_bytes();
    if bytes.get(10) != Some(&b'T') {
        return Err(CandlesError::invalid_timestamp(
            line,
            raw,
            "date and time must be separated by 'T'",
        ));
    }
    if bytes.last() == Some(&b'z') {
        return Err(CandlesError::invalid_timestamp(
            line,
            raw,
            "UTC designator must be 'Z'",
        ));
    }
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| CandlesError::invalid_timestamp(line, raw, e.to_string()))
}

/// Parse a single `instrument_id,price,timestamp` record.
///
/// Fields past the third are ignored. Fields are taken verbatim: no trimming,
/// no quoting.
///
/// # Errors
/// - `MalformedRecord` if fewer than three comma-separated fields are present.
/// - `InvalidPrice` if the price is not a finite 64-bit float.
/// - `InvalidTimestamp` if the timestamp is not strict RFC 3339 with an
///   offset.
pub fn parse_record(line: usize, record: &str) -> Result<Observation, CandlesError> {
    let mut fields = record.split(',');
    let (Some(instrument_id), Some(raw_price), Some(raw_ts)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(CandlesError::malformed(line, record));
    };

    let price: f64 = raw_price
        .parse()
        .map_err(|e: std::num::ParseFloatError| {
            CandlesError::invalid_price(line, raw_price, e.to_string())
        })?;
    if !price.is_finite() {
        return Err(CandlesError::invalid_price(
            line,
            raw_price,
            "price must be finite",
        ));
    }

    let ts = parse_timestamp(line, raw_ts)?;

    Ok(Observation::new(instrument_id, price, ts))
}

/// Read observations until the first empty line or the end of the stream.
///
/// Line endings may be `\n` or `\r\n`. Lines are read as raw bytes; invalid
/// UTF-8 is replaced with `U+FFFD` rather than rejected. The first bad record
/// aborts the whole read; nothing parsed so far is returned.
///
/// # Errors
/// Returns the parse error of the first bad record, or `Io` if the reader
/// fails.
pub fn read_observations<R: BufRead>(mut reader: R) -> Result<Vec<Observation>, CandlesError> {
    let mut out = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.is_empty() {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        out.push(parse_record(line_no, &line)?);
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(observations = out.len(), "read observations");
    Ok(out)
}
