use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::timeseries::util::bucket_start;
use crate::{Candle, CandleInterval, CandlesError, Observation, PriceOrder};

/// Running OHLC state of one bucket. Empty until the first price is pushed.
#[derive(Debug, Default)]
struct BucketAgg {
    ohlc: Option<Ohlc>,
}

#[derive(Debug, Clone, Copy)]
struct Ohlc {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl BucketAgg {
    fn push(&mut self, price: f64) {
        let o = self.ohlc.get_or_insert(Ohlc {
            open: price,
            high: price,
            low: price,
            close: price,
        });
        if price > o.high {
            o.high = price;
        }
        if price < o.low {
            o.low = price;
        }
        o.close = price;
    }

    fn finish(self) -> Option<Ohlc> {
        self.ohlc
    }
}

/// Fold observations, in iteration order, into buckets keyed by their start.
///
/// Buckets are emitted in the order their first member appears. Membership is
/// decided by truncating the observation's whole-second timestamp, which is
/// the same as testing `start <= ts < start + interval` in seconds.
fn aggregate_by<'a, I>(
    instrument_id: &str,
    observations: I,
    interval: CandleInterval,
) -> Result<Vec<Candle>, CandlesError>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut slots: HashMap<i64, usize> = HashMap::new();
    let mut buckets: Vec<(DateTime<FixedOffset>, BucketAgg)> = Vec::new();

    for obs in observations {
        let Some(start) = bucket_start(&obs.ts, interval) else {
            return Err(CandlesError::InvalidArg(format!(
                "bucket of width {} for {} at {} is outside the representable range",
                interval.label(),
                instrument_id,
                obs.ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            )));
        };
        let idx = *slots.entry(start.timestamp()).or_insert_with(|| {
            buckets.push((start, BucketAgg::default()));
            buckets.len() - 1
        });
        buckets[idx].1.push(obs.price);
    }

    buckets
        .into_iter()
        .map(|(start, agg)| finalize_bucket(instrument_id, start, interval, agg))
        .collect()
}

fn finalize_bucket(
    instrument_id: &str,
    bucket_start: DateTime<FixedOffset>,
    interval: CandleInterval,
    agg: BucketAgg,
) -> Result<Candle, CandlesError> {
    let Some(ohlc) = agg.finish() else {
        return Err(CandlesError::empty_bucket(
            instrument_id,
            bucket_start.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    };
    Ok(Candle {
        instrument_id: instrument_id.to_string(),
        open: ohlc.open,
        high: ohlc.high,
        low: ohlc.low,
        close: ohlc.close,
        bucket_start,
        interval,
    })
}

/// Aggregate one instrument's observations into candles of width `interval`.
///
/// - Bucket start = the timestamp truncated to a multiple of `interval` counted
///   from 0001-01-01T00:00:00Z (see [`crate::truncate_secs`]), kept in the
///   offset of the observation that opened it.
/// - Open  = price of the first member in **input order**
/// - High  = max member price
/// - Low   = min member price
/// - Close = price of the last member in **input order**
///
/// Open and close follow the order of `observations`, not their
/// timestamps: when the input is not time-sorted, `open` may not be the
/// chronologically earliest price of the bucket. Use
/// [`aggregate_with_order`] with [`PriceOrder::Chronological`] for
/// timestamp-ordered open/close.
///
/// Candles come back in first-appearance order of their buckets; callers that
/// need a stable arrangement sort with [`crate::sort_candles`]. Every returned
/// candle holds at least one observation and no two candles overlap.
///
/// # Errors
/// - `Err(CandlesError::InvalidArg)` if an observation's bucket would start
///   before the earliest representable instant.
/// - `Err(CandlesError::EmptyBucket)` if a bucket ends up without members,
///   which indicates an internal inconsistency.
///
/// ```
/// use candles_core::{aggregate, CandleInterval, Observation};
/// use chrono::DateTime;
///
/// let obs = |p: f64, s: &str| Observation::new("A", p, DateTime::parse_from_rfc3339(s).unwrap());
/// let input = vec![
///     obs(10.0, "2024-01-01T00:00:00Z"),
///     obs(12.0, "2024-01-01T00:00:30Z"),
///     obs(11.0, "2024-01-01T00:01:10Z"),
/// ];
/// let candles = aggregate("A", &input, CandleInterval::ONE_MINUTE).unwrap();
/// assert_eq!(candles.len(), 2);
/// assert_eq!((candles[0].open, candles[0].high, candles[0].low, candles[0].close), (10.0, 12.0, 10.0, 12.0));
/// assert_eq!(candles[1].open, 11.0);
/// ```
pub fn aggregate(
    instrument_id: &str,
    observations: &[Observation],
    interval: CandleInterval,
) -> Result<Vec<Candle>, CandlesError> {
    aggregate_by(instrument_id, observations, interval)
}

/// Aggregate with an explicit open/close ordering rule.
///
/// `PriceOrder::InputOrder` is identical to [`aggregate`].
/// `PriceOrder::Chronological` stably sorts members by timestamp first, so
/// observations sharing a timestamp keep their input order.
///
/// # Errors
/// Same as [`aggregate`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "candles_core::timeseries::aggregate",
        skip_all,
        fields(
            instrument = instrument_id,
            observations = observations.len(),
            interval = %interval.label(),
        ),
    )
)]
pub fn aggregate_with_order(
    instrument_id: &str,
    observations: &[Observation],
    interval: CandleInterval,
    order: PriceOrder,
) -> Result<Vec<Candle>, CandlesError> {
    match order {
        PriceOrder::InputOrder => aggregate_by(instrument_id, observations, interval),
        PriceOrder::Chronological => {
            let mut sorted: Vec<&Observation> = observations.iter().collect();
            sorted.sort_by_key(|o| o.ts);
            aggregate_by(instrument_id, sorted, interval)
        }
    }
}
