use std::cmp::Ordering;

use crate::Candle;

/// Canonical candle ordering: instrument id (lexicographic), then interval
/// (shortest first), then bucket start (earliest first).
///
/// Bucket starts compare as absolute instants, so candles whose starts were
/// rendered in different offsets still order chronologically.
#[must_use]
pub fn candle_order(a: &Candle, b: &Candle) -> Ordering {
    a.instrument_id
        .cmp(&b.instrument_id)
        .then_with(|| a.interval.cmp(&b.interval))
        .then_with(|| a.bucket_start.cmp(&b.bucket_start))
}

/// Sort candles in place by [`candle_order`].
///
/// This is the only ordering guarantee of the pipeline; intermediate bucket
/// and instrument iteration orders must not be relied on.
pub fn sort_candles(candles: &mut [Candle]) {
    candles.sort_by(candle_order);
}
