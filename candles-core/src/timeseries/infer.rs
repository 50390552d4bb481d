use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, FixedOffset};

use crate::CandleInterval;
use crate::timeseries::util::truncate_secs;

/// Infer the candle intervals supported by a series of timestamps.
///
/// Every base interval of `catalog` is probed against each adjacent pair of
/// `timestamps`, in the order supplied (the series is not sorted first):
///
/// - both timestamps are truncated to the base interval grid;
/// - the gap between the truncated values names a candidate interval; a zero
///   gap (both in the same bucket) falls back to the base interval itself,
///   and a backwards pair contributes the absolute gap;
/// - both truncated instants are recorded as witnesses of that candidate.
///
/// A candidate qualifies once it has collected at least two distinct witness
/// instants over the whole pass, i.e. it delimits at least one real bucket
/// transition. Witness sets are shared across base intervals, so a 2m gap seen
/// on the 1m grid and a same-bucket pair on the 2m grid feed the same
/// candidate.
///
/// Returns the qualifying intervals sorted ascending. A series with fewer than
/// two timestamps, or one that never crosses a bucket boundary, yields an
/// empty vector.
///
/// ```
/// use candles_core::{infer_intervals, CandleInterval};
/// use chrono::DateTime;
///
/// let ts: Vec<_> = ["2024-01-01T00:00:00Z", "2024-01-01T00:00:30Z", "2024-01-01T00:01:10Z"]
///     .iter()
///     .map(|s| DateTime::parse_from_rfc3339(s).unwrap())
///     .collect();
/// let catalog = [
///     CandleInterval::ONE_MINUTE,
///     CandleInterval::TWO_MINUTES,
///     CandleInterval::FIVE_MINUTES,
/// ];
/// assert_eq!(infer_intervals(&ts, &catalog), vec![CandleInterval::ONE_MINUTE]);
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "candles_core::timeseries::infer_intervals",
        skip_all,
        fields(timestamps = timestamps.len(), catalog = catalog.len()),
    )
)]
#[must_use]
pub fn infer_intervals(
    timestamps: &[DateTime<FixedOffset>],
    catalog: &[CandleInterval],
) -> Vec<CandleInterval> {
    let mut witnesses: BTreeMap<CandleInterval, BTreeSet<i64>> = BTreeMap::new();

    for &base in catalog {
        let step = base.as_seconds();
        for pair in timestamps.windows(2) {
            let t1 = truncate_secs(pair[0].timestamp(), step);
            let t2 = truncate_secs(pair[1].timestamp(), step);
            let gap = t2.abs_diff(t1);
            let candidate = if gap == 0 {
                base
            } else {
                let Some(c) = i64::try_from(gap)
                    .ok()
                    .and_then(CandleInterval::from_seconds)
                else {
                    continue;
                };
                c
            };
            let seen = witnesses.entry(candidate).or_default();
            seen.insert(t1);
            seen.insert(t2);
        }
    }

    let inferred: Vec<CandleInterval> = witnesses
        .into_iter()
        .filter(|(_, seen)| seen.len() >= 2)
        .map(|(interval, _)| interval)
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        intervals = ?inferred.iter().map(|i| i.label()).collect::<Vec<_>>(),
        "inferred candle intervals"
    );

    inferred
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<FixedOffset> {
        DateTime::from_timestamp(secs, 0).unwrap().fixed_offset()
    }

    fn default_catalog() -> [CandleInterval; 3] {
        [
            CandleInterval::ONE_MINUTE,
            CandleInterval::TWO_MINUTES,
            CandleInterval::FIVE_MINUTES,
        ]
    }

    #[test]
    fn same_bucket_pairs_need_two_distinct_buckets() {
        // Both pairs stay in their own minute, but the minutes differ, so the
        // 1m fallback collects two witnesses.
        let ts = [at(0), at(10), at(600), at(610)];
        let got = infer_intervals(&ts, &default_catalog());
        assert!(got.contains(&CandleInterval::ONE_MINUTE));
    }

    #[test]
    fn gap_multiple_becomes_candidate() {
        // 0 -> 180 on the 1m grid is a 3m transition.
        let ts = [at(0), at(180)];
        let got = infer_intervals(&ts, &[CandleInterval::ONE_MINUTE]);
        assert_eq!(got, vec![CandleInterval::from_minutes(3).unwrap()]);
    }

    #[test]
    fn backwards_pair_uses_absolute_gap() {
        let ts = [at(180), at(0)];
        let got = infer_intervals(&ts, &[CandleInterval::ONE_MINUTE]);
        assert_eq!(got, vec![CandleInterval::from_minutes(3).unwrap()]);
    }

    #[test]
    fn single_bucket_series_is_empty() {
        let ts = [at(0), at(5), at(20), at(59)];
        assert!(infer_intervals(&ts, &default_catalog()).is_empty());
    }

    #[test]
    fn catalog_is_honored() {
        let ts = [at(0), at(30), at(70)];
        assert_eq!(
            infer_intervals(&ts, &default_catalog()),
            vec![CandleInterval::ONE_MINUTE]
        );
        assert!(infer_intervals(&ts, &[CandleInterval::FIVE_MINUTES]).is_empty());
    }
}
