//! Truncation grid anchored at 0001-01-01T00:00:00Z.

use chrono::{DateTime, FixedOffset};

use crate::CandleInterval;

/// Seconds from 0001-01-01T00:00:00Z to the Unix epoch.
pub const GRID_ORIGIN_OFFSET: i64 = 62_135_596_800;

/// Round the Unix timestamp `secs` down to the bucket grid of width `step`.
///
/// Buckets are counted from 0001-01-01T00:00:00Z, so every bucket of a width
/// that does not divide a day still starts at a predictable wall-clock
/// minute (7m buckets open at 00:00, 00:07, ... on 2024-01-01). The grid
/// agrees with a Unix-epoch grid for widths that divide a day. `step` must be
/// positive.
#[must_use]
pub const fn truncate_secs(secs: i64, step: i64) -> i64 {
    let shifted = secs + GRID_ORIGIN_OFFSET;
    shifted - shifted.rem_euclid(step) - GRID_ORIGIN_OFFSET
}

/// Start of the bucket of width `interval` that contains `ts`.
///
/// Truncation works on the absolute instant at whole-second resolution; the
/// result is expressed in the same offset as `ts`. Returns `None` if the
/// truncated instant is outside chrono's representable range.
#[must_use]
pub fn bucket_start(
    ts: &DateTime<FixedOffset>,
    interval: CandleInterval,
) -> Option<DateTime<FixedOffset>> {
    let start = truncate_secs(ts.timestamp(), interval.as_seconds());
    DateTime::from_timestamp(start, 0).map(|utc| utc.with_timezone(ts.offset()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn truncates_down_on_both_sides_of_epoch() {
        assert_eq!(truncate_secs(130, 60), 120);
        assert_eq!(truncate_secs(120, 60), 120);
        assert_eq!(truncate_secs(-1, 60), -60);
        assert_eq!(truncate_secs(-60, 60), -60);
    }

    #[test]
    fn grid_starts_at_year_one() {
        let origin = -GRID_ORIGIN_OFFSET;
        assert_eq!(
            DateTime::from_timestamp(origin, 0).unwrap().to_rfc3339(),
            "0001-01-01T00:00:00+00:00"
        );
        assert_eq!(truncate_secs(origin + 419, 420), origin);
        assert_eq!(truncate_secs(origin - 1, 420), origin - 420);
    }

    #[test]
    fn seven_minute_buckets_follow_the_wall_clock() {
        let step = 7 * 60;
        for (input, want) in [
            ("2024-01-01T00:00:00Z", "2024-01-01T00:00:00Z"),
            ("2024-01-01T00:06:59Z", "2024-01-01T00:00:00Z"),
            ("2024-01-01T00:07:00Z", "2024-01-01T00:07:00Z"),
            ("2024-01-01T00:20:30Z", "2024-01-01T00:14:00Z"),
            ("2024-01-01T00:21:00Z", "2024-01-01T00:21:00Z"),
        ] {
            let got = truncate_secs(ts(input).timestamp(), step);
            assert_eq!(got, ts(want).timestamp(), "{input}");
        }
    }

    #[test]
    fn bucket_start_keeps_offset_and_drops_subseconds() {
        let got = bucket_start(&ts("2024-01-01T03:04:59.900+03:00"), CandleInterval::TWO_MINUTES)
            .unwrap();
        assert_eq!(got, ts("2024-01-01T03:04:00+03:00"));
        assert_eq!(got.offset().local_minus_utc(), 3 * 3_600);
    }

    #[test]
    fn bucket_start_uses_absolute_instant() {
        // 06:10+05:30 is 00:40 UTC; the hourly grid is UTC-aligned, so the
        // bucket opens at 05:30 local time.
        let got = bucket_start(
            &ts("2024-01-01T06:10:00+05:30"),
            CandleInterval::from_minutes(60).unwrap(),
        )
        .unwrap();
        assert_eq!(got, ts("2024-01-01T00:00:00Z"));
        assert_eq!(got.to_rfc3339(), "2024-01-01T05:30:00+05:30");
    }
}
