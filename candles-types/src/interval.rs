//! Candle interval with a whole-second resolution.

use std::fmt;
use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;

/// Largest interval representable as a `chrono::TimeDelta` in whole seconds.
const MAX_SECS: i64 = i64::MAX / 1_000;

/// A positive candle duration measured in whole seconds.
///
/// Ordering is numeric, so sorting intervals sorts them from the finest to
/// the coarsest granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CandleInterval {
    secs: i64,
}

impl CandleInterval {
    /// One minute.
    pub const ONE_MINUTE: Self = Self { secs: 60 };
    /// Two minutes.
    pub const TWO_MINUTES: Self = Self { secs: 120 };
    /// Five minutes.
    pub const FIVE_MINUTES: Self = Self { secs: 300 };

    /// Build an interval from a number of seconds.
    ///
    /// Returns `None` for zero, negative, or out-of-range values.
    #[must_use]
    pub const fn from_seconds(secs: i64) -> Option<Self> {
        if secs > 0 && secs <= MAX_SECS {
            Some(Self { secs })
        } else {
            None
        }
    }

    /// Build an interval from a number of minutes.
    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Option<Self> {
        match minutes.checked_mul(SECS_PER_MINUTE) {
            Some(secs) => Self::from_seconds(secs),
            None => None,
        }
    }

    /// Build an interval from a `std::time::Duration`.
    ///
    /// Returns `None` if the duration is zero, carries a sub-second part, or
    /// does not fit.
    #[must_use]
    pub fn from_std(d: Duration) -> Option<Self> {
        if d.subsec_nanos() != 0 {
            return None;
        }
        i64::try_from(d.as_secs()).ok().and_then(Self::from_seconds)
    }

    /// Length of the interval in seconds.
    #[must_use]
    pub const fn as_seconds(self) -> i64 {
        self.secs
    }

    /// Length of the interval as a `chrono::TimeDelta`.
    #[must_use]
    pub fn as_delta(self) -> TimeDelta {
        TimeDelta::seconds(self.secs)
    }

    /// Compact label used in the CSV output.
    ///
    /// The full rendering (`2m0s`, `1h30m0s`) is cut right after the first
    /// minute marker, dropping the trailing seconds: `2m`, `1h30m`, `1h0m`.
    /// Intervals shorter than a minute have no minute marker and keep their
    /// full rendering (`45s`).
    #[must_use]
    pub fn label(self) -> String {
        let full = self.to_string();
        match full.find('m') {
            Some(idx) => full[..=idx].to_string(),
            None => full,
        }
    }
}

/// Renders hours, minutes and seconds with the leading zero units omitted,
/// e.g. `45s`, `2m0s`, `1h0m0s`.
impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.secs / SECS_PER_HOUR;
        let minutes = (self.secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
        let seconds = self.secs % SECS_PER_MINUTE;
        if hours > 0 {
            write!(f, "{hours}h{minutes}m{seconds}s")
        } else if minutes > 0 {
            write!(f, "{minutes}m{seconds}s")
        } else {
            write!(f, "{seconds}s")
        }
    }
}

impl TryFrom<i64> for CandleInterval {
    type Error = crate::CandlesError;

    fn try_from(secs: i64) -> Result<Self, Self::Error> {
        Self::from_seconds(secs).ok_or_else(|| {
            crate::CandlesError::InvalidArg(format!("interval must be positive seconds, got {secs}"))
        })
    }
}

impl From<CandleInterval> for i64 {
    fn from(i: CandleInterval) -> Self {
        i.secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cut_after_minute_marker() {
        assert_eq!(CandleInterval::ONE_MINUTE.label(), "1m");
        assert_eq!(CandleInterval::TWO_MINUTES.label(), "2m");
        assert_eq!(CandleInterval::from_minutes(90).unwrap().label(), "1h30m");
        assert_eq!(CandleInterval::from_minutes(60).unwrap().label(), "1h0m");
        assert_eq!(CandleInterval::from_seconds(90).unwrap().label(), "1m");
        assert_eq!(CandleInterval::from_seconds(45).unwrap().label(), "45s");
    }

    #[test]
    fn display_keeps_seconds() {
        assert_eq!(CandleInterval::TWO_MINUTES.to_string(), "2m0s");
        assert_eq!(CandleInterval::from_seconds(3_725).unwrap().to_string(), "1h2m5s");
    }

    #[test]
    fn rejects_non_positive_and_fractional() {
        assert!(CandleInterval::from_seconds(0).is_none());
        assert!(CandleInterval::from_seconds(-60).is_none());
        assert!(CandleInterval::from_std(Duration::from_millis(1_500)).is_none());
        assert_eq!(
            CandleInterval::from_std(Duration::from_secs(300)),
            Some(CandleInterval::FIVE_MINUTES)
        );
    }

    #[test]
    fn orders_numerically() {
        let mut v = vec![
            CandleInterval::FIVE_MINUTES,
            CandleInterval::ONE_MINUTE,
            CandleInterval::from_minutes(3).unwrap(),
        ];
        v.sort();
        assert_eq!(v[0], CandleInterval::ONE_MINUTE);
        assert_eq!(v[2], CandleInterval::FIVE_MINUTES);
    }
}
