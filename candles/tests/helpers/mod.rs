#![allow(dead_code)]

use candles::Observation;
use chrono::DateTime;

/// 2024-01-01T00:00:00Z
pub const T0: i64 = 1_704_067_200;

pub fn obs(id: &str, price: f64, secs: i64) -> Observation {
    Observation::new(
        id,
        price,
        DateTime::from_timestamp(secs, 0).unwrap().fixed_offset(),
    )
}

pub fn obs_at(id: &str, price: f64, rfc3339: &str) -> Observation {
    Observation::new(id, price, DateTime::parse_from_rfc3339(rfc3339).unwrap())
}

/// Three ticks of the reference scenario: two in the first minute, one in the
/// second.
pub fn scenario_input() -> &'static str {
    "A,10.00,2024-01-01T00:00:00Z\n\
     A,12.00,2024-01-01T00:00:30Z\n\
     A,11.00,2024-01-01T00:01:10Z\n\
     \n"
}
