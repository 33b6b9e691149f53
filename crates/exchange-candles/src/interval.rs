use crate::CandleError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Candlestick interval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleInterval {
    Minute1,
    Minute5,
    Minute15,
    #[default]
    Hour1,
    Hour2,
    Hour4,
    Day1,
    /// Monday to Monday in the configured offset
    Week1,
}

impl CandleInterval {
    /// Get interval duration in seconds
    pub const fn duration_secs(&self) -> u64 {
        match self {
            CandleInterval::Minute1 => 60,
            CandleInterval::Minute5 => 300,
            CandleInterval::Minute15 => 900,
            CandleInterval::Hour1 => 3600,
            CandleInterval::Hour2 => 7200,
            CandleInterval::Hour4 => 14400,
            CandleInterval::Day1 => 86400,
            CandleInterval::Week1 => 604800,
        }
    }

    /// Short label, also accepted by `from_str`
    pub const fn label(&self) -> &'static str {
        match self {
            CandleInterval::Minute1 => "1m",
            CandleInterval::Minute5 => "5m",
            CandleInterval::Minute15 => "15m",
            CandleInterval::Hour1 => "1h",
            CandleInterval::Hour2 => "2h",
            CandleInterval::Hour4 => "4h",
            CandleInterval::Day1 => "1d",
            CandleInterval::Week1 => "1w",
        }
    }

    /// Get all intervals
    pub const fn all() -> &'static [CandleInterval] {
        &[
            CandleInterval::Minute1,
            CandleInterval::Minute5,
            CandleInterval::Minute15,
            CandleInterval::Hour1,
            CandleInterval::Hour2,
            CandleInterval::Hour4,
            CandleInterval::Day1,
            CandleInterval::Week1,
        ]
    }

    /// Local time of the first bucket boundary after the epoch. The epoch
    /// fell on a Thursday; weeks open on Monday 1970-01-05.
    const fn anchor_secs(&self) -> i128 {
        match self {
            CandleInterval::Week1 => 4 * 86400,
            _ => 0,
        }
    }

    /// Bucket open time for a timestamp, aligned to the wall clock of `offset`.
    /// Saturates at the ends of the `u64` range.
    pub fn bucket_open_time(&self, timestamp: u64, offset: &FixedOffset) -> u64 {
        let duration = self.duration_secs() as i128;
        let shift = offset.local_minus_utc() as i128;
        let anchor = self.anchor_secs();

        let local = timestamp as i128 + shift - anchor;
        let open = local.div_euclid(duration) * duration + anchor - shift;
        open.clamp(0, u64::MAX as i128) as u64
    }

    /// Bucket close time (exclusive) for a timestamp
    pub fn bucket_close_time(&self, timestamp: u64, offset: &FixedOffset) -> u64 {
        self.bucket_open_time(timestamp, offset)
            .saturating_add(self.duration_secs())
    }
}

impl FromStr for CandleInterval {
    type Err = CandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1m" | "minute" | "MINUTE_1" => Ok(CandleInterval::Minute1),
            "5m" | "MINUTE_5" => Ok(CandleInterval::Minute5),
            "15m" | "MINUTE_15" => Ok(CandleInterval::Minute15),
            "1h" | "hour" | "HOUR_1" => Ok(CandleInterval::Hour1),
            "2h" | "HOUR_2" => Ok(CandleInterval::Hour2),
            "4h" | "HOUR_4" => Ok(CandleInterval::Hour4),
            "1d" | "day" | "DAY_1" => Ok(CandleInterval::Day1),
            "1w" | "week" | "WEEK_1" => Ok(CandleInterval::Week1),
            other => Err(CandleError::InvalidInterval(other.to_string())),
        }
    }
}

impl std::fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
