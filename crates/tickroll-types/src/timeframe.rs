//! Rollup timeframe definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::TickrollError;

/// Width of an OHLC rollup bucket, in whole seconds.
///
/// Always positive: the constructors reject zero and negative widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timeframe {
    seconds: u32,
}

impl Timeframe {
    /// 1-minute buckets.
    pub const MINUTE_1: Self = Self { seconds: 60 };
    /// 3-minute buckets.
    pub const MINUTE_3: Self = Self { seconds: 180 };
    /// 5-minute buckets.
    pub const MINUTE_5: Self = Self { seconds: 300 };
    /// 15-minute buckets.
    pub const MINUTE_15: Self = Self { seconds: 900 };
    /// 1-hour buckets.
    pub const HOUR_1: Self = Self { seconds: 3600 };
    /// 1-day buckets.
    pub const DAY_1: Self = Self { seconds: 86_400 };

    /// The rollups produced for every symbol unless configured otherwise.
    pub const DEFAULT_ROLLUPS: [Self; 3] = [Self::MINUTE_1, Self::MINUTE_3, Self::MINUTE_5];

    /// Creates a timeframe from a width in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::InvalidBucketDuration`] if `seconds` is not
    /// positive or does not fit in 32 bits.
    pub fn from_seconds(seconds: i64) -> Result<Self, TickrollError> {
        u32::try_from(seconds)
            .ok()
            .filter(|&s| s > 0)
            .map(|seconds| Self { seconds })
            .ok_or(TickrollError::InvalidBucketDuration(seconds))
    }

    /// Creates a timeframe from a width in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::InvalidBucketDuration`] for zero minutes.
    pub fn from_minutes(minutes: u32) -> Result<Self, TickrollError> {
        Self::from_seconds(i64::from(minutes) * 60)
    }

    /// Returns the width in seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds as i64
    }

    /// Returns the width in whole minutes (rounded down).
    #[must_use]
    pub const fn whole_minutes(&self) -> u32 {
        self.seconds / 60
    }

    /// Returns true if the width is an exact number of minutes.
    #[must_use]
    pub const fn is_whole_minutes(&self) -> bool {
        self.seconds % 60 == 0
    }

    /// Returns the label used in output file names, e.g. `5min` or `90s`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_whole_minutes() {
            format!("{}min", self.whole_minutes())
        } else {
            format!("{}s", self.seconds)
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::MINUTE_1
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.seconds;
        if s % 86_400 == 0 {
            write!(f, "{}d", s / 86_400)
        } else if s % 3600 == 0 {
            write!(f, "{}h", s / 3600)
        } else if s % 60 == 0 {
            write!(f, "{}m", s / 60)
        } else {
            write!(f, "{s}s")
        }
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || TimeframeParseError(s.to_string());

        let (count, unit) = split_count_unit(&input).ok_or_else(err)?;
        let multiplier = match unit {
            "" | "s" | "sec" | "secs" => 1,
            "m" | "min" | "mins" => 60,
            "h" | "hr" | "hour" => 3600,
            "d" | "day" => 86_400,
            _ => return Err(err()),
        };

        count
            .checked_mul(multiplier)
            .and_then(|secs| Self::from_seconds(secs).ok())
            .ok_or_else(err)
    }
}

/// Splits `5m`, `m5` or `300` into a count and a unit suffix.
fn split_count_unit(input: &str) -> Option<(i64, &str)> {
    let digits_at = input.find(|c: char| c.is_ascii_digit())?;
    if digits_at > 0 {
        // Prefix form: m5, h1
        let (unit, count) = input.split_at(digits_at);
        return Some((count.parse().ok()?, unit));
    }
    let unit_at = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (count, unit) = input.split_at(unit_at);
    Some((count.parse().ok()?, unit))
}

impl TryFrom<String> for Timeframe {
    type Error = TimeframeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(value: Timeframe) -> Self {
        value.to_string()
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected a positive width such as 90s, 1m, m5, 3min, 1h or 300",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}
