//! Time zone used to read and bucket input timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Result, TickrollError};

/// Day-first layouts accepted for `Date/Time`, after `-` is normalized to `/`.
const DATE_TIME_FORMATS: [&str; 3] = ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M", "%Y/%m/%d %H:%M:%S"];

/// Date-only layout, read as local midnight.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// The local zone that input timestamps are expressed in.
///
/// Passed explicitly to every parse; there is no process-wide default zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocalZone {
    offset: FixedOffset,
}

impl LocalZone {
    /// UTC.
    pub const UTC: Self = Self::from_offset_secs(0);

    /// India Standard Time (UTC+05:30), the zone of NSE exports.
    pub const IST: Self = Self::from_offset_secs(5 * 3600 + 30 * 60);

    const fn from_offset_secs(secs: i32) -> Self {
        match FixedOffset::east_opt(secs) {
            Some(offset) => Self { offset },
            None => panic!("offset out of range"),
        }
    }

    /// Creates a zone from a fixed UTC offset.
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Returns the underlying UTC offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Parses a day-first `Date/Time` value into epoch seconds.
    ///
    /// Hyphens are normalized to slashes first, so `24-02-2022 09:15:00` and
    /// `24/02/2022 09:15:00` are equivalent. A bare date is read as midnight.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::MalformedTimestamp`] if no layout matches.
    pub fn parse_instant(&self, raw: &str) -> Result<i64> {
        let normalized = raw.trim().replace('-', "/");

        let naive = DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(&normalized, DATE_FORMAT)
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
            .ok_or_else(|| TickrollError::MalformedTimestamp {
                value: raw.to_string(),
                reason: "expected DD/MM/YYYY HH:MM[:SS]".to_string(),
            })?;

        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.timestamp())
            .ok_or_else(|| TickrollError::MalformedTimestamp {
                value: raw.to_string(),
                reason: "not representable in zone".to_string(),
            })
    }

    /// Converts epoch seconds into a date-time in this zone.
    #[must_use]
    pub fn datetime(&self, instant: i64) -> Option<DateTime<FixedOffset>> {
        DateTime::from_timestamp(instant, 0).map(|utc| utc.with_timezone(&self.offset))
    }

    /// Returns the local calendar day containing `instant`.
    #[must_use]
    pub fn calendar_day(&self, instant: i64) -> Option<NaiveDate> {
        self.datetime(instant).map(|dt| dt.date_naive())
    }
}

impl Default for LocalZone {
    fn default() -> Self {
        Self::IST
    }
}

impl std::fmt::Display for LocalZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.offset)
    }
}

impl FromStr for LocalZone {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" | "gmt" => return Ok(Self::UTC),
            "ist" | "asia/kolkata" | "asia/calcutta" => return Ok(Self::IST),
            _ => {}
        }

        let err = || ZoneParseError(s.to_string());
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(err()),
        };
        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours = offset_field(hours, 24).ok_or_else(err)?;
        let minutes = offset_field(minutes, 60).ok_or_else(err)?;

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::new)
            .ok_or_else(err)
    }
}

/// Parses one or two ASCII digits below `limit`.
fn offset_field(digits: &str, limit: i32) -> Option<i32> {
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|value| *value < limit)
}

impl TryFrom<String> for LocalZone {
    type Error = ZoneParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocalZone> for String {
    fn from(value: LocalZone) -> Self {
        value.to_string()
    }
}

/// Error returned when parsing an invalid zone string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneParseError(String);

impl std::fmt::Display for ZoneParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid zone '{}', expected UTC, IST or an offset such as +05:30",
            self.0
        )
    }
}

impl std::error::Error for ZoneParseError {}
