//! Timezone and timestamp source used for time-based naming.

use crate::types::{UnsupportedValue, lookup_variant};
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest offset accepted for fixed-offset zones.
const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// A timezone string that is neither a region id nor a fixed offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not a valid timezone id or offset")]
pub struct InvalidTimezone(pub String);

/// Timezone in which timestamps are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    /// IANA region, e.g. `Europe/Helsinki` or `UTC`.
    Region(Tz),
    /// Fixed offset, e.g. `+02:00` or `UTC-5`.
    Fixed(FixedOffset),
}

impl Timezone {
    pub const UTC: Self = Self::Region(Tz::UTC);

    /// Convert an instant into this timezone.
    pub fn convert(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Region(tz) => instant.with_timezone(tz).fixed_offset(),
            Self::Fixed(offset) => instant.with_timezone(offset),
        }
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::UTC
    }
}

impl FromStr for Timezone {
    type Err = InvalidTimezone;

    /// Accepts `Z`, signed offsets (`+2`, `-05:30`, `+0100`), offsets
    /// prefixed with `UTC`/`GMT`/`UT`, and IANA region ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || InvalidTimezone(s.to_string());
        if trimmed == "Z" {
            return parse_offset("+0").map(Self::Fixed).ok_or_else(invalid);
        }
        if trimmed.starts_with(['+', '-']) {
            return parse_offset(trimmed).map(Self::Fixed).ok_or_else(invalid);
        }
        for prefix in ["UTC", "GMT", "UT"] {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                if rest.starts_with(['+', '-']) {
                    return parse_offset(rest).map(Self::Fixed).ok_or_else(invalid);
                }
            }
        }
        trimmed.parse::<Tz>().map(Self::Region).map_err(|_| invalid())
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Parse `±H`, `±HH`, `±HHMM`, `±HHMMSS` or the colon separated forms.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, digits) = match value.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let parts: Vec<&str> = if digits.contains(':') {
        digits.split(':').collect()
    } else {
        match digits.len() {
            1 | 2 => vec![digits],
            4 => vec![&digits[..2], &digits[2..]],
            6 => vec![&digits[..2], &digits[2..4], &digits[4..]],
            _ => return None,
        }
    };
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut numbers = [0i32; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    let [hours, minutes, seconds] = numbers;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let total = hours * 3600 + minutes * 60 + seconds;
    if total > MAX_OFFSET_SECONDS {
        return None;
    }
    FixedOffset::east_opt(sign * total)
}

/// Where the timestamp used for naming comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSourceType {
    /// Time at which the connector processes the record.
    Wallclock,
    /// Timestamp carried by the record itself.
    Event,
}

impl TimestampSourceType {
    pub const ALL: [Self; 2] = [Self::Wallclock, Self::Event];

    pub fn name(self) -> &'static str {
        match self {
            Self::Wallclock => "wallclock",
            Self::Event => "event",
        }
    }
}

impl FromStr for TimestampSourceType {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_variant(s, &Self::ALL, Self::name)
    }
}

impl fmt::Display for TimestampSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timestamp source bound to the timezone timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampSource {
    pub zone: Timezone,
    pub source_type: TimestampSourceType,
}

impl TimestampSource {
    pub fn new(zone: Timezone, source_type: TimestampSourceType) -> Self {
        Self { zone, source_type }
    }

    /// Timestamp for a record, in the configured zone.
    ///
    /// Event sources fall back to the wall clock for records without a
    /// timestamp.
    pub fn time(&self, event_time: Option<DateTime<Utc>>) -> DateTime<FixedOffset> {
        let instant = match (self.source_type, event_time) {
            (TimestampSourceType::Wallclock, _) => Utc::now(),
            (TimestampSourceType::Event, Some(event_time)) => event_time,
            (TimestampSourceType::Event, None) => {
                debug!("record has no event timestamp; using wall clock");
                Utc::now()
            }
        };
        self.zone.convert(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn offset(seconds: i32) -> Timezone {
        Timezone::Fixed(FixedOffset::east_opt(seconds).expect("offset"))
    }

    #[test]
    fn parses_region_ids() {
        assert_eq!("UTC".parse::<Timezone>(), Ok(Timezone::UTC));
        assert_eq!(
            "Europe/Helsinki".parse::<Timezone>(),
            Ok(Timezone::Region(Tz::Europe__Helsinki))
        );
    }

    #[test]
    fn parses_offsets() {
        assert_eq!("Z".parse::<Timezone>(), Ok(offset(0)));
        assert_eq!("+02:00".parse::<Timezone>(), Ok(offset(7200)));
        assert_eq!("-0530".parse::<Timezone>(), Ok(offset(-(5 * 3600 + 30 * 60))));
        assert_eq!("UTC+2".parse::<Timezone>(), Ok(offset(7200)));
        assert_eq!("GMT-01:00".parse::<Timezone>(), Ok(offset(-3600)));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["Mars/Olympus", "+19:00", "+02:75", "UTC+", "", "+1:2:3:4"] {
            assert!(input.parse::<Timezone>().is_err(), "{input}");
        }
    }

    #[test]
    fn event_source_uses_record_time_in_zone() {
        let source = TimestampSource::new(offset(3600), TimestampSourceType::Event);
        let event = Utc.with_ymd_and_hms(2024, 1, 31, 23, 30, 0).single().expect("time");
        let rendered = source.time(Some(event));
        assert_eq!(rendered.to_rfc3339(), "2024-02-01T00:30:00+01:00");
    }
}
