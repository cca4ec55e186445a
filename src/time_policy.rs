/// Wall-clock interpretation for IV timestamps.
///
/// The IV service reports timestamps as local wall-clock strings. The
/// normalizer reads them, and formats the instants it synthesizes, through
/// a single `TimePolicy` so that `date`, `time` and `time_epoch_millis` of
/// every record agree with each other. The policy is a fixed UTC offset;
/// the executing machine's local zone is never consulted.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePolicy {
    offset: FixedOffset,
}

impl TimePolicy {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn fixed(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Reads a wall-clock date/time under this policy as epoch milliseconds.
    pub fn to_epoch_millis(&self, wall_clock: NaiveDateTime) -> Option<i64> {
        self.offset
            .from_local_datetime(&wall_clock)
            .single()
            .map(|dt| dt.timestamp_millis())
    }

    /// Inverse of `to_epoch_millis`.
    pub fn to_wall_clock(&self, epoch_millis: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(epoch_millis)
            .map(|dt| dt.with_timezone(&self.offset).naive_local())
    }
}

impl Default for TimePolicy {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for TimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset.local_minus_utc() == 0 {
            write!(f, "UTC")
        } else {
            write!(f, "{}", self.offset)
        }
    }
}

/// Accepts `"UTC"`, `"Z"`, or an offset such as `"-06:00"`.
impl FromStr for TimePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Self::utc());
        }
        trimmed
            .parse::<FixedOffset>()
            .map(Self::fixed)
            .map_err(|e| format!("invalid time offset '{}': {}", s, e))
    }
}

// ---------------------------------------------------------------------------
// Timestamp text
// ---------------------------------------------------------------------------

/// Splits an IV timestamp into its wall-clock date and whole-second time.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` optionally followed by a fractional part
/// and/or a zone suffix (`.000`, `-05:00`, `Z`); everything after the
/// seconds field is ignored.
pub fn parse_wall_clock(date_time: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = date_time.split_once('T')?;
    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()?;
    let time = NaiveTime::parse_from_str(time_part.get(..8)?, TIME_FORMAT).ok()?;
    Some(date.and_time(time))
}

/// `("YYYY-MM-DD", "HH:MM:SS")` for a wall-clock value.
pub fn format_date_time(wall_clock: &NaiveDateTime) -> (String, String) {
    (
        wall_clock.format(DATE_FORMAT).to_string(),
        wall_clock.format(TIME_FORMAT).to_string(),
    )
}
