//! Relative time expressions.
//!
//! An expression is an optional forward offset followed by an optional
//! wall-clock override:
//!
//! ```text
//! expr      := [offset] [timeofday]
//! offset    := "+" DIGITS ("m" | "h" | "d")
//! timeofday := "@" HH [":" MM]
//! ```
//!
//! The offset is applied first, then the clock is set on whatever day the
//! shifted time falls on, so `+1d@09:00` means tomorrow at nine.

use log::{debug, warn};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use time::{Duration, OffsetDateTime, Time, UtcOffset};

use crate::error::ParseError;

static TZDIFF: OnceCell<UtcOffset> = OnceCell::new();

static OFFSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+(?P<count>[0-9]+)(?P<unit>[mhd])$").expect("invalid offset pattern")
});

static TIME_OF_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<hour>[0-9]{2})(?::(?P<minute>[0-9]{2}))?$")
        .expect("invalid time of day pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Minute,
    Hour,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Offset {
    unit: Unit,
    count: u32,
}

impl Offset {
    fn duration(&self) -> Duration {
        let count = i64::from(self.count);
        match self.unit {
            Unit::Minute => Duration::minutes(count),
            Unit::Hour => Duration::hours(count),
            Unit::Day => Duration::days(count),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ParsedOffset {
    offset: Option<Offset>,
    time_of_day: Option<Time>,
}

/// Resolves `raw` against `now`.
///
/// An empty or unrecognized string (no leading `+`, no `@`) resolves to
/// `now` unchanged. Setting a time of day zeroes seconds and sub-seconds.
pub fn parse(raw: &str, now: OffsetDateTime) -> Result<OffsetDateTime, ParseError> {
    let parsed = parse_expr(raw)?;
    let mut result = now;
    if let Some(offset) = parsed.offset {
        let (head, _) = split_segments(raw);
        result = result
            .checked_add(offset.duration())
            .ok_or_else(|| ParseError::MalformedOffset(head.to_owned()))?;
    }
    if let Some(time_of_day) = parsed.time_of_day {
        result = result.replace_time(time_of_day);
    }
    debug!("resolved {:?} against {} to {}", raw, now, result);
    Ok(result)
}

// offset text before the first `@`, clock text after it
fn split_segments(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('@') {
        Some((head, clock)) => (head, Some(clock)),
        None => (raw, None),
    }
}

fn parse_expr(raw: &str) -> Result<ParsedOffset, ParseError> {
    let (head, clock) = split_segments(raw);
    let mut parsed = ParsedOffset::default();
    if head.starts_with('+') {
        parsed.offset = Some(parse_offset(head)?);
    }
    if let Some(clock) = clock {
        parsed.time_of_day = Some(parse_time_of_day(clock)?);
    }
    Ok(parsed)
}

fn parse_offset(segment: &str) -> Result<Offset, ParseError> {
    let malformed = || ParseError::MalformedOffset(segment.to_owned());
    let captures = OFFSET_RE.captures(segment).ok_or_else(malformed)?;
    let count = captures["count"].parse().map_err(|_| malformed())?;
    let unit = match &captures["unit"] {
        "m" => Unit::Minute,
        "h" => Unit::Hour,
        "d" => Unit::Day,
        _ => return Err(malformed()),
    };
    Ok(Offset { unit, count })
}

fn parse_time_of_day(segment: &str) -> Result<Time, ParseError> {
    let malformed = || ParseError::MalformedTimeOfDay(segment.to_owned());
    let captures = TIME_OF_DAY_RE.captures(segment).ok_or_else(malformed)?;
    let hour: u8 = captures["hour"].parse().map_err(|_| malformed())?;
    let minute: u8 = match captures.name("minute") {
        Some(m) => m.as_str().parse().map_err(|_| malformed())?,
        None => 0,
    };
    Time::from_hms(hour, minute, 0).map_err(|_| malformed())
}

pub fn local_offset() -> UtcOffset {
    *TZDIFF.get_or_init(|| {
        UtcOffset::current_local_offset().unwrap_or_else(|e| {
            warn!("fail to get local timezone difference, falling back to UTC: {e}");
            UtcOffset::UTC
        })
    })
}

pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}

/// Seconds since the epoch, with the sub-second part as the fraction.
pub fn to_timestamp(moment: OffsetDateTime) -> f64 {
    moment.unix_timestamp() as f64 + f64::from(moment.nanosecond()) / 1e9
}

pub fn from_timestamp(secs: f64) -> Option<OffsetDateTime> {
    if !secs.is_finite() {
        return None;
    }
    OffsetDateTime::from_unix_timestamp_nanos((secs * 1e9).round() as i128).ok()
}
