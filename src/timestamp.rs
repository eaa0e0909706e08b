//! Timestamp parsing and formatting for the `@t` field.
//!
//! Parsing tries, in order:
//! 1. offset-aware ISO 8601 / RFC 3339 (`2026-01-15T10:30:00.123+02:00`)
//! 2. a civil date-time or date without offset, read in the system time zone
//! 3. permissive forms: RFC 2822 and a table of `strptime` layouts
//!
//! The first parser that accepts the text wins.

use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// Layouts with an explicit UTC offset, tried in the permissive stage.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y/%m/%d %H:%M:%S%.f%:z",
    "%Y/%m/%d %H:%M:%S%.f %z",
    "%d/%m/%Y %H:%M:%S%.f %z",
];

/// Layouts without an offset, read in the system time zone.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
];

/// Date-only layouts, read as local midnight.
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%d/%m/%Y"];

/// Parse an `@t` string into an absolute point in time.
///
/// Returns `None` when every stage rejects the text.
pub fn parse(s: &str) -> Option<Timestamp> {
    parse_in(s, &TimeZone::system())
}

/// Same as [`parse`], with an explicit zone for text that carries no offset.
pub fn parse_in(s: &str, tz: &TimeZone) -> Option<Timestamp> {
    parse_offset_aware(s)
        .or_else(|| parse_local(s, tz))
        .or_else(|| parse_permissive(s.trim(), tz))
}

fn parse_offset_aware(s: &str) -> Option<Timestamp> {
    s.parse::<Timestamp>().ok()
}

fn parse_local(s: &str, tz: &TimeZone) -> Option<Timestamp> {
    if let Ok(dt) = s.parse::<DateTime>() {
        return dt.to_zoned(tz.clone()).ok().map(|zdt| zdt.timestamp());
    }
    let date = s.parse::<Date>().ok()?;
    date.to_zoned(tz.clone()).ok().map(|zdt| zdt.timestamp())
}

fn parse_permissive(s: &str, tz: &TimeZone) -> Option<Timestamp> {
    if let Ok(zdt) = jiff::fmt::rfc2822::parse(s) {
        return Some(zdt.timestamp());
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = Timestamp::strptime(format, s) {
            return Some(ts);
        }
    }

    for format in LOCAL_FORMATS {
        if let Ok(dt) = DateTime::strptime(format, s)
            && let Ok(zdt) = dt.to_zoned(tz.clone())
        {
            return Some(zdt.timestamp());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        Date::strptime(format, s)
            .ok()
            .and_then(|date| date.to_zoned(tz.clone()).ok())
            .map(|zdt: Zoned| zdt.timestamp())
    })
}

/// Format a timestamp in UTC using a strftime-compatible format string.
pub fn format_with(ts: Timestamp, format: &str) -> String {
    ts.to_zoned(TimeZone::UTC).strftime(format).to_string()
}
