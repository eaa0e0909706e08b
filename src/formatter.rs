//! Colorized output formatter for decoded events.
//!
//! Formats a [`LogEvent`] into human-readable output:
//! - Bold timestamps
//! - Colored level badges with colon separator (`INFO:`)
//! - The message template rendered against the event's properties
//! - Properties on separate lines with right-justified keys
//! - Trace/span ids, then the exception text
//! - Property value truncation at configurable max length
//! - Include/exclude property filtering

use std::fmt::Write;

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::event::LogEvent;
use crate::timestamp;

/// Minimum width for property key alignment (right-justified).
const KEY_MIN_WIDTH: usize = 25;

/// Format one event.
///
/// Output shape:
/// ```text
/// 10:30:00.123   INFO: Hello, Bob
///                      Name: Bob
/// ```
///
/// The result is appended to `out`.
pub fn format_event(event: &LogEvent, config: &Config, use_color: bool, out: &mut String) {
    let ts_str = timestamp::format_with(event.timestamp(), &config.timestamp_format);
    if use_color {
        let _ = write!(out, "{}  ", ts_str.bold());
    } else {
        out.push_str(&ts_str);
        out.push_str("  ");
    }

    let level = event.level();
    if use_color {
        let _ = write!(out, "{}:", level.badge().style(level.style()));
    } else {
        out.push_str(level.badge());
        out.push(':');
    }

    let message = event.render_message();
    if !message.is_empty() {
        out.push(' ');
        out.push_str(&message);
    }

    let max_len = config.max_field_length;

    for property in event.properties() {
        let key = property.name.as_str();
        if !config.shows_field(key) {
            continue;
        }
        let val_str = property.value.to_string();
        write_field(out, key, &truncate_value(&val_str, max_len), use_color);
    }

    if let Some(trace_id) = event.trace_id() {
        write_field(out, "@tr", &trace_id.to_string(), use_color);
    }
    if let Some(span_id) = event.span_id() {
        write_field(out, "@sp", &span_id.to_string(), use_color);
    }

    if let Some(exception) = event.exception() {
        for line in exception.as_str().lines() {
            if use_color {
                let _ = write!(out, "\n{}", line.red());
            } else {
                let _ = write!(out, "\n{line}");
            }
        }
    }
}

fn write_field(out: &mut String, key: &str, value: &str, use_color: bool) {
    if use_color {
        let _ = write!(
            out,
            "\n{}: {}",
            format!("{key:>KEY_MIN_WIDTH$}")
                .truecolor(150, 150, 150)
                .bold(),
            value
        );
    } else {
        let _ = write!(out, "\n{key:>KEY_MIN_WIDTH$}: {value}");
    }
}

/// Truncate a value string to `max_len` characters, appending `…` if truncated.
///
/// If `max_len` is `0`, no truncation is applied.
fn truncate_value(s: &str, max_len: usize) -> String {
    if max_len == 0 || s.chars().count() <= max_len {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_len).collect();
    format!("{truncated}…")
}
