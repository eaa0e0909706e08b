//! Streaming decoder over a line source, plus single-shot entry points.
//!
//! Each non-blank line must hold exactly one JSON object. Blank and
//! whitespace-only lines are skipped. A rejected line is reported to the
//! caller and does not stop the reader: calling [`LogEventReader::try_read`]
//! again continues with the next line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use crate::error::ClefError;
use crate::event::LogEvent;
use crate::parser;

/// Pull-based decoder over a [`BufRead`] source.
///
/// The reader owns the source until it is dropped, [`close`](Self::close)d,
/// or taken back with [`into_inner`](Self::into_inner).
#[derive(Debug)]
pub struct LogEventReader<R> {
    source: Option<R>,
    line_number: u64,
    buf: Vec<u8>,
}

impl LogEventReader<BufReader<File>> {
    /// Open a file of newline-delimited events.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClefError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LogEventReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source: Some(source),
            line_number: 0,
            buf: Vec::with_capacity(512),
        }
    }

    /// Number of lines consumed so far (1-based once anything is read).
    pub const fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Read the next event.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    pub fn try_read(&mut self) -> Result<Option<LogEvent>, ClefError> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| ClefError::Argument("reader is closed".to_string()))?;

        loop {
            self.buf.clear();
            if source.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if is_blank(&self.buf) {
                tracing::trace!(line = self.line_number, "skipping blank line");
                continue;
            }

            return read_line(&self.buf, self.line_number).map(Some);
        }
    }

    /// Release the underlying source. Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!(lines = self.line_number, "closed event reader");
        }
    }

    /// Take back the source, or `None` if the reader was closed.
    pub fn into_inner(self) -> Option<R> {
        self.source
    }
}

impl<R: BufRead> Iterator for LogEventReader<R> {
    type Item = Result<LogEvent, ClefError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_read().transpose()
    }
}

/// Decode a single event from one JSON object in text form.
///
/// Errors report line 1.
pub fn read_from_str(json: &str) -> Result<LogEvent, ClefError> {
    read_line(json.as_bytes(), 1)
}

/// Decode a single event from an already-parsed JSON value.
///
/// The value must be an object; anything else is an argument error.
pub fn read_from_value(value: Value) -> Result<LogEvent, ClefError> {
    match value {
        Value::Object(object) => parser::parse_event(object, 1),
        other => Err(ClefError::Argument(format!(
            "expected a JSON object, found `{other}`"
        ))),
    }
}

fn read_line(bytes: &[u8], line: u64) -> Result<LogEvent, ClefError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ClefError::StreamFormat {
        line,
        reason: format!("invalid JSON: {e}"),
    })?;

    let Value::Object(object) = value else {
        return Err(ClefError::StreamFormat {
            line,
            reason: "expected a JSON object".to_string(),
        });
    };

    parser::parse_event(object, line)
}

fn is_blank(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim().is_empty(),
        Err(_) => false,
    }
}
