//! The decoded event value.

use std::fmt;

use crate::id::{SpanId, TraceId};
use crate::level::Level;
use crate::template::MessageTemplate;
use crate::value::PropertyValue;

/// A named property attached to an event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEventProperty {
    pub name: String,
    pub value: PropertyValue,
}

impl LogEventProperty {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Exception information carried as text only; no stack trace is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextException(String);

impl TextException {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TextException {}

/// One decoded log event. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    timestamp: jiff::Timestamp,
    level: Level,
    exception: Option<TextException>,
    template: MessageTemplate,
    properties: Vec<LogEventProperty>,
    trace_id: Option<TraceId>,
    span_id: Option<SpanId>,
}

impl LogEvent {
    pub(crate) fn new(
        timestamp: jiff::Timestamp,
        level: Level,
        exception: Option<TextException>,
        template: MessageTemplate,
        properties: Vec<LogEventProperty>,
        trace_id: Option<TraceId>,
        span_id: Option<SpanId>,
    ) -> Self {
        Self {
            timestamp,
            level,
            exception,
            template,
            properties,
            trace_id,
            span_id,
        }
    }

    pub const fn timestamp(&self) -> jiff::Timestamp {
        self.timestamp
    }

    pub const fn level(&self) -> Level {
        self.level
    }

    pub const fn exception(&self) -> Option<&TextException> {
        self.exception.as_ref()
    }

    pub const fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Properties in the order their fields appeared in the source object.
    pub fn properties(&self) -> &[LogEventProperty] {
        &self.properties
    }

    /// First property called `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub const fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    pub const fn span_id(&self) -> Option<SpanId> {
        self.span_id
    }

    /// The message template rendered against this event's properties.
    pub fn render_message(&self) -> String {
        self.template.render(&self.properties)
    }
}
