//! Event assembly: one parsed JSON object to one [`LogEvent`].
//!
//! Reserved fields are read first and validated strictly; every other field
//! becomes a property, in source order, with its name unescaped. A reserved
//! field holding JSON `null` counts as absent.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ClefError;
use crate::event::{LogEvent, LogEventProperty, TextException};
use crate::fields::{self, EVENT_ID_PROPERTY, ReservedField};
use crate::id::{ParseIdError, SpanId, TraceId};
use crate::level::Level;
use crate::template::{self, MessageTemplate};
use crate::timestamp;
use crate::value::{self, PropertyValue, Rendering, Scalar};

/// Assemble an event from a JSON object read at `line` (used in errors only).
pub fn parse_event(object: Map<String, Value>, line: u64) -> Result<LogEvent, ClefError> {
    let timestamp = read_timestamp(&object, line)?;
    let template = MessageTemplate::parse(&read_template_text(&object, line)?);
    let level = read_level(&object, line)?;
    let exception = read_str(&object, ReservedField::Exception, line)?.map(TextException::new);
    let trace_id = read_id::<TraceId>(&object, ReservedField::TraceId, line)?;
    let span_id = read_id::<SpanId>(&object, ReservedField::SpanId, line)?;
    let renderings = read_renderings(&object, &template, line)?;
    let event_id = read_event_id(&object, line)?;

    let mut properties = Vec::with_capacity(object.len());
    for (name, value) in object {
        if fields::is_reserved(&name) {
            continue;
        }
        let name = fields::unescape(&name).to_string();
        let value = value::convert_property(&name, value, &renderings);
        properties.push(LogEventProperty { name, value });
    }
    if let Some(id) = event_id {
        properties.push(LogEventProperty::new(EVENT_ID_PROPERTY, id));
    }

    Ok(LogEvent::new(
        timestamp, level, exception, template, properties, trace_id, span_id,
    ))
}

fn reserved(object: &Map<String, Value>, field: ReservedField) -> Option<&Value> {
    object.get(field.name()).filter(|value| !value.is_null())
}

fn read_str(
    object: &Map<String, Value>,
    field: ReservedField,
    line: u64,
) -> Result<Option<&str>, ClefError> {
    match reserved(object, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ClefError::unsupported(
            field.name(),
            line,
            format!("expected a string, found {}", kind(other)),
        )),
    }
}

fn read_timestamp(object: &Map<String, Value>, line: u64) -> Result<jiff::Timestamp, ClefError> {
    let field = ReservedField::Timestamp;
    let Some(value) = reserved(object, field) else {
        return Err(ClefError::RequiredFieldMissing {
            field: field.name(),
            line,
        });
    };
    let Value::String(text) = value else {
        return Err(ClefError::unsupported(
            field.name(),
            line,
            format!("expected a date/time string, found {}", kind(value)),
        ));
    };
    timestamp::parse(text).ok_or_else(|| {
        ClefError::unsupported(field.name(), line, format!("unrecognized date/time `{text}`"))
    })
}

/// `@mt` verbatim, else `@m` escaped into a literal-only template, else empty.
fn read_template_text(object: &Map<String, Value>, line: u64) -> Result<String, ClefError> {
    if let Some(text) = read_str(object, ReservedField::MessageTemplate, line)? {
        return Ok(text.to_string());
    }
    Ok(read_str(object, ReservedField::Message, line)?
        .map(template::escape_text)
        .unwrap_or_default())
}

fn read_level(object: &Map<String, Value>, line: u64) -> Result<Level, ClefError> {
    let field = ReservedField::Level;
    match read_str(object, field, line)? {
        None => Ok(Level::default()),
        Some(name) => Level::from_name(name).ok_or_else(|| {
            ClefError::unsupported(field.name(), line, format!("unknown level `{name}`"))
        }),
    }
}

fn read_id<T>(
    object: &Map<String, Value>,
    field: ReservedField,
    line: u64,
) -> Result<Option<T>, ClefError>
where
    T: FromStr<Err = ParseIdError>,
{
    read_str(object, field, line)?
        .map(|text| {
            text.parse::<T>()
                .map_err(|e| ClefError::unsupported(field.name(), line, e.to_string()))
        })
        .transpose()
}

/// Pair each `@r` entry with the next property token that has a format.
/// Extra entries on either side are ignored.
fn read_renderings(
    object: &Map<String, Value>,
    template: &MessageTemplate,
    line: u64,
) -> Result<Vec<Rendering>, ClefError> {
    let field = ReservedField::Renderings;
    let items = match reserved(object, field) {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ClefError::unsupported(
                field.name(),
                line,
                format!("expected an array, found {}", kind(other)),
            ));
        }
    };

    template
        .property_tokens()
        .filter_map(|token| token.format.as_ref().map(|format| (token, format)))
        .zip(items)
        .map(|((token, format), item)| match item {
            Value::String(text) => Ok(Rendering {
                name: token.name.clone(),
                format: format.clone(),
                text: text.clone(),
            }),
            other => Err(ClefError::unsupported(
                field.name(),
                line,
                format!("expected rendering strings, found {}", kind(other)),
            )),
        })
        .collect()
}

/// `@i` is a string, or a number that fits an unsigned 32-bit integer.
fn read_event_id(
    object: &Map<String, Value>,
    line: u64,
) -> Result<Option<PropertyValue>, ClefError> {
    let field = ReservedField::EventId;
    match reserved(object, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(Scalar::String(s.clone()).into())),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .map(|id| Some(Scalar::Unsigned(u64::from(id)).into()))
            .ok_or_else(|| {
                ClefError::unsupported(
                    field.name(),
                    line,
                    format!("`{n}` is not an unsigned 32-bit integer"),
                )
            }),
        Some(other) => Err(ClefError::unsupported(
            field.name(),
            line,
            format!("expected a string or number, found {}", kind(other)),
        )),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
