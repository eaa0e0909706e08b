//! Tagged property values and the conversion from generic JSON.
//!
//! [`convert`] maps a [`serde_json::Value`] onto [`PropertyValue`]:
//!
//! | JSON | value |
//! |---|---|
//! | `null`, bool, number, string | [`PropertyValue::Scalar`] |
//! | array | [`PropertyValue::Sequence`] |
//! | `{"$dictionary": {...}}` | [`PropertyValue::Dictionary`] |
//! | object with a string `$type` | tagged [`PropertyValue::Structure`] |
//! | any other object | untagged [`PropertyValue::Structure`] |
//!
//! Objects that only half-match a marker convention are read as plain
//! structures with the marker kept as an ordinary member.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::fields::{DICTIONARY_MARKER, TYPE_TAG_MARKER};

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    DateTime(jiff::Timestamp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub type_tag: Option<String>,
    pub members: Vec<(String, PropertyValue)>,
}

/// A value together with display text precomputed by the producer, keyed
/// by format specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedValue {
    pub value: Box<PropertyValue>,
    pub renderings: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(Scalar),
    Sequence(Vec<PropertyValue>),
    Structure(Structure),
    Dictionary(Vec<(Scalar, PropertyValue)>),
    Rendered(RenderedValue),
}

/// Precomputed display text for one property at one format specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub name: String,
    pub format: String,
    pub text: String,
}

impl PropertyValue {
    /// Attach precomputed renderings. An empty list leaves the value as is.
    pub fn with_renderings(self, renderings: Vec<(String, String)>) -> Self {
        if renderings.is_empty() {
            return self;
        }
        Self::Rendered(RenderedValue {
            value: Box::new(self),
            renderings,
        })
    }

    /// The precomputed text for `format`, if the producer supplied one.
    pub fn rendering(&self, format: &str) -> Option<&str> {
        match self {
            Self::Rendered(rendered) => rendered
                .renderings
                .iter()
                .find(|(f, _)| f == format)
                .map(|(_, text)| text.as_str()),
            _ => None,
        }
    }

    /// The structured value, looking through any attached renderings.
    pub fn structured(&self) -> &Self {
        match self {
            Self::Rendered(rendered) => rendered.value.structured(),
            other => other,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<Scalar> for PropertyValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

/// Convert a JSON value recursively.
pub fn convert(value: Value) -> PropertyValue {
    match value {
        Value::Null => PropertyValue::Scalar(Scalar::Null),
        Value::Bool(b) => PropertyValue::Scalar(Scalar::Bool(b)),
        Value::Number(n) => PropertyValue::Scalar(convert_number(&n)),
        Value::String(s) => PropertyValue::Scalar(Scalar::String(s)),
        Value::Array(items) => PropertyValue::Sequence(items.into_iter().map(convert).collect()),
        Value::Object(map) => convert_object(map),
    }
}

/// Convert the value of a top-level property, attaching every rendering
/// recorded for `name`.
pub fn convert_property(name: &str, value: Value, renderings: &[Rendering]) -> PropertyValue {
    let matching = renderings
        .iter()
        .filter(|r| r.name == name)
        .map(|r| (r.format.clone(), r.text.clone()))
        .collect();
    convert(value).with_renderings(matching)
}

/// Integers stay integers (signed first, then unsigned); everything else is a float.
fn convert_number(n: &Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::Unsigned(u)
    } else {
        n.as_f64().map_or(Scalar::Null, Scalar::Float)
    }
}

fn convert_object(mut map: Map<String, Value>) -> PropertyValue {
    if map.len() == 1
        && matches!(map.get(DICTIONARY_MARKER), Some(Value::Object(_)))
        && let Some(Value::Object(entries)) = map.remove(DICTIONARY_MARKER)
    {
        return PropertyValue::Dictionary(
            entries
                .into_iter()
                .map(|(key, value)| (parse_key(key), convert(value)))
                .collect(),
        );
    }

    let type_tag = match map.get(TYPE_TAG_MARKER) {
        Some(Value::String(tag)) => Some(tag.clone()),
        _ => None,
    };

    let members = map
        .into_iter()
        .filter(|(name, _)| type_tag.is_none() || name != TYPE_TAG_MARKER)
        .map(|(name, value)| (name, convert(value)))
        .collect();

    PropertyValue::Structure(Structure { type_tag, members })
}

/// Dictionary keys are object keys, so always strings on the wire. Keys
/// that spell a JSON literal or number are read back as that scalar.
fn parse_key(key: String) -> Scalar {
    match key.as_str() {
        "null" => Scalar::Null,
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        _ => match serde_json::from_str::<Number>(&key) {
            Ok(n) => convert_number(&n),
            Err(_) => Scalar::String(key),
        },
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_scalar(f, self, false)
    }
}

/// Top-level strings are written bare; strings nested inside sequences,
/// structures and dictionaries are quoted.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, false)
    }
}

fn write_scalar(f: &mut fmt::Formatter<'_>, scalar: &Scalar, quoted: bool) -> fmt::Result {
    match scalar {
        Scalar::Null => f.write_str("null"),
        Scalar::Bool(b) => write!(f, "{b}"),
        Scalar::Integer(i) => write!(f, "{i}"),
        Scalar::Unsigned(u) => write!(f, "{u}"),
        Scalar::Float(x) => write!(f, "{x}"),
        Scalar::String(s) if quoted => {
            let escaped = serde_json::to_string(s).map_err(|_| fmt::Error)?;
            f.write_str(&escaped)
        }
        Scalar::String(s) => f.write_str(s),
        Scalar::DateTime(ts) => write!(f, "{ts}"),
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &PropertyValue, quoted: bool) -> fmt::Result {
    match value {
        PropertyValue::Scalar(scalar) => write_scalar(f, scalar, quoted),
        PropertyValue::Sequence(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, true)?;
            }
            f.write_str("]")
        }
        PropertyValue::Structure(structure) => {
            if let Some(tag) = &structure.type_tag {
                write!(f, "{tag} ")?;
            }
            if structure.members.is_empty() {
                return f.write_str("{}");
            }
            f.write_str("{ ")?;
            for (i, (name, member)) in structure.members.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: ")?;
                write_value(f, member, true)?;
            }
            f.write_str(" }")
        }
        PropertyValue::Dictionary(entries) => {
            f.write_str("[")?;
            for (i, (key, entry)) in entries.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str("(")?;
                write_scalar(f, key, true)?;
                f.write_str(": ")?;
                write_value(f, entry, true)?;
                f.write_str(")")?;
            }
            f.write_str("]")
        }
        PropertyValue::Rendered(rendered) => write_value(f, &rendered.value, quoted),
    }
}
