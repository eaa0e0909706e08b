//! Reserved field names of the compact event format and the escaping rule
//! that keeps user property names apart from them.
//!
//! Every reserved name starts with [`MARKER`]. A user property whose name
//! starts with the marker is written with one extra leading marker, so
//! `@@xpto` on the wire is the user property `@xpto`.

/// Leading character of every reserved field name.
pub const MARKER: char = '@';

/// Property name under which a decoded `@i` event id is exposed.
pub const EVENT_ID_PROPERTY: &str = "@i";

/// Member name that tags an object as a typed structure (`{"$type":"Point",...}`).
pub const TYPE_TAG_MARKER: &str = "$type";

/// Sole member name that marks an object as a dictionary (`{"$dictionary":{...}}`).
pub const DICTIONARY_MARKER: &str = "$dictionary";

/// Fields with a fixed decode meaning, excluded from user properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedField {
    Timestamp,
    MessageTemplate,
    Message,
    Level,
    Exception,
    Renderings,
    EventId,
    TraceId,
    SpanId,
}

impl ReservedField {
    pub const ALL: [Self; 9] = [
        Self::Timestamp,
        Self::MessageTemplate,
        Self::Message,
        Self::Level,
        Self::Exception,
        Self::Renderings,
        Self::EventId,
        Self::TraceId,
        Self::SpanId,
    ];

    /// The field name as it appears on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Timestamp => "@t",
            Self::MessageTemplate => "@mt",
            Self::Message => "@m",
            Self::Level => "@l",
            Self::Exception => "@x",
            Self::Renderings => "@r",
            Self::EventId => "@i",
            Self::TraceId => "@tr",
            Self::SpanId => "@sp",
        }
    }

    /// Look up a wire field name. Exact, case-sensitive match.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Whether `name` is one of the reserved wire field names.
pub fn is_reserved(name: &str) -> bool {
    ReservedField::from_name(name).is_some()
}

/// Escape a user property name for the wire.
///
/// Names starting with the marker (which covers every reserved name) get
/// one extra leading marker; all other names are unchanged.
pub fn escape(name: &str) -> std::borrow::Cow<'_, str> {
    if name.starts_with(MARKER) {
        std::borrow::Cow::Owned(format!("{MARKER}{name}"))
    } else {
        std::borrow::Cow::Borrowed(name)
    }
}

/// Reverse [`escape`]: strip exactly one leading marker from a doubled one.
pub fn unescape(name: &str) -> &str {
    if name.starts_with("@@") {
        &name[MARKER.len_utf8()..]
    } else {
        name
    }
}
