//! `clef_reader`: decode newline-delimited compact JSON log events.
//!
//! Each line holds one JSON object. Reserved `@`-prefixed fields carry the
//! timestamp, level, message template, exception, renderings and ids; every
//! other field is a property of the event.
//!
//! # Example
//!
//! ```
//! use clef_reader::{Level, LogEventReader};
//!
//! let input = concat!(
//!     r#"{"@t":"2026-01-15T10:30:00Z","@mt":"Hello, {Name}","Name":"Bob"}"#, "\n",
//!     "\n",
//!     r#"{"@t":"2026-01-15T10:30:01Z","@l":"warning","@m":"Disk low"}"#, "\n",
//! );
//!
//! let mut reader = LogEventReader::new(input.as_bytes());
//! let first = reader.try_read()?.unwrap();
//! assert_eq!(first.render_message(), "Hello, Bob");
//!
//! let second = reader.try_read()?.unwrap();
//! assert_eq!(second.level(), Level::Warning);
//! assert!(reader.try_read()?.is_none());
//! # Ok::<(), clef_reader::ClefError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod fields;
pub mod formatter;
pub mod id;
pub mod level;
pub mod parser;
pub mod reader;
pub mod template;
pub mod timestamp;
pub mod value;

// Re-export primary API types for convenience.
pub use config::Config;
pub use error::ClefError;
pub use event::{LogEvent, LogEventProperty, TextException};
pub use formatter::format_event;
pub use id::{SpanId, TraceId};
pub use level::Level;
pub use reader::{LogEventReader, read_from_str, read_from_value};
pub use template::MessageTemplate;
pub use value::{PropertyValue, Rendering, Scalar, Structure};
