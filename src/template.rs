//! Message templates: literal text interleaved with `{Property}` holes.
//!
//! Grammar accepted by [`MessageTemplate::parse`]:
//!
//! ```text
//! {{ and }}                      literal braces
//! { [@|$] name [,[-]width] [:format] }   property token
//! ```
//!
//! Names are letters, digits and `_`. Anything between braces that does not
//! fit the token grammar, and an unterminated `{`, stays literal text.
//! Parsing never fails.

use std::fmt::Write;

use crate::event::LogEventProperty;

/// How a property was asked to be captured (`{@Name}` / `{$Name}`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Destructuring {
    #[default]
    Default,
    Stringify,
    Destructure,
}

/// Padding requested with `{Name,10}` (right) or `{Name,-10}` (left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left(usize),
    Right(usize),
}

/// A `{...}` hole in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyToken {
    pub name: String,
    pub format: Option<String>,
    pub alignment: Option<Alignment>,
    pub destructuring: Destructuring,
    /// The token exactly as written, braces included.
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Property(PropertyToken),
}

/// A parsed message template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    tokens: Vec<Token>,
}

impl MessageTemplate {
    /// The empty template, with no tokens.
    pub const fn empty() -> Self {
        Self {
            text: String::new(),
            tokens: Vec::new(),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: parse_tokens(text),
        }
    }

    /// Source text of the template.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Property tokens in template order.
    pub fn property_tokens(&self) -> impl Iterator<Item = &PropertyToken> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Property(prop) => Some(prop),
            Token::Text(_) => None,
        })
    }

    /// Render the template against a property list.
    ///
    /// A precomputed rendering for the token's format is used when the
    /// property carries one. Tokens with no matching property are written as
    /// their raw text.
    pub fn render(&self, properties: &[LogEventProperty]) -> String {
        let mut out = String::with_capacity(self.text.len());
        for token in &self.tokens {
            match token {
                Token::Text(text) => out.push_str(text),
                Token::Property(prop) => {
                    match properties.iter().find(|p| p.name == prop.name) {
                        Some(property) => prop.render_into(property, &mut out),
                        None => out.push_str(&prop.raw),
                    }
                }
            }
        }
        out
    }
}

impl PropertyToken {
    fn render_into(&self, property: &LogEventProperty, out: &mut String) {
        let text = self
            .format
            .as_deref()
            .and_then(|format| property.value.rendering(format))
            .map_or_else(|| property.value.to_string(), str::to_string);

        let _ = match self.alignment {
            Some(Alignment::Left(width)) => write!(out, "{text:<width$}"),
            Some(Alignment::Right(width)) => write!(out, "{text:>width$}"),
            None => out.write_str(&text),
        };
    }
}

/// Escape plain text so that it parses back as a single literal.
///
/// Used when an event carries only a rendered `@m` message.
pub fn escape_text(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

fn parse_tokens(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '{' if rest[1..].starts_with('{') => {
                literal.push('{');
                rest = &rest[2..];
            }
            '}' if rest[1..].starts_with('}') => {
                literal.push('}');
                rest = &rest[2..];
            }
            '{' => {
                let Some(end) = rest.find('}') else {
                    literal.push_str(rest);
                    break;
                };
                let raw = &rest[..=end];
                match parse_property(raw) {
                    Some(prop) => {
                        if !literal.is_empty() {
                            tokens.push(Token::Text(std::mem::take(&mut literal)));
                        }
                        tokens.push(Token::Property(prop));
                    }
                    None => literal.push_str(raw),
                }
                rest = &rest[end + 1..];
            }
            _ => {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Text(literal));
    }
    tokens
}

/// Parse `{...}` (braces included) into a property token.
fn parse_property(raw: &str) -> Option<PropertyToken> {
    let inner = &raw[1..raw.len() - 1];

    let (destructuring, inner) = match inner.chars().next() {
        Some('@') => (Destructuring::Destructure, &inner[1..]),
        Some('$') => (Destructuring::Stringify, &inner[1..]),
        _ => (Destructuring::Default, inner),
    };

    let (head, format) = match inner.split_once(':') {
        Some((_, "")) => return None,
        Some((head, format)) => (head, Some(format.to_string())),
        None => (inner, None),
    };

    let (name, alignment) = match head.split_once(',') {
        Some((name, width)) => (name, Some(parse_alignment(width)?)),
        None => (head, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    Some(PropertyToken {
        name: name.to_string(),
        format,
        alignment,
        destructuring,
        raw: raw.to_string(),
    })
}

fn parse_alignment(s: &str) -> Option<Alignment> {
    let (left, digits) = match s.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let width = digits.parse().ok()?;
    Some(if left {
        Alignment::Left(width)
    } else {
        Alignment::Right(width)
    })
}
