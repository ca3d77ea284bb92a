//! Path templates with `{variable}` placeholders.
//!
//! A [`Template`] is parsed once from its pattern and rendered against a set
//! of [`Bindings`]. Variable names are ASCII letters, digits and `_`; braces
//! must always be balanced and cannot nest.

mod render;

pub use render::{Bindings, UnboundVariable};

use std::fmt;
use thiserror::Error;

/// Errors raised while parsing a template pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unmatched '{{' at position {0}")]
    UnmatchedOpen(usize),
    #[error("unmatched '}}' at position {0}")]
    UnmatchedClose(usize),
    #[error("empty variable name at position {0}")]
    EmptyVariable(usize),
    #[error("invalid variable name '{name}' at position {position}")]
    InvalidVariable { name: String, position: usize },
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim.
    Literal(String),
    /// Placeholder replaced at render time.
    Variable(String),
}

/// Parsed template pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    raw: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Split a pattern into literal and variable segments.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.char_indices();

        while let Some((position, ch)) = chars.next() {
            match ch {
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => return Err(TemplateError::UnmatchedOpen(position)),
                            _ => name.push(inner),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::UnmatchedOpen(position));
                    }
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(TemplateError::EmptyVariable(position));
                    }
                    if !is_variable_name(name) {
                        return Err(TemplateError::InvalidVariable {
                            name: name.to_string(),
                            position,
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Variable(name.to_string()));
                }
                '}' => return Err(TemplateError::UnmatchedClose(position)),
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern this template was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Variable names in order of appearance, duplicates included.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render with the given bindings.
    pub fn render(&self, bindings: &Bindings<'_>) -> String {
        bindings.render(self)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_variable_name(name: &str) -> bool {
    name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
