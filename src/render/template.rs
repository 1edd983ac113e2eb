//! Placeholder substitution engine.
//!
//! Syntax: `$name` or `${name}` where `name` is `[A-Za-z_][A-Za-z0-9_]*`,
//! and `$$` for a literal dollar sign. There are no conditionals or loops;
//! repeated blocks are rendered by the caller once per item.

use std::collections::HashMap;

use thiserror::Error;

/// Rendering failure. Always fatal for the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template references unbound placeholder `{name}`")]
    UnboundPlaceholder { name: String },

    #[error("invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholder { line: usize, column: usize },
}

/// Values available to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(HashMap<String, String>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to the display form of `value`.
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source`, rejecting malformed `$` uses.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut cursor = 0;

        while let Some(offset) = source[cursor..].find('$') {
            let pos = cursor + offset;
            literal.push_str(&source[cursor..pos]);
            let rest = &source[pos + 1..];

            if rest.starts_with('$') {
                literal.push('$');
                cursor = pos + 2;
                continue;
            }

            let (name, consumed) = match rest.strip_prefix('{') {
                Some(braced) => {
                    let len = identifier_len(braced);
                    if len == 0 || !braced[len..].starts_with('}') {
                        return Err(invalid_at(source, pos));
                    }
                    (&braced[..len], len + 2)
                }
                None => {
                    let len = identifier_len(rest);
                    if len == 0 {
                        return Err(invalid_at(source, pos));
                    }
                    (&rest[..len], len)
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            cursor = pos + 1 + consumed;
        }

        literal.push_str(&source[cursor..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Placeholder names in order of appearance (repeats included).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder. Extra bindings are ignored.
    pub fn render(&self, bindings: &Bindings) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match bindings.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::UnboundPlaceholder { name: name.clone() })
                    }
                },
            }
        }
        Ok(out)
    }
}

/// Parse and render in one step.
pub fn render(source: &str, bindings: &Bindings) -> Result<String, TemplateError> {
    Template::parse(source)?.render(bindings)
}

fn identifier_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return 0,
    }
    bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count()
}

fn invalid_at(source: &str, pos: usize) -> TemplateError {
    let before = &source[..pos];
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    TemplateError::InvalidPlaceholder {
        line: before.matches('\n').count() + 1,
        column: pos - line_start + 1,
    }
}
