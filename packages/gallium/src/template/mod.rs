//! Format templates
//!
//! A template is text with `{name}` or `{name:spec}` placeholders. The spec
//! uses the common format mini-language (see [`FormatSpec`]), and can
//! reference other fields, like `{count:{len_total}d}`. Braces are escaped
//! by doubling them (`{{` and `}}`).
//!
//! Placeholders that are not in the field mapping fail the render
//! instead of being left in the output.
//!
//! One field name can be rendered as a split point instead of a value
//! (see [`Template::render_split`]). This is how the bar and fill are
//! sized: the rest of the line is rendered first, measured, then the
//! split points are filled in.

mod spec;
pub use spec::{Align, FormatSpec, Sign};

use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

use crate::fields::FieldMap;
use crate::{Error, Result};

/// A parsed format template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Literal(String),
    Field { name: String, spec: Vec<SpecPiece> },
}

#[derive(Debug, Clone, PartialEq)]
enum SpecPiece {
    Literal(String),
    Field(String),
}

impl Template {
    /// Parse the template
    ///
    /// ```rust
    /// # use pistonite_ga as ga;
    /// use ga::{FieldMap, Template, Value};
    ///
    /// let template = Template::parse("{{{count:{len}d}}}")?;
    /// let mut fields = FieldMap::new();
    /// fields.insert("count".to_string(), Value::Int(7));
    /// fields.insert("len".to_string(), Value::Int(3));
    /// assert_eq!(template.render(&fields)?, "{  7}");
    /// # Ok::<(), ga::Error>(())
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let mut pieces = vec![];
        let mut literal = String::new();
        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.next_if_eq(&'{').is_some() {
                        literal.push('{');
                        continue;
                    }
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(parse_field(&mut chars, source)?);
                }
                '}' => {
                    if chars.next_if_eq(&'}').is_some() {
                        literal.push('}');
                        continue;
                    }
                    return Err(Error::Template(format!(
                        "single '}}' encountered in format: {source:?}"
                    )));
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    /// The template source
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render the template with the fields
    pub fn render(&self, fields: &FieldMap) -> Result<String> {
        let mut parts = self.render_parts(fields, None)?;
        Ok(parts.pop().unwrap_or_default())
    }

    /// Render the template, leaving a split point at every placeholder of `placeholder`.
    /// The format spec of those placeholders is ignored.
    pub fn render_split(&self, fields: &FieldMap, placeholder: &str) -> Result<Rendered> {
        let parts = self.render_parts(fields, Some(placeholder))?;
        Ok(Rendered { parts })
    }

    fn render_parts(&self, fields: &FieldMap, placeholder: Option<&str>) -> Result<Vec<String>> {
        let mut parts = vec![];
        let mut current = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => current.push_str(text),
                Piece::Field { name, .. } if Some(name.as_str()) == placeholder => {
                    parts.push(std::mem::take(&mut current));
                }
                Piece::Field { name, spec } => {
                    let value = fields
                        .get(name)
                        .ok_or_else(|| Error::MissingField(name.clone()))?;
                    if spec.is_empty() {
                        // _: fmt for string does not fail
                        let _ = write!(current, "{value}");
                        continue;
                    }
                    let mut spec_str = String::new();
                    for spec_piece in spec {
                        match spec_piece {
                            SpecPiece::Literal(text) => spec_str.push_str(text),
                            SpecPiece::Field(nested) => {
                                let nested_value = fields
                                    .get(nested)
                                    .ok_or_else(|| Error::MissingField(nested.clone()))?;
                                let _ = write!(spec_str, "{nested_value}");
                            }
                        }
                    }
                    let format_spec = FormatSpec::parse(&spec_str)?;
                    current.push_str(&format_spec.apply(name, value)?);
                }
            }
        }
        parts.push(current);
        Ok(parts)
    }
}

impl std::str::FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn parse_name(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<(String, char)> {
    let mut name = String::new();
    loop {
        match chars.next() {
            None => {
                return Err(Error::Template(format!(
                    "expected '}}' before end of format: {source:?}"
                )));
            }
            Some(c @ ('}' | ':')) => {
                if name.is_empty() {
                    return Err(Error::Template(format!(
                        "empty field name in format: {source:?}"
                    )));
                }
                return Ok((name, c));
            }
            Some(c) if is_name_char(c) => name.push(c),
            Some(c) => {
                return Err(Error::Template(format!(
                    "unsupported character {c:?} in field name {name:?}"
                )));
            }
        }
    }
}

fn parse_field(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<Piece> {
    let (name, end) = parse_name(chars, source)?;
    if end == '}' {
        return Ok(Piece::Field { name, spec: vec![] });
    }
    let mut spec = vec![];
    let mut literal = String::new();
    loop {
        match chars.next() {
            None => {
                return Err(Error::Template(format!(
                    "expected '}}' before end of format: {source:?}"
                )));
            }
            Some('}') => break,
            Some('{') => {
                let (nested, end) = parse_name(chars, source)?;
                if end != '}' {
                    return Err(Error::Template(format!(
                        "nested field {nested:?} cannot have a format spec"
                    )));
                }
                if !literal.is_empty() {
                    spec.push(SpecPiece::Literal(std::mem::take(&mut literal)));
                }
                spec.push(SpecPiece::Field(nested));
            }
            Some(c) => literal.push(c),
        }
    }
    if !literal.is_empty() {
        spec.push(SpecPiece::Literal(literal));
    }
    Ok(Piece::Field { name, spec })
}

/// A rendered template with split points left open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Text between the split points. There is always one more part than split points
    parts: Vec<String>,
}

impl Rendered {
    /// Number of split points
    pub fn split_points(&self) -> usize {
        self.parts.len().saturating_sub(1)
    }

    /// The text with all split points removed
    pub fn text(&self) -> String {
        self.parts.concat()
    }

    /// Join the parts, filling the i-th split point with `fill(i)`
    pub fn join_with(self, mut fill: impl FnMut(usize) -> String) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.into_iter().enumerate() {
            if i > 0 {
                out.push_str(&fill(i - 1));
            }
            out.push_str(&part);
        }
        out
    }
}
