//! TeX-style math markup.
//!
//! A markup string is plain text with math segments between unescaped
//! dollar signs. It only contains math when the number of unescaped
//! dollars is non-zero and even; otherwise the whole string is plain
//! text. Math segments are parsed into a [`Node`] tree and lowered to
//! typst math.

mod lower;
pub mod parser;
pub mod symbols;

use std::fmt;

pub use parser::Node;

/// Markup rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset into the full markup string.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

impl std::error::Error for ParseError {}

/// A run of plain text or a parsed math segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Math(Vec<Node>),
}

/// Parsed markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathText {
    segments: Vec<Segment>,
}

impl MathText {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|segment| match segment {
            Segment::Text(text) => text.is_empty(),
            Segment::Math(nodes) => nodes.is_empty(),
        })
    }

    /// Typst markup for the whole string: text as string literals, math
    /// as inline equations.
    pub fn to_typst(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) if !text.is_empty() => {
                    out.push('#');
                    out.push_str(&lower::string_literal(text));
                }
                Segment::Math(nodes) if !nodes.is_empty() => {
                    out.push('$');
                    out.push_str(&lower::math(nodes));
                    out.push('$');
                }
                _ => {}
            }
        }
        out
    }
}

/// Byte offsets of the dollar signs that are not escaped with a backslash.
fn unescaped_dollars(markup: &str) -> Vec<usize> {
    let mut dollars = Vec::new();
    let mut escaped = false;
    for (offset, c) in markup.char_indices() {
        match c {
            '$' if !escaped => dollars.push(offset),
            _ => {}
        }
        escaped = c == '\\' && !escaped;
    }
    dollars
}

/// True when `markup` holds at least one math segment.
pub fn has_math(markup: &str) -> bool {
    let count = unescaped_dollars(markup).len();
    count > 0 && count % 2 == 0
}

/// Parse a markup string.
pub fn parse(markup: &str) -> Result<MathText, ParseError> {
    if !has_math(markup) {
        return Ok(MathText {
            segments: vec![Segment::Text(unescape_text(markup))],
        });
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for (i, dollar) in unescaped_dollars(markup).into_iter().enumerate() {
        let piece = &markup[start..dollar];
        if i % 2 == 0 {
            segments.push(Segment::Text(unescape_text(piece)));
        } else {
            segments.push(Segment::Math(parser::Parser::new(piece, start).parse()?));
        }
        start = dollar + 1;
    }
    segments.push(Segment::Text(unescape_text(&markup[start..])));

    log::trace!("Parsed {} markup segments", segments.len());
    Ok(MathText { segments })
}

fn unescape_text(text: &str) -> String {
    text.replace("\\$", "$")
}
