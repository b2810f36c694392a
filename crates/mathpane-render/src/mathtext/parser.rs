//! Recursive-descent parser for the math segments of a markup string.

use super::symbols::{self, Accent, CommandKind, FontStyle, Space};
use super::ParseError;

/// Math syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single letter, set in math italic.
    Ident(char),
    Number(String),
    /// Any other single character: operators, punctuation, symbols.
    Symbol(char),
    /// `{...}`
    Group(Vec<Node>),
    Scripts {
        base: Box<Node>,
        sub: Option<Box<Node>>,
        sup: Option<Box<Node>>,
    },
    Frac(Box<Node>, Box<Node>),
    Binom(Box<Node>, Box<Node>),
    Sqrt {
        index: Option<Box<Node>>,
        radicand: Box<Node>,
    },
    Accent {
        accent: Accent,
        body: Box<Node>,
    },
    Font {
        style: FontStyle,
        body: Box<Node>,
    },
    /// Upright text from `\text{...}`.
    Text(String),
    Space(Space),
    Operator {
        name: String,
        limits: bool,
    },
    /// `\left ... \right`; `None` is the invisible `.` delimiter.
    Delimited {
        open: Option<char>,
        body: Vec<Node>,
        close: Option<char>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Until {
    End,
    Brace,
    Bracket,
    Right,
}

enum Parsed {
    Node(Node),
    Skip,
    Right,
}

/// Parses one math segment. Offsets in errors are relative to `base`.
pub(crate) struct Parser<'a> {
    src: &'a str,
    pos: usize,
    base: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, base: usize) -> Self {
        Self { src, pos: 0, base }
    }

    pub fn parse(mut self) -> Result<Vec<Node>, ParseError> {
        self.sequence(Until::End)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, message: impl Into<String>, at: usize) -> ParseError {
        ParseError::new(message, self.base + at)
    }

    fn sequence(&mut self, until: Until) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            self.skip_whitespace();
            let start = self.pos;
            let Some(c) = self.bump() else {
                return match until {
                    Until::End => Ok(nodes),
                    Until::Brace => Err(self.error("Expected '}'", start)),
                    Until::Bracket => Err(self.error("Expected ']'", start)),
                    Until::Right => Err(self.error("Expected \\right", start)),
                };
            };
            match c {
                '{' => nodes.push(Node::Group(self.sequence(Until::Brace)?)),
                '}' if until == Until::Brace => return Ok(nodes),
                '}' => return Err(self.error("Unexpected '}'", start)),
                ']' if until == Until::Bracket => return Ok(nodes),
                '^' | '_' => {
                    let owner = if c == '^' { "superscript" } else { "subscript" };
                    let arg = self.argument(owner)?;
                    self.attach(&mut nodes, c == '^', arg, start)?;
                }
                '\\' => match self.command(start, until)? {
                    Parsed::Node(node) => nodes.push(node),
                    Parsed::Skip => {}
                    Parsed::Right => return Ok(nodes),
                },
                _ => nodes.push(self.atom(c)),
            }
        }
    }

    fn atom(&mut self, c: char) -> Node {
        if c.is_ascii_digit() {
            let start = self.pos - 1;
            while let Some(next) = self.peek() {
                let continues = next.is_ascii_digit()
                    || (next == '.'
                        && self.src[self.pos + 1..]
                            .chars()
                            .next()
                            .is_some_and(|d| d.is_ascii_digit()));
                if !continues {
                    break;
                }
                self.pos += 1;
            }
            Node::Number(self.src[start..self.pos].to_string())
        } else if c.is_alphabetic() {
            Node::Ident(c)
        } else if c == '\'' {
            Node::Symbol('′')
        } else {
            Node::Symbol(c)
        }
    }

    fn attach(&self, nodes: &mut Vec<Node>, is_sup: bool, arg: Node, at: usize) -> Result<(), ParseError> {
        let (base, mut sub, mut sup) = match nodes.pop() {
            Some(Node::Scripts { base, sub, sup }) => (base, sub, sup),
            Some(other) => (Box::new(other), None, None),
            None => (Box::new(Node::Group(Vec::new())), None, None),
        };
        let slot = if is_sup { &mut sup } else { &mut sub };
        if slot.is_some() {
            let message = if is_sup { "Double superscript" } else { "Double subscript" };
            return Err(self.error(message, at));
        }
        *slot = Some(Box::new(arg));
        nodes.push(Node::Scripts { base, sub, sup });
        Ok(())
    }

    /// A single required argument: a braced group, a command or one character.
    fn argument(&mut self, owner: &str) -> Result<Node, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let missing = |parser: &Self| parser.error(format!("Missing argument for {owner}"), start);
        match self.bump() {
            None | Some('}') => Err(missing(self)),
            Some('{') => Ok(Node::Group(self.sequence(Until::Brace)?)),
            Some('^') | Some('_') => Err(self.error("Unexpected script", start)),
            Some('\\') => match self.command(start, Until::End)? {
                Parsed::Node(node) => Ok(node),
                Parsed::Skip | Parsed::Right => Err(missing(self)),
            },
            Some(c) if c.is_ascii_digit() => Ok(Node::Number(c.to_string())),
            Some(c) => Ok(self.atom(c)),
        }
    }

    fn command_name(&mut self, start: usize) -> Result<&'a str, ParseError> {
        let name_start = self.pos;
        match self.peek() {
            None => Err(self.error("Dangling backslash", start)),
            Some(c) if c.is_ascii_alphabetic() => {
                while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                    self.pos += 1;
                }
                Ok(&self.src[name_start..self.pos])
            }
            Some(c) => {
                self.pos += c.len_utf8();
                Ok(&self.src[name_start..self.pos])
            }
        }
    }

    fn command(&mut self, start: usize, until: Until) -> Result<Parsed, ParseError> {
        let name = self.command_name(start)?;
        let node = match name {
            "right" if until == Until::Right => return Ok(Parsed::Right),
            "right" => return Err(self.error("\\right without matching \\left", start)),
            "left" => {
                let open = self.delimiter("\\left")?;
                let body = self.sequence(Until::Right)?;
                let close = self.delimiter("\\right")?;
                Node::Delimited { open, body, close }
            }
            "frac" | "dfrac" | "tfrac" | "cfrac" => {
                let num = self.argument("\\frac")?;
                let den = self.argument("\\frac")?;
                Node::Frac(Box::new(num), Box::new(den))
            }
            "binom" => {
                let top = self.argument("\\binom")?;
                let bottom = self.argument("\\binom")?;
                Node::Binom(Box::new(top), Box::new(bottom))
            }
            "sqrt" => {
                self.skip_whitespace();
                let index = if self.peek() == Some('[') {
                    self.pos += 1;
                    Some(Box::new(Node::Group(self.sequence(Until::Bracket)?)))
                } else {
                    None
                };
                let radicand = Box::new(self.argument("\\sqrt")?);
                Node::Sqrt { index, radicand }
            }
            "text" | "textrm" | "textnormal" | "textit" | "textbf" | "textsf" | "texttt" | "mbox" => {
                Node::Text(self.raw_text(name)?)
            }
            "operatorname" => Node::Operator {
                name: self.raw_text(name)?,
                limits: false,
            },
            _ => match symbols::lookup(name) {
                Some(CommandKind::Symbol(c)) => Node::Symbol(c),
                Some(CommandKind::Function { limits }) => Node::Operator {
                    name: name.to_string(),
                    limits,
                },
                Some(CommandKind::Accent(accent)) => Node::Accent {
                    accent,
                    body: Box::new(self.argument(&format!("\\{name}"))?),
                },
                Some(CommandKind::Font(style)) => Node::Font {
                    style,
                    body: Box::new(self.argument(&format!("\\{name}"))?),
                },
                Some(CommandKind::Space(space)) => Node::Space(space),
                Some(CommandKind::Ignore) => return Ok(Parsed::Skip),
                None => return Err(self.error(format!("Unknown symbol: \\{name}"), start)),
            },
        };
        Ok(Parsed::Node(node))
    }

    fn delimiter(&mut self, owner: &str) -> Result<Option<char>, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let expected = |parser: &Self| parser.error(format!("Expected a delimiter after {owner}"), start);
        match self.bump() {
            Some('.') => Ok(None),
            Some('\\') => {
                let name = self.command_name(start)?;
                symbols::delimiter_command(name).map(Some).ok_or_else(|| expected(self))
            }
            Some(c) => symbols::delimiter_char(c).map(Some).ok_or_else(|| expected(self)),
            None => Err(expected(self)),
        }
    }

    /// Literal text inside `\text{...}`. Nested braces are kept balanced.
    fn raw_text(&mut self, owner: &str) -> Result<String, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        if self.bump() != Some('{') {
            return Err(self.error(format!("Expected '{{' after \\{owner}"), start));
        }
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.bump() {
                None => return Err(self.error("Expected '}'", self.pos)),
                Some('}') if depth == 0 => return Ok(text),
                Some('}') => {
                    depth -= 1;
                    text.push('}');
                }
                Some('{') => {
                    depth += 1;
                    text.push('{');
                }
                Some('\\') => match self.peek() {
                    Some(c) if !c.is_ascii_alphabetic() => {
                        self.pos += c.len_utf8();
                        text.push(c);
                    }
                    _ => text.push('\\'),
                },
                Some(c) => text.push(c),
            }
        }
    }
}
