//! Lowering of math trees to typst math markup.
//!
//! Atoms are separated by spaces so adjacent letters never merge into a
//! typst identifier and operator pairs never form shorthands.

use super::parser::Node;
use super::symbols::{Accent, FontStyle, Space};

/// Typst math for a sequence of nodes, without the enclosing dollars.
pub fn math(nodes: &[Node]) -> String {
    nodes.iter().map(node).collect::<Vec<_>>().join(" ")
}

/// A typst string literal holding `text`.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn symbol(c: char) -> String {
    match c {
        '+' | '-' | '=' | '<' | '>' | '!' | '?' => c.to_string(),
        _ if c.is_ascii_punctuation() => format!("\\{c}"),
        _ => c.to_string(),
    }
}

/// Argument position: empty groups need a placeholder.
fn argument(n: &Node) -> String {
    let out = node(n);
    if out.is_empty() {
        "\"\"".to_string()
    } else {
        out
    }
}

fn node(n: &Node) -> String {
    match n {
        Node::Ident(c) => c.to_string(),
        Node::Number(digits) => digits.clone(),
        Node::Symbol(c) => symbol(*c),
        Node::Group(nodes) => math(nodes),
        Node::Scripts { base, sub, sup } => {
            let mut out = format!("attach({}", argument(base));
            if let Some(sub) = sub {
                out.push_str(&format!(", b: {}", argument(sub)));
            }
            if let Some(sup) = sup {
                out.push_str(&format!(", t: {}", argument(sup)));
            }
            out.push(')');
            out
        }
        Node::Frac(num, den) => format!("frac({}, {})", argument(num), argument(den)),
        Node::Binom(top, bottom) => format!("binom({}, {})", argument(top), argument(bottom)),
        Node::Sqrt { index: None, radicand } => format!("sqrt({})", argument(radicand)),
        Node::Sqrt {
            index: Some(index),
            radicand,
        } => format!("root({}, {})", argument(index), argument(radicand)),
        Node::Accent { accent, body } => format!("{}({})", accent_function(*accent), argument(body)),
        Node::Font { style, body } => font(*style, &argument(body)),
        Node::Text(text) => string_literal(text),
        Node::Space(space) => space_markup(*space).to_string(),
        Node::Operator { name, limits: false } => format!("op({})", string_literal(name)),
        Node::Operator { name, limits: true } => {
            format!("op({}, limits: #true)", string_literal(name))
        }
        Node::Delimited { open, body, close } => {
            let mut parts = Vec::new();
            if let Some(open) = open {
                parts.push(symbol(*open));
            }
            if !body.is_empty() {
                parts.push(math(body));
            }
            if let Some(close) = close {
                parts.push(symbol(*close));
            }
            format!("lr({})", parts.join(" "))
        }
    }
}

fn accent_function(accent: Accent) -> &'static str {
    match accent {
        Accent::Hat => "hat",
        Accent::Tilde => "tilde",
        Accent::Bar => "overline",
        Accent::Vec => "arrow",
        Accent::Dot => "dot",
        Accent::DoubleDot => "dot.double",
        Accent::Acute => "acute",
        Accent::Grave => "grave",
        Accent::Breve => "breve",
        Accent::Check => "caron",
        Accent::Underline => "underline",
    }
}

fn font(style: FontStyle, body: &str) -> String {
    match style {
        FontStyle::Roman => format!("upright({body})"),
        FontStyle::Bold => format!("bold(upright({body}))"),
        FontStyle::Italic => format!("italic({body})"),
        FontStyle::Calligraphic => format!("cal({body})"),
        FontStyle::Blackboard => format!("bb({body})"),
        FontStyle::SansSerif => format!("sans({body})"),
        FontStyle::Monospace => format!("mono({body})"),
        FontStyle::Fraktur => format!("frak({body})"),
    }
}

fn space_markup(space: Space) -> &'static str {
    match space {
        Space::NegativeThin => "#h(-0.1667em)",
        Space::Thin => "thin",
        Space::Medium => "med",
        Space::Thick => "thick",
        Space::Normal => "#h(0.25em)",
        Space::Quad => "quad",
        Space::QQuad => "wide",
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::Parser;
    use super::*;

    fn lower(src: &str) -> String {
        math(&Parser::new(src, 0).parse().unwrap())
    }

    #[test]
    fn test_letters_stay_separate() {
        assert_eq!(lower("abc"), "a b c");
        assert_eq!(lower("x+1"), "x + 1");
    }

    #[test]
    fn test_punctuation_is_escaped() {
        assert_eq!(lower("f(x,y)"), r"f \( x \, y \)");
        assert_eq!(lower(r"a/b"), r"a \/ b");
        assert_eq!(lower(r"\{x\}"), r"\{ x \}");
    }

    #[test]
    fn test_fraction_and_root() {
        assert_eq!(lower(r"\frac{1}{2}"), "frac(1, 2)");
        assert_eq!(lower(r"\sqrt[3]{x}"), "root(3, x)");
        assert_eq!(lower(r"\sqrt{a+b}"), "sqrt(a + b)");
    }

    #[test]
    fn test_scripts_use_attach() {
        assert_eq!(lower("x_i^2"), "attach(x, b: i, t: 2)");
        assert_eq!(lower("^2"), "attach(\"\", t: 2)");
        assert_eq!(lower(r"\sum_{n=0}^\infty"), "attach(∑, b: n = 0, t: ∞)");
    }

    #[test]
    fn test_operators() {
        assert_eq!(lower(r"\sin x"), "op(\"sin\") x");
        assert_eq!(
            lower(r"\lim_{x \to 0}"),
            "attach(op(\"lim\", limits: #true), b: x → 0)"
        );
        assert_eq!(lower(r"\operatorname{sgn} x"), "op(\"sgn\") x");
    }

    #[test]
    fn test_accents_fonts_spaces() {
        assert_eq!(lower(r"\hat{x}"), "hat(x)");
        assert_eq!(lower(r"\ddot x"), "dot.double(x)");
        assert_eq!(lower(r"\mathbb{R}"), "bb(R)");
        assert_eq!(lower(r"\mathbf{v}"), "bold(upright(v))");
        assert_eq!(lower(r"a\,b\quad c"), "a thin b quad c");
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(lower(r"\left( \frac{a}{b} \right)"), r"lr(\( frac(a, b) \))");
        assert_eq!(lower(r"\left. x \right|"), r"lr(x \|)");
        assert_eq!(lower(r"\left\langle x \right\rangle"), "lr(⟨ x ⟩)");
    }

    #[test]
    fn test_text_and_string_literal() {
        assert_eq!(lower(r#"\text{say "hi"}"#), r#""say \"hi\"""#);
        assert_eq!(string_literal(r"a\b"), r#""a\\b""#);
    }

    #[test]
    fn test_empty_group_argument() {
        assert_eq!(lower(r"\frac{}{x}"), "frac(\"\", x)");
    }
}
