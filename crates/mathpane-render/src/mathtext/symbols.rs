//! Command vocabulary of the TeX math subset.

/// Accent placed over (or under) its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Hat,
    Tilde,
    Bar,
    Vec,
    Dot,
    DoubleDot,
    Acute,
    Grave,
    Breve,
    Check,
    Underline,
}

/// Font switch applied to its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Roman,
    Bold,
    Italic,
    Calligraphic,
    Blackboard,
    SansSerif,
    Monospace,
    Fraktur,
}

/// Explicit horizontal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    NegativeThin,
    Thin,
    Medium,
    Thick,
    /// `\ `, an ordinary interword space.
    Normal,
    Quad,
    QQuad,
}

/// What a `\command` stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Symbol(char),
    /// Upright named operator such as `\sin`; `limits` places scripts
    /// above and below.
    Function { limits: bool },
    Accent(Accent),
    Font(FontStyle),
    Space(Space),
    /// Accepted and dropped (`\displaystyle`, `\limits`, ...).
    Ignore,
}

const GREEK: &[(&str, char)] = &[
    ("alpha", 'α'),
    ("beta", 'β'),
    ("gamma", 'γ'),
    ("delta", 'δ'),
    ("epsilon", 'ϵ'),
    ("varepsilon", 'ε'),
    ("zeta", 'ζ'),
    ("eta", 'η'),
    ("theta", 'θ'),
    ("vartheta", 'ϑ'),
    ("iota", 'ι'),
    ("kappa", 'κ'),
    ("lambda", 'λ'),
    ("mu", 'μ'),
    ("nu", 'ν'),
    ("xi", 'ξ'),
    ("pi", 'π'),
    ("varpi", 'ϖ'),
    ("rho", 'ρ'),
    ("varrho", 'ϱ'),
    ("sigma", 'σ'),
    ("varsigma", 'ς'),
    ("tau", 'τ'),
    ("upsilon", 'υ'),
    ("phi", 'ϕ'),
    ("varphi", 'φ'),
    ("chi", 'χ'),
    ("psi", 'ψ'),
    ("omega", 'ω'),
    ("Gamma", 'Γ'),
    ("Delta", 'Δ'),
    ("Theta", 'Θ'),
    ("Lambda", 'Λ'),
    ("Xi", 'Ξ'),
    ("Pi", 'Π'),
    ("Sigma", 'Σ'),
    ("Upsilon", 'Υ'),
    ("Phi", 'Φ'),
    ("Psi", 'Ψ'),
    ("Omega", 'Ω'),
];

const OPERATORS: &[(&str, char)] = &[
    // binary
    ("pm", '±'),
    ("mp", '∓'),
    ("times", '×'),
    ("div", '÷'),
    ("cdot", '⋅'),
    ("ast", '∗'),
    ("star", '⋆'),
    ("circ", '∘'),
    ("bullet", '∙'),
    ("oplus", '⊕'),
    ("ominus", '⊖'),
    ("otimes", '⊗'),
    ("odot", '⊙'),
    ("cup", '∪'),
    ("cap", '∩'),
    ("setminus", '∖'),
    ("wedge", '∧'),
    ("land", '∧'),
    ("vee", '∨'),
    ("lor", '∨'),
    ("dagger", '†'),
    // relations
    ("leq", '≤'),
    ("le", '≤'),
    ("geq", '≥'),
    ("ge", '≥'),
    ("neq", '≠'),
    ("ne", '≠'),
    ("ll", '≪'),
    ("gg", '≫'),
    ("approx", '≈'),
    ("equiv", '≡'),
    ("sim", '∼'),
    ("simeq", '≃'),
    ("cong", '≅'),
    ("propto", '∝'),
    ("in", '∈'),
    ("notin", '∉'),
    ("ni", '∋'),
    ("subset", '⊂'),
    ("supset", '⊃'),
    ("subseteq", '⊆'),
    ("supseteq", '⊇'),
    ("perp", '⊥'),
    ("parallel", '∥'),
    ("mid", '∣'),
    ("models", '⊨'),
    ("vdash", '⊢'),
    // arrows
    ("to", '→'),
    ("rightarrow", '→'),
    ("leftarrow", '←'),
    ("gets", '←'),
    ("leftrightarrow", '↔'),
    ("Rightarrow", '⇒'),
    ("Leftarrow", '⇐'),
    ("Leftrightarrow", '⇔'),
    ("iff", '⟺'),
    ("implies", '⟹'),
    ("mapsto", '↦'),
    ("uparrow", '↑'),
    ("downarrow", '↓'),
    ("longrightarrow", '⟶'),
    ("longleftarrow", '⟵'),
    // big operators
    ("sum", '∑'),
    ("prod", '∏'),
    ("coprod", '∐'),
    ("int", '∫'),
    ("iint", '∬'),
    ("iiint", '∭'),
    ("oint", '∮'),
    ("bigcup", '⋃'),
    ("bigcap", '⋂'),
    ("bigoplus", '⨁'),
    ("bigotimes", '⨂'),
    // misc
    ("infty", '∞'),
    ("partial", '∂'),
    ("nabla", '∇'),
    ("forall", '∀'),
    ("exists", '∃'),
    ("neg", '¬'),
    ("lnot", '¬'),
    ("emptyset", '∅'),
    ("varnothing", '∅'),
    ("angle", '∠'),
    ("hbar", 'ℏ'),
    ("ell", 'ℓ'),
    ("Re", 'ℜ'),
    ("Im", 'ℑ'),
    ("aleph", 'ℵ'),
    ("wp", '℘'),
    ("prime", '′'),
    ("degree", '°'),
    ("ldots", '…'),
    ("dots", '…'),
    ("cdots", '⋯'),
    ("vdots", '⋮'),
    ("ddots", '⋱'),
    ("langle", '⟨'),
    ("rangle", '⟩'),
    ("lfloor", '⌊'),
    ("rfloor", '⌋'),
    ("lceil", '⌈'),
    ("rceil", '⌉'),
    ("vert", '|'),
    ("Vert", '‖'),
    ("lbrace", '{'),
    ("rbrace", '}'),
    ("backslash", '\\'),
    ("top", '⊤'),
    ("bot", '⊥'),
    ("triangle", '△'),
    ("square", '□'),
    // Latin specials
    ("O", 'Ø'),
    ("o", 'ø'),
    ("l", 'ł'),
    ("L", 'Ł'),
    ("S", '§'),
    ("P", '¶'),
    ("ae", 'æ'),
    ("AE", 'Æ'),
    ("ss", 'ß'),
];

const FUNCTIONS: &[(&str, bool)] = &[
    ("sin", false),
    ("cos", false),
    ("tan", false),
    ("cot", false),
    ("sec", false),
    ("csc", false),
    ("arcsin", false),
    ("arccos", false),
    ("arctan", false),
    ("sinh", false),
    ("cosh", false),
    ("tanh", false),
    ("coth", false),
    ("log", false),
    ("ln", false),
    ("lg", false),
    ("exp", false),
    ("det", false),
    ("dim", false),
    ("ker", false),
    ("deg", false),
    ("arg", false),
    ("hom", false),
    ("gcd", false),
    ("Pr", false),
    ("lim", true),
    ("liminf", true),
    ("limsup", true),
    ("max", true),
    ("min", true),
    ("sup", true),
    ("inf", true),
];

/// Resolve a command name (without the backslash).
pub fn lookup(name: &str) -> Option<CommandKind> {
    let kind = match name {
        "hat" | "widehat" => CommandKind::Accent(Accent::Hat),
        "tilde" | "widetilde" => CommandKind::Accent(Accent::Tilde),
        "bar" | "overline" => CommandKind::Accent(Accent::Bar),
        "vec" => CommandKind::Accent(Accent::Vec),
        "dot" => CommandKind::Accent(Accent::Dot),
        "ddot" => CommandKind::Accent(Accent::DoubleDot),
        "acute" => CommandKind::Accent(Accent::Acute),
        "grave" => CommandKind::Accent(Accent::Grave),
        "breve" => CommandKind::Accent(Accent::Breve),
        "check" => CommandKind::Accent(Accent::Check),
        "underline" => CommandKind::Accent(Accent::Underline),

        "mathrm" | "rm" => CommandKind::Font(FontStyle::Roman),
        "mathbf" | "bf" | "boldsymbol" => CommandKind::Font(FontStyle::Bold),
        "mathit" | "it" => CommandKind::Font(FontStyle::Italic),
        "mathcal" | "cal" => CommandKind::Font(FontStyle::Calligraphic),
        "mathbb" => CommandKind::Font(FontStyle::Blackboard),
        "mathsf" | "sf" => CommandKind::Font(FontStyle::SansSerif),
        "mathtt" | "tt" => CommandKind::Font(FontStyle::Monospace),
        "mathfrak" => CommandKind::Font(FontStyle::Fraktur),

        "!" => CommandKind::Space(Space::NegativeThin),
        "," => CommandKind::Space(Space::Thin),
        ":" | ">" => CommandKind::Space(Space::Medium),
        ";" => CommandKind::Space(Space::Thick),
        " " => CommandKind::Space(Space::Normal),
        "quad" => CommandKind::Space(Space::Quad),
        "qquad" => CommandKind::Space(Space::QQuad),

        "{" | "}" | "$" | "#" | "%" | "&" | "_" => {
            CommandKind::Symbol(name.chars().next().unwrap_or_default())
        }
        "|" => CommandKind::Symbol('‖'),

        "displaystyle" | "textstyle" | "scriptstyle" | "limits" | "nolimits" | "\\" => {
            CommandKind::Ignore
        }

        _ => {
            if let Some(&(_, c)) = GREEK.iter().chain(OPERATORS).find(|(n, _)| *n == name) {
                CommandKind::Symbol(c)
            } else if let Some(&(_, limits)) = FUNCTIONS.iter().find(|(n, _)| *n == name) {
                CommandKind::Function { limits }
            } else {
                return None;
            }
        }
    };
    Some(kind)
}

/// Resolve a `\left` / `\right` delimiter given as a command name.
pub fn delimiter_command(name: &str) -> Option<char> {
    match name {
        "{" | "lbrace" => Some('{'),
        "}" | "rbrace" => Some('}'),
        "|" | "Vert" => Some('‖'),
        "vert" => Some('|'),
        "langle" => Some('⟨'),
        "rangle" => Some('⟩'),
        "lfloor" => Some('⌊'),
        "rfloor" => Some('⌋'),
        "lceil" => Some('⌈'),
        "rceil" => Some('⌉'),
        _ => None,
    }
}

/// Resolve a `\left` / `\right` delimiter given as a plain character.
pub fn delimiter_char(c: char) -> Option<char> {
    match c {
        '(' | ')' | '[' | ']' | '|' | '/' => Some(c),
        '<' => Some('⟨'),
        '>' => Some('⟩'),
        _ => None,
    }
}
