//! The TPTP abstract syntax tree.
//!
//! One module per dialect ([`thf`], [`tff`], [`fof`], [`cnf`], [`tcf`]),
//! plus the shared top-level structures defined here: problems, includes,
//! comments, annotated formulas, roles, numbers, and the mutable `meta`
//! side-map. The annotation vocabulary (general terms) lives in
//! [`general`].
//!
//! Every node implements `Display`; that implementation *is* the
//! serializer, and `parse(x.to_string())` yields a tree equal to `x` under
//! the equality that ignores `meta`. Nodes are never mutated after
//! construction except for `meta`.

pub mod cnf;
pub mod fof;
pub mod general;
pub mod tcf;
pub mod tff;
pub mod thf;

use std::fmt;

use indexmap::IndexMap;
use num_bigint::{BigInt, BigUint};
use tptp_util::{FxHashMap, FxHashSet, Position};

pub use general::{FormulaData, GeneralData, GeneralTerm};

// ---------------------------------------------------------------------------
// Problems, includes, comments
// ---------------------------------------------------------------------------

/// A complete parsed problem file.
///
/// `includes` and `formulas` preserve source order exactly.
/// `formula_comments` maps a formula name to the comments that immediately
/// preceded that formula; iteration order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problem {
    pub includes: Vec<Include>,
    pub formulas: Vec<AnnotatedFormula>,
    pub formula_comments: IndexMap<String, Vec<Comment>>,
}

impl Problem {
    /// All non-variable symbols of every formula in the problem.
    pub fn symbols(&self) -> FxHashSet<&str> {
        let mut acc = FxHashSet::default();
        for formula in &self.formulas {
            formula.collect_symbols(&mut acc);
        }
        acc
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for include in &self.includes {
            writeln!(f, "{include}")?;
        }
        let mut emitted: FxHashSet<&str> = FxHashSet::default();
        for formula in &self.formulas {
            // Comments are re-emitted before the first formula of a name,
            // so attachment survives a textual round-trip.
            if emitted.insert(formula.name()) {
                if let Some(comments) = self.formula_comments.get(formula.name()) {
                    for comment in comments {
                        writeln!(f, "{comment}")?;
                    }
                }
            }
            writeln!(f, "{formula}")?;
        }
        Ok(())
    }
}

/// An `include('file'[, [sel, …]]).` directive with its leading comments.
///
/// The directive is never expanded; resolving the file is a caller
/// concern. An empty selection includes everything.
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub file_name: String,
    pub selection: Vec<String>,
    pub comments: Vec<Comment>,
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment in &self.comments {
            writeln!(f, "{comment}")?;
        }
        write!(f, "include({}", quote_single(&self.file_name))?;
        if !self.selection.is_empty() {
            write!(f, ", [")?;
            for (i, name) in self.selection.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", escape_name(name))?;
            }
            write!(f, "]")?;
        }
        write!(f, ").")
    }
}

/// The shape of a comment: `% …` or `/* … */`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentFormat {
    Line,
    Block,
}

/// The kind of a comment: normal, defined (`%$`/`/*$`), or system
/// (`%$$`/`/*$$`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Normal,
    Defined,
    System,
}

/// A source comment. `text` excludes the comment markers and the
/// defined/system prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub format: CommentFormat,
    pub kind: CommentKind,
    pub text: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            CommentKind::Normal => "",
            CommentKind::Defined => "$",
            CommentKind::System => "$$",
        };
        match self.format {
            CommentFormat::Line => write!(f, "%{}{}", prefix, self.text),
            CommentFormat::Block => write!(f, "/*{}{}*/", prefix, self.text),
        }
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// A TPTP number literal. No arithmetic is ever performed on these; the
/// representation exists to reproduce the literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    /// An arbitrary-precision integer, e.g. `-17`.
    Integer(BigInt),
    /// `numerator/denominator`; the grammar guarantees the denominator is
    /// positive, so it is unsigned here. Not reduced.
    Rational(BigInt, BigUint),
    /// `whole.decimal` with an optional exponent. The whole part stays a
    /// string because `-0.5` has a sign no integer can carry, and the
    /// decimal digits keep their spelling (leading zeros matter). The
    /// exponent defaults to 1 and is only printed when it differs from 1.
    Real {
        whole: String,
        decimal: String,
        exponent: BigInt,
    },
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Rational(n, d) => write!(f, "{n}/{d}"),
            Number::Real {
                whole,
                decimal,
                exponent,
            } => {
                write!(f, "{whole}.{decimal}")?;
                if *exponent != BigInt::from(1) {
                    write!(f, "E{exponent}")?;
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Meta side-map
// ---------------------------------------------------------------------------

/// Key of the parser-written origin entry in [`Meta`].
pub const ORIGIN: &str = "origin";

/// A value in the [`Meta`] side-map.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Position(Position),
    Text(String),
    Number(i64),
    Flag(bool),
}

/// Mutable side-band data attached to an annotated formula.
///
/// The parser writes `origin` (the position of the dialect keyword) during
/// construction and never again; callers may add further keys. The map is
/// not part of structural equality.
pub type Meta = FxHashMap<String, MetaValue>;

pub(crate) fn meta_with_origin(pos: Position) -> Meta {
    let mut meta = Meta::default();
    meta.insert(ORIGIN.to_string(), MetaValue::Position(pos));
    meta
}

// ---------------------------------------------------------------------------
// Roles and annotations
// ---------------------------------------------------------------------------

/// A formula role, e.g. `axiom` or `conjecture`, with an optional
/// structured sub-role (`role-subrole`).
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaRole {
    pub role: String,
    pub subrole: Option<GeneralTerm>,
}

impl FormulaRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            subrole: None,
        }
    }
}

impl fmt::Display for FormulaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.role)?;
        if let Some(sub) = &self.subrole {
            write!(f, "-{sub}")?;
        }
        Ok(())
    }
}

/// The optional `source` / `info` pair of an annotated formula.
pub type Annotations = Option<(GeneralTerm, Option<Vec<GeneralTerm>>)>;

fn fmt_annotations(f: &mut fmt::Formatter<'_>, annotations: &Annotations) -> fmt::Result {
    if let Some((source, info)) = annotations {
        write!(f, ", {source}")?;
        if let Some(info) = info {
            write!(f, ", [")?;
            for (i, term) in info.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{term}")?;
            }
            write!(f, "]")?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Annotated formulas
// ---------------------------------------------------------------------------

macro_rules! define_annotated {
    ($(#[$attr:meta])* $name:ident, $keyword:literal, $formula_ty:ty) => {
        $(#[$attr])*
        #[derive(Debug, Clone)]
        pub struct $name {
            pub name: String,
            pub role: FormulaRole,
            pub formula: $formula_ty,
            pub annotations: Annotations,
            pub meta: Meta,
        }

        impl $name {
            pub fn new(
                name: impl Into<String>,
                role: FormulaRole,
                formula: $formula_ty,
                annotations: Annotations,
            ) -> Self {
                Self {
                    name: name.into(),
                    role,
                    formula,
                    annotations,
                    meta: Meta::default(),
                }
            }

            /// All non-variable symbols of the carried formula.
            pub fn symbols(&self) -> FxHashSet<&str> {
                let mut acc = FxHashSet::default();
                self.formula.collect_symbols(&mut acc);
                acc
            }

            /// The parser-recorded position of the dialect keyword.
            pub fn origin(&self) -> Option<Position> {
                match self.meta.get(ORIGIN) {
                    Some(MetaValue::Position(p)) => Some(*p),
                    _ => None,
                }
            }
        }

        // Equality ignores `meta`.
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name
                    && self.role == other.role
                    && self.formula == other.formula
                    && self.annotations == other.annotations
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({}, {}, {}",
                    $keyword,
                    escape_name(&self.name),
                    self.role,
                    self.formula
                )?;
                fmt_annotations(f, &self.annotations)?;
                write!(f, ").")
            }
        }
    };
}

define_annotated!(
    /// An annotated THF formula: `thf(name, role, formula[, …]).`
    ThfAnnotated, "thf", thf::Statement
);
define_annotated!(
    /// An annotated TFF/TFX formula: `tff(name, role, formula[, …]).`
    TffAnnotated, "tff", tff::Statement
);
define_annotated!(
    /// An annotated FOF formula: `fof(name, role, formula[, …]).`
    FofAnnotated, "fof", fof::Statement
);
define_annotated!(
    /// An annotated TCF formula: `tcf(name, role, formula[, …]).`
    TcfAnnotated, "tcf", tcf::Statement
);
define_annotated!(
    /// An annotated CNF clause: `cnf(name, role, clause[, …]).`
    CnfAnnotated, "cnf", cnf::Statement
);
define_annotated!(
    /// A TPI process instruction; syntactically FOF.
    TpiAnnotated, "tpi", fof::Statement
);

/// Any annotated formula, tagged by dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatedFormula {
    Thf(ThfAnnotated),
    Tff(TffAnnotated),
    Fof(FofAnnotated),
    Tcf(TcfAnnotated),
    Cnf(CnfAnnotated),
    Tpi(TpiAnnotated),
}

impl AnnotatedFormula {
    pub fn name(&self) -> &str {
        match self {
            AnnotatedFormula::Thf(a) => &a.name,
            AnnotatedFormula::Tff(a) => &a.name,
            AnnotatedFormula::Fof(a) => &a.name,
            AnnotatedFormula::Tcf(a) => &a.name,
            AnnotatedFormula::Cnf(a) => &a.name,
            AnnotatedFormula::Tpi(a) => &a.name,
        }
    }

    pub fn role(&self) -> &FormulaRole {
        match self {
            AnnotatedFormula::Thf(a) => &a.role,
            AnnotatedFormula::Tff(a) => &a.role,
            AnnotatedFormula::Fof(a) => &a.role,
            AnnotatedFormula::Tcf(a) => &a.role,
            AnnotatedFormula::Cnf(a) => &a.role,
            AnnotatedFormula::Tpi(a) => &a.role,
        }
    }

    pub fn annotations(&self) -> &Annotations {
        match self {
            AnnotatedFormula::Thf(a) => &a.annotations,
            AnnotatedFormula::Tff(a) => &a.annotations,
            AnnotatedFormula::Fof(a) => &a.annotations,
            AnnotatedFormula::Tcf(a) => &a.annotations,
            AnnotatedFormula::Cnf(a) => &a.annotations,
            AnnotatedFormula::Tpi(a) => &a.annotations,
        }
    }

    pub fn meta(&self) -> &Meta {
        match self {
            AnnotatedFormula::Thf(a) => &a.meta,
            AnnotatedFormula::Tff(a) => &a.meta,
            AnnotatedFormula::Fof(a) => &a.meta,
            AnnotatedFormula::Tcf(a) => &a.meta,
            AnnotatedFormula::Cnf(a) => &a.meta,
            AnnotatedFormula::Tpi(a) => &a.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut Meta {
        match self {
            AnnotatedFormula::Thf(a) => &mut a.meta,
            AnnotatedFormula::Tff(a) => &mut a.meta,
            AnnotatedFormula::Fof(a) => &mut a.meta,
            AnnotatedFormula::Tcf(a) => &mut a.meta,
            AnnotatedFormula::Cnf(a) => &mut a.meta,
            AnnotatedFormula::Tpi(a) => &mut a.meta,
        }
    }

    /// The parser-recorded position of the dialect keyword.
    pub fn origin(&self) -> Option<Position> {
        match self.meta().get(ORIGIN) {
            Some(MetaValue::Position(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn symbols(&self) -> FxHashSet<&str> {
        let mut acc = FxHashSet::default();
        self.collect_symbols(&mut acc);
        acc
    }

    pub(crate) fn collect_symbols<'a>(&'a self, acc: &mut FxHashSet<&'a str>) {
        match self {
            AnnotatedFormula::Thf(a) => a.formula.collect_symbols(acc),
            AnnotatedFormula::Tff(a) => a.formula.collect_symbols(acc),
            AnnotatedFormula::Fof(a) => a.formula.collect_symbols(acc),
            AnnotatedFormula::Tcf(a) => a.formula.collect_symbols(acc),
            AnnotatedFormula::Cnf(a) => a.formula.collect_symbols(acc),
            AnnotatedFormula::Tpi(a) => a.formula.collect_symbols(acc),
        }
    }
}

impl fmt::Display for AnnotatedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotatedFormula::Thf(a) => a.fmt(f),
            AnnotatedFormula::Tff(a) => a.fmt(f),
            AnnotatedFormula::Fof(a) => a.fmt(f),
            AnnotatedFormula::Tcf(a) => a.fmt(f),
            AnnotatedFormula::Cnf(a) => a.fmt(f),
            AnnotatedFormula::Tpi(a) => a.fmt(f),
        }
    }
}

// ---------------------------------------------------------------------------
// Word escaping
// ---------------------------------------------------------------------------

/// True for `[a-z][A-Za-z0-9_]*`.
pub(crate) fn is_lower_word(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// True for `$word` and `$$word`.
pub(crate) fn is_dollar_word(s: &str) -> bool {
    let rest = s
        .strip_prefix("$$")
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or("");
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// True for `[+-]?[0-9]+`.
pub(crate) fn is_integer_name(s: &str) -> bool {
    let digits = s
        .strip_prefix(['+', '-'])
        .unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Wraps a word in single quotes, escaping `\` and `'`.
pub(crate) fn quote_single(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Emits a functor: lower words and `$`/`$$` words verbatim, anything else
/// single-quoted.
pub(crate) fn escape_functor(s: &str) -> String {
    if is_lower_word(s) || is_dollar_word(s) {
        s.to_string()
    } else {
        quote_single(s)
    }
}

/// Emits a formula or include-selection name: lower words and integers
/// verbatim, anything else single-quoted.
pub(crate) fn escape_name(s: &str) -> String {
    if is_lower_word(s) || is_integer_name(s) {
        s.to_string()
    } else {
        quote_single(s)
    }
}
