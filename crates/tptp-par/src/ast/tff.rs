//! The TFF (typed first-order) AST, including the TFX/FOOL and
//! non-classical NXF extensions.
//!
//! TFX embeds formulas in term positions and vice versa, so [`Formula`]
//! and [`Term`] are mutually recursive: `Term::Formula` wraps a formula
//! appearing as a term, and the parser collapses atomic formulas back to
//! atomic terms so the embedding stays canonical.

use std::fmt;

use tptp_util::FxHashSet;

use super::{escape_functor, Number};

/// A quantified or type-bound variable with an optional type.
pub type TypedVariable = (String, Option<Type>);

/// A top-level TFF statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `atom: type`
    Typing(String, Type),
    /// `[lhs, …] --> [rhs, …]` (TFX)
    Sequent(Vec<Term>, Vec<Term>),
    Logical(Formula),
}

impl Statement {
    pub fn symbols(&self) -> FxHashSet<&str> {
        let mut acc = FxHashSet::default();
        self.collect_symbols(&mut acc);
        acc
    }

    pub(crate) fn collect_symbols<'a>(&'a self, acc: &mut FxHashSet<&'a str>) {
        match self {
            Statement::Typing(atom, ty) => {
                acc.insert(atom);
                ty.collect_symbols(acc);
            }
            Statement::Sequent(lhs, rhs) => {
                for t in lhs.iter().chain(rhs) {
                    t.collect_symbols(acc);
                }
            }
            Statement::Logical(f) => f.collect_symbols(acc),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Typing(atom, ty) => write!(f, "{}: {ty}", escape_functor(atom)),
            Statement::Sequent(lhs, rhs) => {
                write!(f, "[")?;
                fmt_terms(f, lhs)?;
                write!(f, "] --> [")?;
                fmt_terms(f, rhs)?;
                write!(f, "]")
            }
            Statement::Logical(formula) => formula.fmt(f),
        }
    }
}

/// A TFF formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// `p`, `q(a, X)`, `$true`
    Atomic(String, Vec<Term>),
    /// `Q [vars]: body`
    Quantified(Quantifier, Vec<TypedVariable>, Box<Formula>),
    /// `~ body`
    Unary(UnaryConnective, Box<Formula>),
    /// `(left op right)`
    Binary(BinaryConnective, Box<Formula>, Box<Formula>),
    /// `(left = right)`
    Equality(Term, Term),
    /// `(left != right)`
    Inequality(Term, Term),
    /// A Boolean-typed variable at formula position (TFX).
    FormulaVariable(String),
    /// `$ite(cond, then, else)` (TFX)
    Conditional(Box<Formula>, Box<Term>, Box<Term>),
    /// `$let(typings, bindings, body)` (TFX)
    Let(Vec<(String, Type)>, Vec<(Term, Term)>, Box<Term>),
    /// `(lhs) := (rhs)` (TFX)
    Assignment(Box<Term>, Box<Term>),
    /// `(lhs) == (rhs)` (TFX)
    MetaIdentity(Box<Term>, Box<Term>),
    /// A non-classical operator applied to formulas (NXF).
    NonclassicalPolyary(VararyConnective, Vec<Formula>),
}

impl Formula {
    pub fn symbols(&self) -> FxHashSet<&str> {
        let mut acc = FxHashSet::default();
        self.collect_symbols(&mut acc);
        acc
    }

    pub(crate) fn collect_symbols<'a>(&'a self, acc: &mut FxHashSet<&'a str>) {
        match self {
            Formula::Atomic(f, args) => {
                acc.insert(f);
                for arg in args {
                    arg.collect_symbols(acc);
                }
            }
            Formula::Quantified(_, vars, body) => {
                for (_, ty) in vars {
                    if let Some(ty) = ty {
                        ty.collect_symbols(acc);
                    }
                }
                body.collect_symbols(acc);
            }
            Formula::Unary(_, body) => body.collect_symbols(acc),
            Formula::Binary(_, left, right) => {
                left.collect_symbols(acc);
                right.collect_symbols(acc);
            }
            Formula::Equality(l, r) | Formula::Inequality(l, r) => {
                l.collect_symbols(acc);
                r.collect_symbols(acc);
            }
            Formula::FormulaVariable(_) => {}
            Formula::Conditional(c, t, e) => {
                c.collect_symbols(acc);
                t.collect_symbols(acc);
                e.collect_symbols(acc);
            }
            Formula::Let(typings, bindings, body) => {
                for (name, ty) in typings {
                    acc.insert(name);
                    ty.collect_symbols(acc);
                }
                for (lhs, rhs) in bindings {
                    lhs.collect_symbols(acc);
                    rhs.collect_symbols(acc);
                }
                body.collect_symbols(acc);
            }
            Formula::Assignment(l, r) | Formula::MetaIdentity(l, r) => {
                l.collect_symbols(acc);
                r.collect_symbols(acc);
            }
            Formula::NonclassicalPolyary(conn, args) => {
                conn.collect_symbols(acc);
                for arg in args {
                    arg.collect_symbols(acc);
                }
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atomic(word, args) => {
                write!(f, "{}", escape_functor(word))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    fmt_terms(f, args)?;
                    write!(f, ")")?;
                }
                Ok(())
            }
            Formula::Quantified(q, vars, body) => {
                write!(f, "{q} [")?;
                fmt_variables(f, vars)?;
                write!(f, "]: {body}")
            }
            Formula::Unary(op, body) => write!(f, "{op} {body}"),
            Formula::Binary(op, left, right) => write!(f, "({left} {op} {right})"),
            Formula::Equality(l, r) => write!(f, "({l} = {r})"),
            Formula::Inequality(l, r) => write!(f, "({l} != {r})"),
            Formula::FormulaVariable(name) => write!(f, "{name}"),
            Formula::Conditional(c, t, e) => write!(f, "$ite({c},{t},{e})"),
            Formula::Let(typings, bindings, body) => {
                write!(f, "$let(")?;
                if typings.len() == 1 {
                    write!(f, "{}: {}", escape_functor(&typings[0].0), typings[0].1)?;
                } else {
                    write!(f, "[")?;
                    for (i, (name, ty)) in typings.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}: {ty}", escape_functor(name))?;
                    }
                    write!(f, "]")?;
                }
                write!(f, ",")?;
                if bindings.len() == 1 {
                    write!(f, "{} := {}", bindings[0].0, bindings[0].1)?;
                } else {
                    write!(f, "[")?;
                    for (i, (lhs, rhs)) in bindings.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{lhs} := {rhs}")?;
                    }
                    write!(f, "]")?;
                }
                write!(f, ",{body})")
            }
            Formula::Assignment(l, r) => write!(f, "({l}) := ({r})"),
            Formula::MetaIdentity(l, r) => write!(f, "({l}) == ({r})"),
            Formula::NonclassicalPolyary(conn, args) => match conn {
                VararyConnective::Box(None) if args.len() == 1 => {
                    write!(f, "[.] ({})", args[0])
                }
                VararyConnective::Diamond(None) if args.len() == 1 => {
                    write!(f, "<.> ({})", args[0])
                }
                VararyConnective::Cone(None) if args.len() == 1 => {
                    write!(f, "/.\\ ({})", args[0])
                }
                // NXF long-form application: one `@` and a parenthesized
                // argument list.
                conn => {
                    write!(f, "{conn}")?;
                    if !args.is_empty() {
                        write!(f, " @ (")?;
                        for (i, arg) in args.iter().enumerate() {
                            if i > 0 {
                                write!(f, ",")?;
                            }
                            write!(f, "{arg}")?;
                        }
                        write!(f, ")")?;
                    }
                    Ok(())
                }
            },
        }
    }
}

/// A TFF term.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// `c`, `f(a, X)`
    Atomic(String, Vec<Term>),
    Variable(String),
    /// `"name"` including the quotes.
    DistinctObject(String),
    Number(Number),
    /// `[a, b, …]` (TFX)
    Tuple(Vec<Term>),
    /// A formula at term position (TFX).
    Formula(Box<Formula>),
}

impl Term {
    pub fn symbols(&self) -> FxHashSet<&str> {
        let mut acc = FxHashSet::default();
        self.collect_symbols(&mut acc);
        acc
    }

    pub(crate) fn collect_symbols<'a>(&'a self, acc: &mut FxHashSet<&'a str>) {
        match self {
            Term::Atomic(f, args) => {
                acc.insert(f);
                for arg in args {
                    arg.collect_symbols(acc);
                }
            }
            Term::Variable(_) | Term::Number(_) => {}
            Term::DistinctObject(name) => {
                acc.insert(name);
            }
            Term::Tuple(elements) => {
                for e in elements {
                    e.collect_symbols(acc);
                }
            }
            Term::Formula(formula) => formula.collect_symbols(acc),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atomic(word, args) => {
                write!(f, "{}", escape_functor(word))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    fmt_terms(f, args)?;
                    write!(f, ")")?;
                }
                Ok(())
            }
            Term::Variable(name) => write!(f, "{name}"),
            Term::DistinctObject(name) => write!(f, "{name}"),
            Term::Number(n) => write!(f, "{n}"),
            Term::Tuple(elements) => {
                write!(f, "[")?;
                fmt_terms(f, elements)?;
                write!(f, "]")
            }
            Term::Formula(formula) => formula.fmt(f),
        }
    }
}

/// A TFF type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `$i`, `human`, `map($i,$o)`
    Atomic(String, Vec<Type>),
    /// `(a * b * …) > result`; `>` is right-associative, so the result may
    /// itself be a mapping.
    Mapping(Vec<Type>, Box<Type>),
    /// `!> [vars]: body` (TF1)
    Quantified(Vec<TypedVariable>, Box<Type>),
    /// An upper-word type variable (TF1).
    Variable(String),
    /// `[t1, t2, …]` (TFX)
    Tuple(Vec<Type>),
}

impl Type {
    pub fn symbols(&self) -> FxHashSet<&str> {
        let mut acc = FxHashSet::default();
        self.collect_symbols(&mut acc);
        acc
    }

    pub(crate) fn collect_symbols<'a>(&'a self, acc: &mut FxHashSet<&'a str>) {
        match self {
            Type::Atomic(name, args) => {
                acc.insert(name);
                for arg in args {
                    arg.collect_symbols(acc);
                }
            }
            Type::Mapping(args, ret) => {
                for arg in args {
                    arg.collect_symbols(acc);
                }
                ret.collect_symbols(acc);
            }
            Type::Quantified(vars, body) => {
                for (_, ty) in vars {
                    if let Some(ty) = ty {
                        ty.collect_symbols(acc);
                    }
                }
                body.collect_symbols(acc);
            }
            Type::Variable(_) => {}
            Type::Tuple(elements) => {
                for e in elements {
                    e.collect_symbols(acc);
                }
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Atomic(name, args) => {
                write!(f, "{}", escape_functor(name))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            Type::Mapping(args, ret) => {
                if args.len() == 1 {
                    write!(f, "({} > {ret})", args[0])
                } else {
                    write!(f, "((")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, " * ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ") > {ret})")
                }
            }
            Type::Quantified(vars, body) => {
                write!(f, "!> [")?;
                fmt_variables(f, vars)?;
                write!(f, "]: {body}")
            }
            Type::Variable(name) => write!(f, "{name}"),
            Type::Tuple(elements) => {
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A TFF quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `!`
    Forall,
    /// `?`
    Exists,
    /// `#`
    Epsilon,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quantifier::Forall => "!",
            Quantifier::Exists => "?",
            Quantifier::Epsilon => "#",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryConnective {
    /// `~`
    Not,
}

impl fmt::Display for UnaryConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("~")
    }
}

/// A first-order binary connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryConnective {
    /// `<=>`
    Iff,
    /// `=>`
    Impl,
    /// `<=`
    If,
    /// `<~>`
    Niff,
    /// `~|`
    Nor,
    /// `~&`
    Nand,
    /// `|`
    Or,
    /// `&`
    And,
}

impl fmt::Display for BinaryConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryConnective::Iff => "<=>",
            BinaryConnective::Impl => "=>",
            BinaryConnective::If => "<=",
            BinaryConnective::Niff => "<~>",
            BinaryConnective::Nor => "~|",
            BinaryConnective::Nand => "~&",
            BinaryConnective::Or => "|",
            BinaryConnective::And => "&",
        })
    }
}

/// A non-classical (modal) operator over terms (NXF).
#[derive(Debug, Clone, PartialEq)]
pub enum VararyConnective {
    /// `[.]` / `[#idx]`
    Box(Option<Box<Term>>),
    /// `<.>` / `<#idx>`
    Diamond(Option<Box<Term>>),
    /// `/.\` / `/#idx\`
    Cone(Option<Box<Term>>),
    /// `{name(index?, key := value, …)}`
    LongOperator {
        name: String,
        index: Option<Box<Term>>,
        parameters: Vec<(String, Term)>,
    },
}

impl VararyConnective {
    pub(crate) fn collect_symbols<'a>(&'a self, acc: &mut FxHashSet<&'a str>) {
        match self {
            VararyConnective::Box(index)
            | VararyConnective::Diamond(index)
            | VararyConnective::Cone(index) => {
                if let Some(index) = index {
                    index.collect_symbols(acc);
                }
            }
            VararyConnective::LongOperator {
                index, parameters, ..
            } => {
                if let Some(index) = index {
                    index.collect_symbols(acc);
                }
                for (_, value) in parameters {
                    value.collect_symbols(acc);
                }
            }
        }
    }
}

// The long (brace) rendering; the unindexed short forms are produced by
// `Formula`'s display when the argument shape admits them.
impl fmt::Display for VararyConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VararyConnective::Box(None) => write!(f, "{{$box}}"),
            VararyConnective::Diamond(None) => write!(f, "{{$dia}}"),
            VararyConnective::Cone(None) => write!(f, "{{$cone}}"),
            VararyConnective::Box(Some(idx)) => write!(f, "{{$box(#{idx})}}"),
            VararyConnective::Diamond(Some(idx)) => write!(f, "{{$dia(#{idx})}}"),
            VararyConnective::Cone(Some(idx)) => write!(f, "{{$cone(#{idx})}}"),
            VararyConnective::LongOperator {
                name,
                index,
                parameters,
            } => {
                write!(f, "{{{}", escape_functor(name))?;
                if index.is_some() || !parameters.is_empty() {
                    write!(f, "(")?;
                    let mut first = true;
                    if let Some(idx) = index {
                        write!(f, "#{idx}")?;
                        first = false;
                    }
                    for (key, value) in parameters {
                        if !first {
                            write!(f, ",")?;
                        }
                        write!(f, "{key} := {value}")?;
                        first = false;
                    }
                    write!(f, ")")?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn fmt_terms(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{term}")?;
    }
    Ok(())
}

fn fmt_variables(f: &mut fmt::Formatter<'_>, vars: &[TypedVariable]) -> fmt::Result {
    for (i, (name, ty)) in vars.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        match ty {
            Some(ty) => write!(f, "{name}: {ty}")?,
            None => write!(f, "{name}")?,
        }
    }
    Ok(())
}
