//! The THF (typed higher-order) AST.
//!
//! Covers TH0/TH1 plus the non-classical NHF extension. Types and terms
//! are the same syntactic category in TH1, so [`Type`] is an alias of
//! [`Formula`] and the type/term distinction is left to interpretation
//! passes after parsing.

use std::fmt;

use tptp_util::FxHashSet;

use super::{escape_functor, Number};

/// Types are formulas in THF.
pub type Type = Formula;

/// A quantified variable with an optional type annotation.
pub type TypedVariable = (String, Option<Type>);

/// A top-level THF statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `atom: type`
    Typing(String, Type),
    /// `[lhs, …] --> [rhs, …]`
    Sequent(Vec<Formula>, Vec<Formula>),
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
                for f in lhs.iter().chain(rhs) {
                    f.collect_symbols(acc);
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
                fmt_list(f, lhs)?;
                write!(f, "] --> [")?;
                fmt_list(f, rhs)?;
                write!(f, "]")
            }
            Statement::Logical(formula) => formula.fmt(f),
        }
    }
}

/// A THF formula (or, equivalently, a THF type).
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// A functor, possibly applied FOF-style: `c`, `f(a,b)`, `$true`.
    Function(String, Vec<Formula>),
    /// `Q [vars]: body`
    Quantified(Quantifier, Vec<TypedVariable>, Box<Formula>),
    Variable(String),
    /// `~ body`
    Unary(UnaryConnective, Box<Formula>),
    /// `(left op right)`; covers connectives, application, equality, and
    /// the type constructors.
    Binary(BinaryConnective, Box<Formula>, Box<Formula>),
    /// `[a, b, …]`
    Tuple(Vec<Formula>),
    /// `$ite(cond, then, else)`
    Conditional(Box<Formula>, Box<Formula>, Box<Formula>),
    /// `$let(typings, bindings, body)`
    Let(
        Vec<(String, Type)>,
        Vec<(Formula, Formula)>,
        Box<Formula>,
    ),
    /// `!!`, `??`, `@@+`, `@@-`, `@=`
    DefinedTh1Constant(DefinedTh1Constant),
    /// A connective used as a term: `(&)`, `(~)`, …
    ConnectiveTerm(Connective),
    /// `"name"` including the quotes.
    DistinctObject(String),
    Number(Number),
    /// A non-classical operator applied to arguments.
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
            Formula::Function(f, args) => {
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
            Formula::Variable(_) => {}
            Formula::Unary(_, body) => body.collect_symbols(acc),
            Formula::Binary(_, left, right) => {
                left.collect_symbols(acc);
                right.collect_symbols(acc);
            }
            Formula::Tuple(elements) => {
                for e in elements {
                    e.collect_symbols(acc);
                }
            }
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
            Formula::DefinedTh1Constant(_) | Formula::ConnectiveTerm(_) => {}
            Formula::DistinctObject(name) => {
                acc.insert(name);
            }
            Formula::Number(_) => {}
            Formula::NonclassicalPolyary(conn, args) => {
                conn.collect_symbols(acc);
                for arg in args {
                    arg.collect_symbols(acc);
                }
            }
        }
    }
}

fn fmt_list(f: &mut fmt::Formatter<'_>, items: &[Formula]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
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

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Function(word, args) => {
                write!(f, "{}", escape_functor(word))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    fmt_list(f, args)?;
                    write!(f, ")")?;
                }
                Ok(())
            }
            Formula::Quantified(q, vars, body) => {
                write!(f, "{q} [")?;
                fmt_variables(f, vars)?;
                write!(f, "]: {body}")
            }
            Formula::Variable(name) => write!(f, "{name}"),
            Formula::Unary(op, body) => write!(f, "{op} {body}"),
            Formula::Binary(op, left, right) => write!(f, "({left} {op} {right})"),
            Formula::Tuple(elements) => {
                write!(f, "[")?;
                fmt_list(f, elements)?;
                write!(f, "]")
            }
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
                    write!(f, "({} := {})", bindings[0].0, bindings[0].1)?;
                } else {
                    write!(f, "[")?;
                    for (i, (lhs, rhs)) in bindings.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "({lhs} := {rhs})")?;
                    }
                    write!(f, "]")?;
                }
                write!(f, ",{body})")
            }
            Formula::DefinedTh1Constant(c) => write!(f, "{c}"),
            Formula::ConnectiveTerm(c) => write!(f, "({c})"),
            Formula::DistinctObject(name) => write!(f, "{name}"),
            Formula::Number(n) => write!(f, "{n}"),
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
                // Indexed short forms and long operators are emitted in
                // long form, with each argument applied via `@`.
                conn => {
                    write!(f, "{conn}")?;
                    for arg in args {
                        write!(f, " @ ({arg})")?;
                    }
                    Ok(())
                }
            },
        }
    }
}

/// A THF quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `!`
    Forall,
    /// `?`
    Exists,
    /// `^`
    Lambda,
    /// `@+`
    Choice,
    /// `@-`
    Description,
    /// `!>`
    TypeForall,
    /// `?*`
    TypeExists,
    /// `#`
    Epsilon,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quantifier::Forall => "!",
            Quantifier::Exists => "?",
            Quantifier::Lambda => "^",
            Quantifier::Choice => "@+",
            Quantifier::Description => "@-",
            Quantifier::TypeForall => "!>",
            Quantifier::TypeExists => "?*",
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

/// A THF binary connective, including application and the type
/// constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryConnective {
    /// `=`
    Eq,
    /// `!=`
    Neq,
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
    /// `@` (left-associative application)
    App,
    /// `>` (right-associative mapping type)
    FunType,
    /// `*` (left-associative product type)
    ProductType,
    /// `+` (left-associative sum type)
    SumType,
    /// `:=`
    Assign,
    /// `==`
    Identity,
}

impl fmt::Display for BinaryConnective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryConnective::Eq => "=",
            BinaryConnective::Neq => "!=",
            BinaryConnective::Iff => "<=>",
            BinaryConnective::Impl => "=>",
            BinaryConnective::If => "<=",
            BinaryConnective::Niff => "<~>",
            BinaryConnective::Nor => "~|",
            BinaryConnective::Nand => "~&",
            BinaryConnective::Or => "|",
            BinaryConnective::And => "&",
            BinaryConnective::App => "@",
            BinaryConnective::FunType => ">",
            BinaryConnective::ProductType => "*",
            BinaryConnective::SumType => "+",
            BinaryConnective::Assign => ":=",
            BinaryConnective::Identity => "==",
        })
    }
}

/// A unary or binary connective, for connective-as-term positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    Unary(UnaryConnective),
    Binary(BinaryConnective),
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::Unary(c) => c.fmt(f),
            Connective::Binary(c) => c.fmt(f),
        }
    }
}

/// The defined TH1 combinator constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinedTh1Constant {
    /// `!!`
    ForallComb,
    /// `??`
    ExistsComb,
    /// `@@+`
    ChoiceComb,
    /// `@@-`
    DescriptionComb,
    /// `@=`
    EqComb,
}

impl fmt::Display for DefinedTh1Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DefinedTh1Constant::ForallComb => "!!",
            DefinedTh1Constant::ExistsComb => "??",
            DefinedTh1Constant::ChoiceComb => "@@+",
            DefinedTh1Constant::DescriptionComb => "@@-",
            DefinedTh1Constant::EqComb => "@=",
        })
    }
}

/// A non-classical (modal) operator.
///
/// The short forms `[.]`, `<.>`, `/.\` keep their shape on output only
/// when unindexed; indexed occurrences are re-emitted in long form.
#[derive(Debug, Clone, PartialEq)]
pub enum VararyConnective {
    /// `[.]` / `[#idx]`
    Box(Option<Box<Formula>>),
    /// `<.>` / `<#idx>`
    Diamond(Option<Box<Formula>>),
    /// `/.\` / `/#idx\`
    Cone(Option<Box<Formula>>),
    /// `{name(index?, key := value, …)}`
    LongOperator {
        name: String,
        index: Option<Box<Formula>>,
        parameters: Vec<(String, Formula)>,
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
