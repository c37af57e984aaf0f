//! The TCF (typed clause normal form) AST.
//!
//! A TCF statement is either a TFF typing or a clause under an optional
//! universal prefix of typed variables.

use std::fmt;

use tptp_util::FxHashSet;

use super::{cnf, escape_functor, tff};

/// A top-level TCF statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `atom: type`
    Typing(String, tff::Type),
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
            Statement::Logical(f) => f.collect_symbols(acc),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Typing(atom, ty) => write!(f, "{}: {ty}", escape_functor(atom)),
            Statement::Logical(formula) => formula.fmt(f),
        }
    }
}

/// `! [typed-vars]: clause`, or a bare clause when `variables` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    pub variables: Vec<tff::TypedVariable>,
    pub clause: cnf::Formula,
}

impl Formula {
    pub fn symbols(&self) -> FxHashSet<&str> {
        let mut acc = FxHashSet::default();
        self.collect_symbols(&mut acc);
        acc
    }

    pub(crate) fn collect_symbols<'a>(&'a self, acc: &mut FxHashSet<&'a str>) {
        for (_, ty) in &self.variables {
            if let Some(ty) = ty {
                ty.collect_symbols(acc);
            }
        }
        self.clause.collect_symbols(acc);
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variables.is_empty() {
            return self.clause.fmt(f);
        }
        write!(f, "! [")?;
        for (i, (name, ty)) in self.variables.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match ty {
                Some(ty) => write!(f, "{name}: {ty}")?,
                None => write!(f, "{name}")?,
            }
        }
        write!(f, "]: ({})", self.clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::cnf::{Literal, Term};

    #[test]
    fn display_with_prefix() {
        let formula = Formula {
            variables: vec![("X".into(), Some(tff::Type::Atomic("$i".into(), vec![])))],
            clause: cnf::Formula(vec![
                Literal::Positive("p".into(), vec![Term::Variable("X".into())]),
                Literal::Negative("q".into(), vec![]),
            ]),
        };
        assert_eq!(formula.to_string(), "! [X: $i]: (p(X) | ~ q)");
    }

    #[test]
    fn display_bare_clause() {
        let formula = Formula {
            variables: vec![],
            clause: cnf::Formula(vec![Literal::Positive("p".into(), vec![])]),
        };
        assert_eq!(formula.to_string(), "p");
    }
}
