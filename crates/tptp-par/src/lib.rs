//! tptp-par - Parser and AST for the TPTP input languages.
//!
//! Reads the textual languages of the TPTP ecosystem (THF, TFF/TFX, FOF,
//! TCF, CNF, TPI, plus the non-classical NXF/NHF extensions) into a fully
//! typed AST that can be inspected programmatically and serialized back
//! to TPTP-compliant text via `Display`.
//!
//! The parser is a hand-written recursive-descent engine over the
//! [`tptp_lex`] tokenizer, with bounded look-ahead plus a "peek under
//! parentheses" probe for the typing/sequent ambiguities. It accepts any
//! syntactically legal input, even ill-typed; semantic analysis is out of
//! scope, and `include` directives are reported but never expanded.
//!
//! # Entry points
//!
//! - [`parse_problem`] reads a whole problem file.
//! - [`parse_annotated`] reads one annotated formula of any dialect.
//! - `parse_annotated_<dialect>` read one annotated formula of a fixed
//!   dialect.
//! - `parse_<dialect>` read a bare formula without the annotation shell.
//!
//! All functions are pure: identical input yields an identical AST (up to
//! the `meta` origin entries), and two parsers never share state.
//!
//! # Example
//!
//! ```
//! let problem = tptp_par::parse_problem("fof(f, axiom, (p(X) & q)).").unwrap();
//! assert_eq!(problem.formulas.len(), 1);
//! assert_eq!(problem.formulas[0].name(), "f");
//! // Round-trip: the serialized form parses back to an equal AST.
//! let again = tptp_par::parse_problem(&problem.to_string()).unwrap();
//! assert_eq!(problem, again);
//! ```

pub mod ast;
mod parser;

#[cfg(test)]
mod edge_cases;

pub use ast::{
    AnnotatedFormula, Annotations, CnfAnnotated, Comment, CommentFormat, CommentKind,
    FofAnnotated, FormulaRole, Include, Meta, MetaValue, Number, Problem, TcfAnnotated,
    TffAnnotated, ThfAnnotated, TpiAnnotated, ORIGIN,
};
pub use parser::Parser;
pub use tptp_util::{ParseError, Position, Result};

/// Parses a whole TPTP problem file.
pub fn parse_problem(input: &str) -> Result<Problem> {
    Parser::new(input).problem()
}

/// Parses a single annotated formula, dispatching on its keyword.
pub fn parse_annotated(input: &str) -> Result<AnnotatedFormula> {
    let mut parser = Parser::new(input);
    parser.skip_leading_comments()?;
    let formula = parser.annotated_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

macro_rules! annotated_entry {
    ($(#[$attr:meta])* $name:ident, $method:ident, $ty:ty) => {
        $(#[$attr])*
        pub fn $name(input: &str) -> Result<$ty> {
            let mut parser = Parser::new(input);
            parser.skip_leading_comments()?;
            let formula = parser.$method()?;
            parser.expect_end()?;
            Ok(formula)
        }
    };
}

annotated_entry!(
    /// Parses a single `thf(…).` annotated formula.
    parse_annotated_thf, annotated_thf, ThfAnnotated
);
annotated_entry!(
    /// Parses a single `tff(…).` annotated formula.
    parse_annotated_tff, annotated_tff, TffAnnotated
);
annotated_entry!(
    /// Parses a single `fof(…).` annotated formula.
    parse_annotated_fof, annotated_fof, FofAnnotated
);
annotated_entry!(
    /// Parses a single `tcf(…).` annotated formula.
    parse_annotated_tcf, annotated_tcf, TcfAnnotated
);
annotated_entry!(
    /// Parses a single `cnf(…).` annotated formula.
    parse_annotated_cnf, annotated_cnf, CnfAnnotated
);
annotated_entry!(
    /// Parses a single `tpi(…).` annotated formula.
    parse_annotated_tpi, annotated_tpi, TpiAnnotated
);

/// Parses a bare THF formula (no annotation shell).
pub fn parse_thf(input: &str) -> Result<ast::thf::Formula> {
    let mut parser = Parser::new(input);
    let formula = parser.thf_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

/// Parses a bare TFF/TFX formula (no annotation shell).
pub fn parse_tff(input: &str) -> Result<ast::tff::Formula> {
    let mut parser = Parser::new(input);
    let formula = parser.tff_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

/// Parses a bare FOF formula (no annotation shell).
pub fn parse_fof(input: &str) -> Result<ast::fof::Formula> {
    let mut parser = Parser::new(input);
    let formula = parser.fof_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

/// Parses a bare TCF formula (no annotation shell).
pub fn parse_tcf(input: &str) -> Result<ast::tcf::Formula> {
    let mut parser = Parser::new(input);
    let formula = parser.tcf_bare_formula()?;
    parser.expect_end()?;
    Ok(formula)
}

/// Parses a bare CNF clause (no annotation shell).
pub fn parse_cnf(input: &str) -> Result<ast::cnf::Formula> {
    let mut parser = Parser::new(input);
    let clause = parser.cnf_bare_formula()?;
    parser.expect_end()?;
    Ok(clause)
}
