//! Edge case tests for tptp-par.

use crate::ast::{AnnotatedFormula, CommentFormat, CommentKind};
use crate::{parse_annotated, parse_annotated_fof, parse_problem};

#[test]
fn empty_input_is_an_empty_problem() {
    let problem = parse_problem("").expect("empty problem");
    assert!(problem.includes.is_empty());
    assert!(problem.formulas.is_empty());
}

#[test]
fn empty_input_for_a_formula_reports_minus_one() {
    let err = parse_annotated("").unwrap_err();
    assert_eq!((err.line(), err.column()), (-1, -1));
}

#[test]
fn missing_final_dot() {
    let err = parse_annotated_fof("fof(f, axiom, p)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected end of input when DOT was expected"
    );
    // Position of the last consumed token, the closing paren.
    assert_eq!((err.line(), err.column()), (1, 16));
}

#[test]
fn wrong_keyword_for_fixed_dialect_entry() {
    let err = parse_annotated_fof("cnf(f, axiom, p).").unwrap_err();
    assert_eq!(err.to_string(), "Expected 'fof' but read LOWERWORD 'cnf'");
}

#[test]
fn comments_attach_to_the_following_formula_only() {
    let problem = parse_problem(
        "% first\n\
         fof(a, axiom, p).\n\
         % second\n\
         % third\n\
         fof(b, axiom, q).\n\
         % dangling\n",
    )
    .expect("problem");
    assert_eq!(problem.formula_comments.len(), 2);
    assert_eq!(problem.formula_comments["a"].len(), 1);
    assert_eq!(problem.formula_comments["b"].len(), 2);
    assert_eq!(problem.formula_comments["b"][0].text, " second");
}

#[test]
fn duplicate_names_share_one_comment_entry() {
    let problem = parse_problem(
        "% one\n\
         fof(f, axiom, p).\n\
         % two\n\
         fof(f, axiom, q).\n",
    )
    .expect("problem");
    assert_eq!(problem.formulas.len(), 2);
    assert_eq!(problem.formula_comments.len(), 1);
    assert_eq!(problem.formula_comments["f"].len(), 2);
}

#[test]
fn comments_attach_to_includes() {
    let problem = parse_problem(
        "% for the include\n\
         include('Axioms/A.ax').\n\
         fof(f, axiom, p).\n",
    )
    .expect("problem");
    assert_eq!(problem.includes.len(), 1);
    assert_eq!(problem.includes[0].comments.len(), 1);
    assert!(problem.formula_comments.is_empty());
}

#[test]
fn inline_comment_inside_a_formula_is_dropped() {
    let problem = parse_problem("fof(f, axiom, % gone\n(p & q)).").expect("problem");
    assert!(problem.formula_comments.is_empty());
    assert_eq!(problem.formulas.len(), 1);
}

#[test]
fn full_line_comment_inside_a_formula_is_dropped() {
    // Column-1 comments are tokens, but mid-formula they have nowhere to
    // attach and are discarded.
    let problem = parse_problem("fof(f, axiom,\n% gone\n(p & q)).").expect("problem");
    assert!(problem.formula_comments.is_empty());
}

#[test]
fn defined_and_system_comment_kinds() {
    let problem = parse_problem("%$ defined\n%$$ system\nfof(f, axiom, p).").expect("problem");
    let comments = &problem.formula_comments["f"];
    assert_eq!(comments[0].kind, CommentKind::Defined);
    assert_eq!(comments[1].kind, CommentKind::System);
    assert_eq!(comments[0].format, CommentFormat::Line);
}

#[test]
fn annotations_with_source_and_info() {
    let formula = parse_annotated(
        "fof(f, axiom, p, inference(rule,[status(thm)],[a,b]), [extra, 12]).",
    )
    .expect("formula");
    let annotations = formula.annotations().as_ref().expect("annotations");
    assert_eq!(annotations.0.to_string(), "inference(rule,[status(thm)],[a,b])");
    assert_eq!(annotations.1.as_ref().map(Vec::len), Some(2));
}

#[test]
fn integer_formula_names() {
    let formula = parse_annotated("fof(123, axiom, p).").expect("formula");
    assert_eq!(formula.name(), "123");
    // Integer names are re-emitted without quotes.
    assert!(formula.to_string().starts_with("fof(123,"));
}

#[test]
fn quoted_formula_names_canonicalize() {
    let a = parse_annotated("fof('f', axiom, p).").expect("formula");
    let b = parse_annotated("fof(f, axiom, p).").expect("formula");
    assert_eq!(a, b);
}

#[test]
fn mixed_dialect_problem() {
    let problem = parse_problem(
        "thf(t1, type, p: $i > $o).\n\
         tff(t2, type, q: ($i * $i) > $o).\n\
         fof(f1, axiom, r(a)).\n\
         tcf(c1, axiom, ! [X: $i]: (s(X) | ~ s(X))).\n\
         cnf(c2, axiom, u(X) | ~ v(X)).\n\
         tpi(p1, assert, w).\n",
    )
    .expect("problem");
    assert_eq!(problem.formulas.len(), 6);
    let kinds: Vec<_> = problem
        .formulas
        .iter()
        .map(|f| match f {
            AnnotatedFormula::Thf(_) => "thf",
            AnnotatedFormula::Tff(_) => "tff",
            AnnotatedFormula::Fof(_) => "fof",
            AnnotatedFormula::Tcf(_) => "tcf",
            AnnotatedFormula::Cnf(_) => "cnf",
            AnnotatedFormula::Tpi(_) => "tpi",
        })
        .collect();
    assert_eq!(kinds, ["thf", "tff", "fof", "tcf", "cnf", "tpi"]);
}

#[test]
fn unknown_keyword_is_rejected() {
    let err = parse_problem("foo(f, axiom, p).").unwrap_err();
    assert!(err
        .to_string()
        .contains("Expected one of include,thf,tff,fof,tcf,cnf,tpi"));
}

#[test]
fn lexer_errors_surface_with_positions() {
    let err = parse_problem("fof(f, axiom,\n  `p).").unwrap_err();
    assert_eq!(err.to_string(), "Unrecognized token '`'");
    assert_eq!((err.line(), err.column()), (2, 3));
}

#[test]
fn two_parses_agree() {
    let source = "thf(e, axiom, ![X:$i]: (p @ X)).";
    let one = parse_problem(source).expect("first parse");
    let two = parse_problem(source).expect("second parse");
    assert_eq!(one, two);
}
