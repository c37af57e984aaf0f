//! End-to-end scenarios over the public entry points.

use tptp_par::ast::{cnf, fof, tff, thf};
use tptp_par::{
    parse_annotated_cnf, parse_annotated_fof, parse_annotated_tff, parse_annotated_thf,
    parse_problem, parse_thf,
};

#[test]
fn fof_conjunction() {
    let annotated = parse_annotated_fof("fof(f, axiom, (p(X) & q)).").expect("parse");
    assert_eq!(annotated.name, "f");
    assert_eq!(annotated.role.to_string(), "axiom");
    assert!(annotated.annotations.is_none());

    let fof::Statement::Logical(formula) = &annotated.formula;
    let fof::Formula::Binary(fof::BinaryConnective::And, left, right) = formula else {
        panic!("expected conjunction, got {formula:?}");
    };
    assert!(
        matches!(&**left, fof::Formula::Atomic(w, args)
            if w == "p" && matches!(args[..], [fof::Term::Variable(ref v)] if v == "X"))
    );
    assert!(matches!(&**right, fof::Formula::Atomic(w, args) if w == "q" && args.is_empty()));

    let reparsed = parse_annotated_fof(&annotated.to_string()).expect("round trip");
    assert_eq!(annotated, reparsed);
}

#[test]
fn tff_typing() {
    let annotated = parse_annotated_tff("tff(t, type, king_of_france : human).").expect("parse");
    assert_eq!(annotated.name, "t");
    assert_eq!(annotated.role.to_string(), "type");
    let tff::Statement::Typing(atom, ty) = &annotated.formula else {
        panic!("expected typing, got {:?}", annotated.formula);
    };
    assert_eq!(atom, "king_of_france");
    assert!(matches!(ty, tff::Type::Atomic(name, args) if name == "human" && args.is_empty()));
}

#[test]
fn thf_quantified_application() {
    let formula = parse_thf("![X:$i]: (p @ X)").expect("parse");
    let thf::Formula::Quantified(thf::Quantifier::Forall, vars, body) = formula else {
        panic!("expected quantified formula");
    };
    assert_eq!(vars.len(), 1);
    assert_eq!(vars[0].0, "X");
    assert!(
        matches!(vars[0].1, Some(thf::Formula::Function(ref n, ref args)) if n == "$i" && args.is_empty())
    );
    let thf::Formula::Binary(thf::BinaryConnective::App, left, right) = *body else {
        panic!("expected application body");
    };
    assert!(matches!(*left, thf::Formula::Function(ref n, _) if n == "p"));
    assert!(matches!(*right, thf::Formula::Variable(ref v) if v == "X"));
}

#[test]
fn cnf_clause_literals_in_order() {
    let annotated =
        parse_annotated_cnf("cnf(c, axiom, p(X) | ~q(X,a) | r(f(b)) = s).").expect("parse");
    let cnf::Statement::Logical(clause) = &annotated.formula;
    assert_eq!(clause.0.len(), 3);
    assert!(matches!(clause.0[0], cnf::Literal::Positive(ref w, _) if w == "p"));
    assert!(
        matches!(clause.0[1], cnf::Literal::Negative(ref w, ref args) if w == "q" && args.len() == 2)
    );
    let cnf::Literal::Equality(lhs, rhs) = &clause.0[2] else {
        panic!("expected equality literal");
    };
    assert!(matches!(lhs, cnf::Term::Atomic(w, args) if w == "r" && args.len() == 1));
    assert!(matches!(rhs, cnf::Term::Atomic(w, args) if w == "s" && args.is_empty()));
}

#[test]
fn block_comment_attaches_to_following_formula() {
    let problem = parse_problem("/* hi */\nfof(x, axiom, p).").expect("parse");
    let comments = &problem.formula_comments["x"];
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].format, tptp_par::CommentFormat::Block);
    assert_eq!(comments[0].kind, tptp_par::CommentKind::Normal);
    assert_eq!(comments[0].text, " hi ");
}

#[test]
fn tff_nonclassical_box_pretty_prints_short() {
    let annotated = parse_annotated_tff("tff(a, axiom, [.] (p)).").expect("parse");
    let tff::Statement::Logical(formula) = &annotated.formula else {
        panic!("expected logical statement");
    };
    let tff::Formula::NonclassicalPolyary(tff::VararyConnective::Box(None), args) = formula
    else {
        panic!("expected box formula, got {formula:?}");
    };
    assert!(matches!(&args[..], [tff::Formula::Atomic(w, a)] if w == "p" && a.is_empty()));
    assert_eq!(formula.to_string(), "[.] (p)");
}

#[test]
fn thf_equality_demands_unitary_terms() {
    let err = parse_annotated_thf("thf(r, axiom, a = ! [X]: p).").unwrap_err();
    assert!(
        err.to_string().contains("<thf_unitary_term>"),
        "message should mention the unitary-term constraint: {err}"
    );
    let err = parse_annotated_thf("thf(r, axiom, a = ~ b).").unwrap_err();
    assert!(err.to_string().contains("<thf_unitary_term>"), "{err}");
}

#[test]
fn origin_records_keyword_position() {
    let problem = parse_problem("\n\n   fof(f, axiom, p).").expect("parse");
    let origin = problem.formulas[0].origin().expect("origin");
    assert_eq!((origin.line, origin.column), (3, 4));
}

#[test]
fn symbols_of_an_annotated_formula() {
    let annotated =
        parse_annotated_fof("fof(f, axiom, ! [X]: (p(X, f(a)) => q(\"d\"))).").expect("parse");
    let symbols = annotated.symbols();
    for expected in ["p", "f", "a", "q", "\"d\""] {
        assert!(symbols.contains(expected), "missing {expected}");
    }
    assert!(!symbols.contains("X"));
}
