//! Round-trip and associativity properties.
//!
//! For every tree `x` the parser returns, `parse(x.to_string())` must
//! yield a tree equal to `x` (equality ignores the meta side-map). The
//! test corpus leans on the awkward corners: defensive parentheses,
//! canonicalized quoting, indexed non-classical operators that change
//! surface form, numbers with exponents and leading zeros.

use tptp_par::ast::{tff, thf};
use tptp_par::{parse_problem, parse_tff, parse_thf};

fn round_trip(source: &str) {
    let first = parse_problem(source)
        .unwrap_or_else(|e| panic!("cannot parse {source:?}: {e}"));
    let printed = first.to_string();
    let second = parse_problem(&printed)
        .unwrap_or_else(|e| panic!("cannot reparse {printed:?}: {e}"));
    assert_eq!(first, second, "round trip changed the tree for {source:?}");
}

#[test]
fn fof_round_trips() {
    round_trip("fof(f, axiom, (p(X) & q)).");
    round_trip("fof(f, axiom, ! [X, Y]: (p(X) => ? [Z]: q(Y, Z))).");
    round_trip("fof(f, axiom, ~ (a = b)).");
    round_trip("fof(f, axiom, f(g(h(a)), \"obj\") != 'weird name'(42)).");
    round_trip("fof(f, conjecture, (a <=> b)).");
    round_trip("fof(f, axiom, (a <~> (b ~| (c ~& d)))).");
    round_trip("tpi(p, assert, q(a)).");
}

#[test]
fn cnf_round_trips() {
    round_trip("cnf(c, axiom, p(X) | ~q(X,a) | r(f(b)) = s).");
    round_trip("cnf(c, axiom, X != a | \"d\" = Y).");
    round_trip("cnf(c, negated_conjecture, ~ p).");
}

#[test]
fn tcf_round_trips() {
    round_trip("tcf(t, type, c: $i > $o).");
    round_trip("tcf(c, axiom, ! [X: $i, Y]: (p(X) | ~ q(Y))).");
    round_trip("tcf(c, axiom, p | q).");
}

#[test]
fn tff_round_trips() {
    round_trip("tff(t, type, king_of_france : human).");
    round_trip("tff(t, type, f: ($i * $i) > $o).");
    round_trip("tff(t, type, g: $i > ($i > $o)).");
    round_trip("tff(t, type, h: !> [A: $tType]: ((A * A) > $o)).");
    round_trip("tff(t, type, t: [$i, $o]).");
    round_trip("tff(f, axiom, ! [X: $i]: (p(X) | q)).");
    round_trip("tff(f, axiom, f(X) = g(a)).");
    round_trip("tff(f, axiom, $ite(p, a, b) = c).");
    round_trip("tff(f, axiom, $let(f: $i > $i, f(X) := X, f(a) = a)).");
    round_trip("tff(f, axiom, [a, b] = c).");
    round_trip("tff(f, axiom, a == b).");
    round_trip("tff(f, axiom, X := f(a)).");
    round_trip("tff(f, axiom, p(q & r)).");
    round_trip("tff(f, axiom, [p, q] --> [r]).");
    round_trip("tff(f, axiom, [.] (p)).");
    round_trip("tff(f, axiom, <.> (p & q)).");
    round_trip("tff(f, axiom, /.\\ (p)).");
    round_trip("tff(f, axiom, {$box(#1)} @ (p, q)).");
    round_trip("tff(f, axiom, {$knows(agent := alice)} @ (p)).");
}

#[test]
fn thf_round_trips() {
    round_trip("thf(t, type, p: $i > $o).");
    round_trip("thf(t, type, q: ($i * $i) > $o).");
    round_trip("thf(e, axiom, ![X:$i]: (p @ X)).");
    round_trip("thf(e, axiom, ^ [X: $i, Y]: (f @ X @ Y)).");
    round_trip("thf(e, axiom, ?* [P: $i > $o]: (P @ a)).");
    round_trip("thf(e, axiom, (a @ b @ c)).");
    round_trip("thf(e, axiom, (a | b | c)).");
    round_trip("thf(e, axiom, (a = b)).");
    round_trip("thf(e, axiom, ((!!) @ p)).");
    round_trip("thf(e, axiom, ((&) @ a @ b)).");
    round_trip("thf(e, axiom, $ite(c, t, e)).");
    round_trip("thf(e, axiom, $let(f: $i, f := a, (p @ f))).");
    round_trip("thf(e, axiom, $let([f: $i, g: $i], [(f := a), (g := b)], (p @ f @ g))).");
    round_trip("thf(e, axiom, [a, b, c]).");
    round_trip("thf(s, axiom, [a, b] --> [c]).");
    round_trip("thf(e, axiom, [.] (p)).");
    round_trip("thf(e, axiom, {$box} @ (p)).");
    round_trip("thf(e, axiom, \"obj\" = a).");
    round_trip("thf(e, axiom, (f @ 3 @ 1/2 @ 2.5E-3)).");
}

#[test]
fn indexed_short_forms_round_trip_structurally() {
    // `[#idx]` is accepted on input but re-emitted in long form; equality
    // is on the tree, not the original text.
    let source = "tff(f, axiom, [#idx] (p)).";
    let first = parse_problem(source).expect("parse");
    let printed = first.to_string();
    assert!(printed.contains("{$box(#idx)}"), "got {printed}");
    let second = parse_problem(&printed).expect("reparse");
    assert_eq!(first, second);

    round_trip("thf(f, axiom, [#2] (p)).");
    round_trip("thf(f, axiom, <#m> (p)).");
    round_trip("thf(f, axiom, /#k\\ (p)).");
}

#[test]
fn numbers_round_trip() {
    round_trip("fof(n, axiom, p(0, -1, +2, 123456789012345678901234567890)).");
    round_trip("fof(n, axiom, p(1/2, -3/4)).");
    round_trip("fof(n, axiom, p(3.14, -0.001, 2.5E-3, 1e10, 1.05)).");
}

#[test]
fn quoting_round_trips() {
    round_trip("fof(q, axiom, p('hello world', 'it\\'s', \"a \\\"b\\\"\")).");
    // A quoted lower word canonicalizes to the bare form and stays there.
    let first = parse_problem("fof(q, axiom, 'p'(a)).").expect("parse");
    assert!(first.to_string().contains("p(a)"));
    round_trip("fof(q, axiom, 'p'(a)).");
}

#[test]
fn annotations_round_trip() {
    round_trip("fof(f, axiom, p, unknown).");
    round_trip("fof(f, axiom, p, file('F.p', f), [v1, v2:x, []]).");
    round_trip("fof(f, axiom, p, inference(rule,[status(thm)],[a,b]), []).");
    round_trip("fof(f, axiom-strength(3), p).");
    round_trip("cnf(c, axiom, p, $fot(f(X))).");
    round_trip("fof(f, axiom, p, $fof(q => r)).");
    round_trip("fof(f, axiom, p, $cnf(q | ~ r)).");
    round_trip("fof(f, axiom, p, $tff(! [X: $i]: q(X))).");
    round_trip("fof(f, axiom, p, $thf((a @ b))).");
}

#[test]
fn comments_and_includes_round_trip() {
    round_trip(
        "% leading\n\
         include('Axioms/SET001-0.ax').\n\
         include('Axioms/SET001-1.ax', [a1, a2]).\n\
         /* block */\n\
         fof(f, axiom, p).\n",
    );
    round_trip("%$ defined\n%$$ system\nfof(f, axiom, p).");
}

#[test]
fn problems_round_trip_whole() {
    round_trip(
        "thf(t1, type, p: $i > $o).\n\
         thf(a1, axiom, ![X:$i]: (p @ X)).\n\
         tff(t2, type, q: ($i * $i) > $o).\n\
         tff(a2, axiom, ! [X: $i, Y: $i]: q(X, Y)).\n\
         fof(a3, axiom, (r(a) & r(b))).\n\
         cnf(a4, axiom, s(X) | ~ s(X)).\n",
    );
}

// ---------------------------------------------------------------------------
// Associativity laws
// ---------------------------------------------------------------------------

#[test]
fn thf_application_associates_left() {
    let f = parse_thf("a @ b @ c").expect("parse");
    let thf::Formula::Binary(thf::BinaryConnective::App, left, right) = f else {
        panic!("expected application");
    };
    assert!(matches!(
        *left,
        thf::Formula::Binary(thf::BinaryConnective::App, _, _)
    ));
    assert!(matches!(*right, thf::Formula::Function(ref n, _) if n == "c"));
}

#[test]
fn disjunction_associates_right() {
    let f = parse_thf("a | b | c").expect("parse");
    let thf::Formula::Binary(thf::BinaryConnective::Or, left, right) = f else {
        panic!("expected disjunction");
    };
    assert!(matches!(*left, thf::Formula::Function(ref n, _) if n == "a"));
    assert!(matches!(
        *right,
        thf::Formula::Binary(thf::BinaryConnective::Or, _, _)
    ));

    let f = parse_tff("a & b & c").expect("parse");
    let tff::Formula::Binary(tff::BinaryConnective::And, _, right) = f else {
        panic!("expected conjunction");
    };
    assert!(matches!(
        *right,
        tff::Formula::Binary(tff::BinaryConnective::And, _, _)
    ));
}

#[test]
fn tff_mapping_type_associates_right() {
    let source = "tff(t, type, f: a > b > c).";
    let problem = parse_problem(source).expect("parse");
    let tptp_par::AnnotatedFormula::Tff(annotated) = &problem.formulas[0] else {
        panic!("expected tff");
    };
    let tff::Statement::Typing(_, tff::Type::Mapping(args, ret)) = &annotated.formula else {
        panic!("expected mapping typing");
    };
    assert_eq!(args.len(), 1);
    assert!(matches!(**ret, tff::Type::Mapping(_, _)));
    round_trip(source);
}

#[test]
fn tff_product_mapping_groups_arguments() {
    let problem = parse_problem("tff(t, type, f: (a * b) > c).").expect("parse");
    let tptp_par::AnnotatedFormula::Tff(annotated) = &problem.formulas[0] else {
        panic!("expected tff");
    };
    let tff::Statement::Typing(_, tff::Type::Mapping(args, ret)) = &annotated.formula else {
        panic!("expected mapping typing");
    };
    assert_eq!(args.len(), 2);
    assert!(matches!(args[0], tff::Type::Atomic(ref n, _) if n == "a"));
    assert!(matches!(args[1], tff::Type::Atomic(ref n, _) if n == "b"));
    assert!(matches!(**ret, tff::Type::Atomic(ref n, _) if n == "c"));
}

#[test]
fn thf_type_constructors() {
    let f = parse_thf("a > b > c").expect("parse");
    let thf::Formula::Binary(thf::BinaryConnective::FunType, _, right) = f else {
        panic!("expected mapping");
    };
    assert!(matches!(
        *right,
        thf::Formula::Binary(thf::BinaryConnective::FunType, _, _)
    ));

    let f = parse_thf("a * b * c").expect("parse");
    let thf::Formula::Binary(thf::BinaryConnective::ProductType, left, _) = f else {
        panic!("expected product");
    };
    assert!(matches!(
        *left,
        thf::Formula::Binary(thf::BinaryConnective::ProductType, _, _)
    ));
}
