//! Edge case tests for tptp-lex.

use proptest::prelude::*;

use crate::{Lexer, Token, TokenKind};

fn lex_all(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect::<Result<_, _>>().expect("lex error")
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex_all(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn whitespace_only_input() {
    assert!(lex_all("  \t\r\n  ").is_empty());
}

#[test]
fn full_annotated_formula() {
    use TokenKind::*;
    assert_eq!(
        kinds("thf(e, axiom, ![X:$i]: (p @ X))."),
        vec![
            LowerWord, LParen, LowerWord, Comma, LowerWord, Comma, Forall, LBracket, UpperWord,
            Colon, DollarWord, RBracket, Colon, LParen, LowerWord, App, UpperWord, RParen,
            RParen, Dot
        ]
    );
}

#[test]
fn comment_only_emitted_at_line_start() {
    use TokenKind::*;
    // Leading comments on their own lines are tokens.
    assert_eq!(
        kinds("% one\n% two\nfof"),
        vec![LineComment, LineComment, LowerWord]
    );
    // The same comments after content on the line are skipped.
    assert_eq!(kinds("fof % one"), vec![LowerWord]);
    // A block comment opening a line is a token even when content follows.
    assert_eq!(kinds("/* c */ fof"), vec![BlockComment, LowerWord]);
    // An inline block comment vanishes.
    assert_eq!(kinds("fof /* c */ tff"), vec![LowerWord, LowerWord]);
}

#[test]
fn inline_block_comment_then_line_start_block() {
    use TokenKind::*;
    // The second comment opens a fresh line, so it is emitted.
    assert_eq!(
        kinds("p /* a */\n/* b */ q"),
        vec![LowerWord, BlockComment, LowerWord]
    );
}

#[test]
fn multiline_block_comment_swallows_following_inline_comment() {
    use TokenKind::*;
    // The block ends on line 2; a '%' later on line 2 is inline.
    assert_eq!(kinds("/* a\nb */ % gone\nq"), vec![BlockComment, LowerWord]);
}

#[test]
fn signs_versus_operators() {
    use TokenKind::*;
    assert_eq!(kinds("a + b"), vec![LowerWord, Plus, LowerWord]);
    assert_eq!(kinds("f(+1)"), vec![LowerWord, LParen, Int, RParen]);
    assert_eq!(kinds("- 1"), vec![Dash, Int]);
    assert_eq!(kinds("-1"), vec![Int]);
}

#[test]
fn nonclassical_long_form_stream() {
    use TokenKind::*;
    assert_eq!(
        kinds("{$box(#1, k := v)} @ (p)"),
        vec![
            LBrace, DollarWord, LParen, Hash, Int, Comma, LowerWord, Assignment, LowerWord,
            RParen, RBrace, App, LParen, LowerWord, RParen
        ]
    );
}

#[test]
fn crlf_line_counting() {
    let toks = lex_all("p\r\nq");
    assert_eq!(toks[1].pos.line, 2);
    assert_eq!(toks[1].pos.column, 1);
}

#[test]
fn very_long_word() {
    let name = format!("a{}", "b".repeat(4096));
    let toks = lex_all(&name);
    assert_eq!(toks[0].value.as_ref(), name.as_str());
}

proptest! {
    #[test]
    fn lower_words_round_trip(word in "[a-z][a-zA-Z0-9_]{0,30}") {
        let toks = lex_all(&word);
        prop_assert_eq!(toks.len(), 1);
        prop_assert_eq!(toks[0].kind, TokenKind::LowerWord);
        prop_assert_eq!(toks[0].value.as_ref(), word.as_str());
    }

    #[test]
    fn integers_lex_as_single_token(n in "[+-]?[0-9]{1,18}") {
        let toks = lex_all(&n);
        prop_assert_eq!(toks.len(), 1);
        prop_assert_eq!(toks[0].kind, TokenKind::Int);
    }

    #[test]
    fn quoted_atoms_never_panic(content in "[ -~]{0,20}") {
        let source = format!("'{}'", content.replace('\\', "").replace('\'', ""));
        let _ = Lexer::new(&source).collect::<Vec<_>>();
    }
}
