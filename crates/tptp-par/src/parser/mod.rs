//! The recursive-descent parser.
//!
//! This module owns the [`Parser`] core: a growable look-ahead buffer over
//! the lexer, the `peek`/`consume`/`expect` helpers, and the top-level
//! grammar (problems, includes, annotated formulas, roles, annotations).
//! The dialect grammars live in the sibling modules ([`thf`](self), tff,
//! fof, cnf/tcf, general), all implemented as methods on `Parser`.
//!
//! Comment handling: the look-ahead buffer holds raw tokens, but `peek`
//! and `consume` are transparent to comment tokens — they index and pop
//! past them. Only the top-level loop reads comments, via
//! [`Parser::collect_comments`], to attach them to the next include or
//! annotated formula.

mod cnf;
mod fof;
mod general;
mod tff;
mod thf;

use std::collections::VecDeque;

use tptp_lex::{Lexer, Token, TokenKind};
use tptp_util::{ParseError, Position, Result};

use crate::ast::{
    self, meta_with_origin, AnnotatedFormula, Annotations, CnfAnnotated, Comment, CommentFormat,
    CommentKind, FofAnnotated, FormulaRole, Include, Number, Problem, TcfAnnotated, TffAnnotated,
    ThfAnnotated, TpiAnnotated,
};

/// Token kinds that can serve as an atomic word (functor, predicate, or
/// type symbol).
pub(crate) const ATOMIC_WORD_KINDS: [TokenKind; 4] = [
    TokenKind::LowerWord,
    TokenKind::SingleQuoted,
    TokenKind::DollarWord,
    TokenKind::DollarDollarWord,
];

/// A recursive-descent parser over a single input.
///
/// One parser instance is owned by one caller and driven to completion;
/// it keeps no global state, so disjoint instances may run in parallel.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: VecDeque<Token<'a>>,
    /// Position of the last consumed token, for end-of-input errors.
    last_pos: Option<Position>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            lookahead: VecDeque::new(),
            last_pos: None,
        }
    }

    // -----------------------------------------------------------------------
    // Token plumbing
    // -----------------------------------------------------------------------

    /// Pulls tokens until the buffer holds at least `n` non-comment tokens
    /// or the input is exhausted.
    fn fill_visible(&mut self, n: usize) -> Result<()> {
        loop {
            let visible = self.lookahead.iter().filter(|t| !t.is_comment()).count();
            if visible >= n {
                return Ok(());
            }
            match self.lexer.next_token()? {
                Some(token) => self.lookahead.push_back(token),
                None => return Ok(()),
            }
        }
    }

    fn nth_visible_index(&self, i: usize) -> Option<usize> {
        let mut seen = 0usize;
        for (j, token) in self.lookahead.iter().enumerate() {
            if !token.is_comment() {
                if seen == i {
                    return Some(j);
                }
                seen += 1;
            }
        }
        None
    }

    /// The `i`-th upcoming non-comment token, or `None` at end of input.
    pub(crate) fn safe_peek(&mut self, i: usize) -> Result<Option<&Token<'a>>> {
        self.fill_visible(i + 1)?;
        Ok(self.nth_visible_index(i).map(|j| &self.lookahead[j]))
    }

    /// The kind of the `i`-th upcoming non-comment token.
    pub(crate) fn safe_peek_kind(&mut self, i: usize) -> Result<Option<TokenKind>> {
        Ok(self.safe_peek(i)?.map(|t| t.kind))
    }

    /// The next non-comment token; end of input is an error.
    pub(crate) fn peek(&mut self) -> Result<&Token<'a>> {
        self.fill_visible(1)?;
        let eof = self.eof_error("a token");
        match self.nth_visible_index(0) {
            Some(j) => Ok(&self.lookahead[j]),
            None => Err(eof),
        }
    }

    /// The `i`-th upcoming non-comment token; end of input is an error.
    pub(crate) fn peek_at(&mut self, i: usize) -> Result<&Token<'a>> {
        self.fill_visible(i + 1)?;
        let eof = self.eof_error("a token");
        match self.nth_visible_index(i) {
            Some(j) => Ok(&self.lookahead[j]),
            None => Err(eof),
        }
    }

    pub(crate) fn peek_kind(&mut self) -> Result<TokenKind> {
        Ok(self.peek()?.kind)
    }

    /// True when the next visible token has the given kind.
    pub(crate) fn next_is(&mut self, kind: TokenKind) -> Result<bool> {
        Ok(self.safe_peek_kind(0)? == Some(kind))
    }

    /// Pops the next non-comment token, discarding any comments that
    /// precede it (mid-formula comments do not survive parsing).
    pub(crate) fn consume(&mut self) -> Result<Token<'a>> {
        self.fill_visible(1)?;
        while matches!(self.lookahead.front(), Some(t) if t.is_comment()) {
            self.lookahead.pop_front();
        }
        match self.lookahead.pop_front() {
            Some(token) => {
                self.last_pos = Some(token.pos);
                Ok(token)
            }
            None => Err(self.eof_error("a token")),
        }
    }

    /// Consumes a token of the required kind, or errors.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        match self.safe_peek_kind(0)? {
            None => Err(self.eof_error(kind.name())),
            Some(k) if k == kind => self.consume(),
            Some(_) => {
                let tok = self.peek()?;
                Err(unexpected(kind.name(), tok))
            }
        }
    }

    /// Consumes a token whose kind is one of `kinds`, or errors with the
    /// full list.
    pub(crate) fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token<'a>> {
        match self.safe_peek_kind(0)? {
            None => Err(self.eof_error(&kind_list(kinds))),
            Some(k) if kinds.contains(&k) => self.consume(),
            Some(_) => {
                let expected = format!("one of {}", kind_list(kinds));
                let tok = self.peek()?;
                Err(unexpected(&expected, tok))
            }
        }
    }

    /// Index of the first upcoming token whose kind differs from `kind`,
    /// skipping the leading run of `kind` tokens. Used to look past `(`
    /// when disambiguating typings and sequents from formulas.
    pub(crate) fn peek_under(&mut self, kind: TokenKind) -> Result<usize> {
        let mut i = 0usize;
        while self.peek_at(i)?.kind == kind {
            i += 1;
        }
        Ok(i)
    }

    /// An end-of-input error at the last consumed token's position, or
    /// (-1, -1) when nothing was ever consumed.
    pub(crate) fn eof_error(&self, expected: &str) -> ParseError {
        let (line, column) = match self.last_pos {
            Some(pos) => (pos.line as i64, pos.column as i64),
            None => (-1, -1),
        };
        ParseError::UnexpectedEof {
            expected: expected.to_string(),
            line,
            column,
        }
    }

    // -----------------------------------------------------------------------
    // Top level
    // -----------------------------------------------------------------------

    /// Parses a whole problem file:
    /// `tptp_file := (comment* (include | annotated_formula))*`.
    pub fn problem(&mut self) -> Result<Problem> {
        let mut problem = Problem::default();
        let mut comments: Vec<Comment> = Vec::new();

        loop {
            self.collect_comments(&mut comments)?;
            // Comments after the last construct are dropped.
            if self.safe_peek(0)?.is_none() {
                break;
            }

            let keyword = {
                let tok = self.peek()?;
                if tok.kind != TokenKind::LowerWord {
                    return Err(unexpected("one of include,thf,tff,fof,tcf,cnf,tpi", tok));
                }
                tok.value.to_string()
            };
            match keyword.as_str() {
                "include" => {
                    let mut include = self.include()?;
                    include.comments = std::mem::take(&mut comments);
                    problem.includes.push(include);
                }
                "thf" | "tff" | "fof" | "tcf" | "cnf" | "tpi" => {
                    let formula = self.annotated_formula()?;
                    if !comments.is_empty() {
                        problem
                            .formula_comments
                            .entry(formula.name().to_string())
                            .or_default()
                            .append(&mut comments);
                    }
                    problem.formulas.push(formula);
                }
                _ => {
                    return Err(unexpected(
                        "one of include,thf,tff,fof,tcf,cnf,tpi",
                        self.peek()?,
                    ))
                }
            }
        }

        Ok(problem)
    }

    /// Drains leading comment tokens from the stream into `out`.
    pub(crate) fn collect_comments(&mut self, out: &mut Vec<Comment>) -> Result<()> {
        loop {
            if self.lookahead.is_empty() {
                match self.lexer.next_token()? {
                    Some(token) => self.lookahead.push_back(token),
                    None => return Ok(()),
                }
            }
            if self.lookahead.front().is_some_and(|t| t.is_comment()) {
                let token = self.lookahead.pop_front().expect("checked front");
                out.push(comment_of(&token));
            } else {
                return Ok(());
            }
        }
    }

    /// Parses `include('file'[, [name, …]]).` (without leading comments).
    pub(crate) fn include(&mut self) -> Result<Include> {
        self.expect(TokenKind::LowerWord)?;
        self.expect(TokenKind::LParen)?;
        let file_name = self
            .expect_one_of(&[TokenKind::SingleQuoted, TokenKind::LowerWord])?
            .value
            .into_owned();
        let mut selection = Vec::new();
        if self.next_is(TokenKind::Comma)? {
            self.consume()?;
            self.expect(TokenKind::LBracket)?;
            if !self.next_is(TokenKind::RBracket)? {
                loop {
                    selection.push(self.name()?);
                    if self.next_is(TokenKind::Comma)? {
                        self.consume()?;
                    } else {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RBracket)?;
        }
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Dot)?;
        Ok(Include {
            file_name,
            selection,
            comments: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Annotated formulas
    // -----------------------------------------------------------------------

    /// Parses one annotated formula, dispatching on the leading keyword.
    pub fn annotated_formula(&mut self) -> Result<AnnotatedFormula> {
        let keyword = {
            let tok = self.peek()?;
            if tok.kind != TokenKind::LowerWord {
                return Err(unexpected("one of thf,tff,fof,tcf,cnf,tpi", tok));
            }
            tok.value.to_string()
        };
        match keyword.as_str() {
            "thf" => Ok(AnnotatedFormula::Thf(self.annotated_thf()?)),
            "tff" => Ok(AnnotatedFormula::Tff(self.annotated_tff()?)),
            "fof" => Ok(AnnotatedFormula::Fof(self.annotated_fof()?)),
            "tcf" => Ok(AnnotatedFormula::Tcf(self.annotated_tcf()?)),
            "cnf" => Ok(AnnotatedFormula::Cnf(self.annotated_cnf()?)),
            "tpi" => Ok(AnnotatedFormula::Tpi(self.annotated_tpi()?)),
            _ => Err(unexpected("one of thf,tff,fof,tcf,cnf,tpi", self.peek()?)),
        }
    }

    /// Discards any comments before the first real token; used by the
    /// single-formula entry points, which have nothing to attach them to.
    pub fn skip_leading_comments(&mut self) -> Result<()> {
        let mut sink = Vec::new();
        self.collect_comments(&mut sink)
    }

    /// Bare THF formula entry (no annotation shell).
    pub fn thf_formula(&mut self) -> Result<ast::thf::Formula> {
        self.thf_logic_formula()
    }

    /// Bare TFF/TFX formula entry (no annotation shell).
    pub fn tff_formula(&mut self) -> Result<ast::tff::Formula> {
        self.tff_logic_formula(true)
    }

    /// Bare FOF formula entry (no annotation shell).
    pub fn fof_formula(&mut self) -> Result<ast::fof::Formula> {
        self.fof_logic_formula()
    }

    /// Bare TCF formula entry (no annotation shell).
    pub fn tcf_bare_formula(&mut self) -> Result<ast::tcf::Formula> {
        self.tcf_formula()
    }

    /// Bare CNF clause entry (no annotation shell).
    pub fn cnf_bare_formula(&mut self) -> Result<ast::cnf::Formula> {
        self.cnf_formula()
    }

    /// Shared shell of every annotated formula:
    /// `keyword(name, role, formula[, source[, [info]]]).`
    ///
    /// Returns the pieces plus the keyword position (the formula origin).
    fn annotated_shell<S>(
        &mut self,
        keyword: &str,
        formula: impl FnOnce(&mut Self) -> Result<S>,
    ) -> Result<(String, FormulaRole, S, Annotations, Position)> {
        let kw = self.expect(TokenKind::LowerWord)?;
        if kw.value != keyword {
            return Err(ParseError::UnexpectedToken {
                expected: format!("'{keyword}'"),
                found: kw.describe(),
                line: kw.pos.line as i64,
                column: kw.pos.column as i64,
            });
        }
        let origin = kw.pos;
        self.expect(TokenKind::LParen)?;
        let name = self.name()?;
        self.expect(TokenKind::Comma)?;
        let role = self.role()?;
        self.expect(TokenKind::Comma)?;
        let statement = formula(self)?;
        let annotations = self.annotations()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Dot)?;
        Ok((name, role, statement, annotations, origin))
    }

    pub fn annotated_thf(&mut self) -> Result<ThfAnnotated> {
        let (name, role, formula, annotations, origin) =
            self.annotated_shell("thf", |p| p.thf_statement())?;
        let mut annotated = ThfAnnotated::new(name, role, formula, annotations);
        annotated.meta = meta_with_origin(origin);
        Ok(annotated)
    }

    pub fn annotated_tff(&mut self) -> Result<TffAnnotated> {
        let (name, role, formula, annotations, origin) =
            self.annotated_shell("tff", |p| p.tff_statement())?;
        let mut annotated = TffAnnotated::new(name, role, formula, annotations);
        annotated.meta = meta_with_origin(origin);
        Ok(annotated)
    }

    pub fn annotated_fof(&mut self) -> Result<FofAnnotated> {
        let (name, role, formula, annotations, origin) =
            self.annotated_shell("fof", |p| p.fof_statement())?;
        let mut annotated = FofAnnotated::new(name, role, formula, annotations);
        annotated.meta = meta_with_origin(origin);
        Ok(annotated)
    }

    pub fn annotated_tcf(&mut self) -> Result<TcfAnnotated> {
        let (name, role, formula, annotations, origin) =
            self.annotated_shell("tcf", |p| p.tcf_statement())?;
        let mut annotated = TcfAnnotated::new(name, role, formula, annotations);
        annotated.meta = meta_with_origin(origin);
        Ok(annotated)
    }

    pub fn annotated_cnf(&mut self) -> Result<CnfAnnotated> {
        let (name, role, formula, annotations, origin) =
            self.annotated_shell("cnf", |p| p.cnf_statement())?;
        let mut annotated = CnfAnnotated::new(name, role, formula, annotations);
        annotated.meta = meta_with_origin(origin);
        Ok(annotated)
    }

    pub fn annotated_tpi(&mut self) -> Result<TpiAnnotated> {
        let (name, role, formula, annotations, origin) =
            self.annotated_shell("tpi", |p| p.fof_statement())?;
        let mut annotated = TpiAnnotated::new(name, role, formula, annotations);
        annotated.meta = meta_with_origin(origin);
        Ok(annotated)
    }

    /// `name := atomic_word | integer`
    pub(crate) fn name(&mut self) -> Result<String> {
        let tok = self.expect_one_of(&[
            TokenKind::LowerWord,
            TokenKind::SingleQuoted,
            TokenKind::Int,
        ])?;
        Ok(tok.value.into_owned())
    }

    /// An atomic word: lower word, quoted atom, `$word`, or `$$word`.
    pub(crate) fn atomic_word(&mut self) -> Result<String> {
        let tok = self.expect_one_of(&ATOMIC_WORD_KINDS)?;
        Ok(tok.value.into_owned())
    }

    /// `role := lower_word ('-' general_term)?`
    pub(crate) fn role(&mut self) -> Result<FormulaRole> {
        let role = self.expect(TokenKind::LowerWord)?.value.into_owned();
        let subrole = if self.next_is(TokenKind::Dash)? {
            self.consume()?;
            Some(self.general_term()?)
        } else {
            None
        };
        Ok(FormulaRole { role, subrole })
    }

    /// The optional `, source [, [info, …]]` tail of an annotated formula.
    pub(crate) fn annotations(&mut self) -> Result<Annotations> {
        if !self.next_is(TokenKind::Comma)? {
            return Ok(None);
        }
        self.consume()?;
        let source = self.general_term()?;
        let info = if self.next_is(TokenKind::Comma)? {
            self.consume()?;
            self.expect(TokenKind::LBracket)?;
            let mut terms = Vec::new();
            if !self.next_is(TokenKind::RBracket)? {
                loop {
                    terms.push(self.general_term()?);
                    if self.next_is(TokenKind::Comma)? {
                        self.consume()?;
                    } else {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RBracket)?;
            Some(terms)
        } else {
            None
        };
        Ok(Some((source, info)))
    }

    /// Interprets a number token as an AST number.
    pub(crate) fn number_of(&self, tok: &Token<'a>) -> Result<Number> {
        number_of_token(tok)
    }

    /// Errors unless the input is fully consumed.
    pub(crate) fn expect_end(&mut self) -> Result<()> {
        match self.safe_peek(0)? {
            None => Ok(()),
            Some(t) => Err(unexpected("end of input", t)),
        }
    }
}

/// `Expected … but read …` at the offending token.
pub(crate) fn unexpected(expected: &str, tok: &Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        expected: expected.to_string(),
        found: tok.describe(),
        line: tok.pos.line as i64,
        column: tok.pos.column as i64,
    }
}

pub(crate) fn kind_list(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(",")
}

fn comment_of(token: &Token<'_>) -> Comment {
    let (format, kind) = match token.kind {
        TokenKind::LineComment => (CommentFormat::Line, CommentKind::Normal),
        TokenKind::DefinedLineComment => (CommentFormat::Line, CommentKind::Defined),
        TokenKind::SystemLineComment => (CommentFormat::Line, CommentKind::System),
        TokenKind::BlockComment => (CommentFormat::Block, CommentKind::Normal),
        TokenKind::DefinedBlockComment => (CommentFormat::Block, CommentKind::Defined),
        TokenKind::SystemBlockComment => (CommentFormat::Block, CommentKind::System),
        other => unreachable!("not a comment token: {other:?}"),
    };
    Comment {
        format,
        kind,
        text: token.value.to_string(),
    }
}

fn number_of_token(tok: &Token<'_>) -> Result<Number> {
    let malformed = |what: &str| ParseError::malformed(format!("Malformed {what} literal"), tok.pos);
    let text = tok.value.as_ref();
    match tok.kind {
        TokenKind::Int => {
            let value = text.parse().map_err(|_| malformed("integer"))?;
            Ok(Number::Integer(value))
        }
        TokenKind::Rational => {
            let (numerator, denominator) =
                text.split_once('/').ok_or_else(|| malformed("rational"))?;
            Ok(Number::Rational(
                numerator.parse().map_err(|_| malformed("rational"))?,
                denominator.parse().map_err(|_| malformed("rational"))?,
            ))
        }
        TokenKind::Real => {
            let (mantissa, exponent) = match text.find(['e', 'E']) {
                Some(i) => {
                    let exp = text[i + 1..].parse().map_err(|_| malformed("real"))?;
                    (&text[..i], exp)
                }
                None => (text, num_bigint::BigInt::from(1)),
            };
            let (whole, decimal) = match mantissa.find('.') {
                Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
                None => (mantissa, "0"),
            };
            // A redundant plus sign is dropped; a minus stays, even on a
            // zero whole part.
            let whole = whole.strip_prefix('+').unwrap_or(whole);
            Ok(Number::Real {
                whole: whole.to_string(),
                decimal: decimal.to_string(),
                exponent,
            })
        }
        other => Err(ParseError::malformed(
            format!("Expected a number token but found {other}"),
            tok.pos,
        )),
    }
}
