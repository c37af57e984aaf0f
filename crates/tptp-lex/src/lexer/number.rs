//! Number literal lexing: integers, rationals, reals.
//!
//! Grammar: optional `+`/`-` sign, digits, then at most one of
//! `/digits` (rational), or `.digits` and/or `[eE][+-]?digits` (real).
//! The full lexeme is kept as the token payload; numeric interpretation
//! happens when the AST node is built.

use tptp_util::{ParseError, Position, Result};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a number literal. The dispatcher guarantees the cursor is on
    /// a digit or on a sign directly followed by a digit.
    pub(crate) fn lex_number(&mut self, pos: Position) -> Result<Token<'a>> {
        let start = self.cursor.position();
        if matches!(self.cursor.current_char(), '+' | '-') {
            self.cursor.advance();
        }
        self.eat_digits();

        match self.cursor.current_char() {
            '/' if self.cursor.peek_char(1).is_ascii_digit() => {
                self.cursor.advance();
                let denom_pos = self.cursor.pos();
                let denom_start = self.cursor.position();
                self.eat_digits();
                if self.cursor.slice_from(denom_start).bytes().all(|b| b == b'0') {
                    return Err(ParseError::malformed(
                        "Denominator of rational literal must be greater than zero",
                        denom_pos,
                    ));
                }
                Ok(Token::new(
                    TokenKind::Rational,
                    self.cursor.slice_from(start),
                    pos,
                ))
            }
            '.' if self.cursor.peek_char(1).is_ascii_digit() => {
                self.cursor.advance();
                self.eat_digits();
                self.eat_exponent();
                Ok(Token::new(TokenKind::Real, self.cursor.slice_from(start), pos))
            }
            'e' | 'E' if self.exponent_follows() => {
                self.eat_exponent();
                Ok(Token::new(TokenKind::Real, self.cursor.slice_from(start), pos))
            }
            _ => Ok(Token::new(TokenKind::Int, self.cursor.slice_from(start), pos)),
        }
    }

    fn eat_digits(&mut self) {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
    }

    /// True when the cursor is on `e`/`E` and a (possibly signed) digit
    /// sequence follows, so the marker really opens an exponent.
    fn exponent_follows(&self) -> bool {
        let next = self.cursor.peek_char(1);
        next.is_ascii_digit()
            || (matches!(next, '+' | '-') && self.cursor.peek_char(2).is_ascii_digit())
    }

    fn eat_exponent(&mut self) {
        if matches!(self.cursor.current_char(), 'e' | 'E') && self.exponent_follows() {
            self.cursor.advance();
            if matches!(self.cursor.current_char(), '+' | '-') {
                self.cursor.advance();
            }
            self.eat_digits();
        }
    }
}
