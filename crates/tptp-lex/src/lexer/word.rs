//! Word lexing: lower words, upper words, dollar and dollar-dollar words.

use tptp_util::{Position, Result};

use crate::token::{Token, TokenKind};
use crate::Lexer;

#[inline]
fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    /// Lexes a lower word: `[a-z][A-Za-z0-9_]*`.
    pub(crate) fn lex_lower_word(&mut self, pos: Position) -> Token<'a> {
        let start = self.cursor.position();
        while is_alphanumeric(self.cursor.current_char()) {
            self.cursor.advance();
        }
        Token::new(TokenKind::LowerWord, self.cursor.slice_from(start), pos)
    }

    /// Lexes an upper word (variable): `[A-Z][A-Za-z0-9_]*`.
    pub(crate) fn lex_upper_word(&mut self, pos: Position) -> Token<'a> {
        let start = self.cursor.position();
        while is_alphanumeric(self.cursor.current_char()) {
            self.cursor.advance();
        }
        Token::new(TokenKind::UpperWord, self.cursor.slice_from(start), pos)
    }

    /// Lexes a dollar word (`$word`) or dollar-dollar word (`$$word`).
    ///
    /// The payload retains the `$`/`$$` prefix; that prefix is part of the
    /// functor's identity.
    pub(crate) fn lex_dollar_word(&mut self, pos: Position) -> Result<Token<'a>> {
        let start = self.cursor.position();
        self.cursor.advance();
        let kind = if self.cursor.current_char() == '$' {
            self.cursor.advance();
            TokenKind::DollarDollarWord
        } else {
            TokenKind::DollarWord
        };
        if !is_alphanumeric(self.cursor.current_char()) {
            return Err(self.unrecognized(self.cursor.slice_from(start), pos));
        }
        while is_alphanumeric(self.cursor.current_char()) {
            self.cursor.advance();
        }
        Ok(Token::new(kind, self.cursor.slice_from(start), pos))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenKind};

    fn lex_one(source: &str) -> (TokenKind, String) {
        let tok = Lexer::new(source).next_token().unwrap().unwrap();
        (tok.kind, tok.value.into_owned())
    }

    #[test]
    fn lower_word() {
        assert_eq!(
            lex_one("king_of_france"),
            (TokenKind::LowerWord, "king_of_france".into())
        );
        assert_eq!(lex_one("p2X"), (TokenKind::LowerWord, "p2X".into()));
    }

    #[test]
    fn upper_word() {
        assert_eq!(lex_one("X"), (TokenKind::UpperWord, "X".into()));
        assert_eq!(lex_one("Xs_1"), (TokenKind::UpperWord, "Xs_1".into()));
    }

    #[test]
    fn dollar_words() {
        assert_eq!(lex_one("$ite"), (TokenKind::DollarWord, "$ite".into()));
        assert_eq!(
            lex_one("$$system"),
            (TokenKind::DollarDollarWord, "$$system".into())
        );
    }

    #[test]
    fn bare_dollar_is_an_error() {
        let err = Lexer::new("$ ").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized token '$'");
        let err = Lexer::new("$$(").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized token '$$'");
    }
}
