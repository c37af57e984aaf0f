//! Comment lexing.
//!
//! TPTP comments come in two shapes and three kinds. Shape: `%` line
//! comments and `/* */` block comments. Kind: normal, defined (the marker
//! is followed by `$`), and system (`$$`). The payload excludes the
//! markers and the kind prefix. The caller decides whether the comment is
//! emitted as a token or discarded; this module only consumes it.

use tptp_util::{ParseError, Position, Result};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a `%` line comment up to (not including) the line break.
    pub(crate) fn lex_line_comment(&mut self, pos: Position) -> Result<Token<'a>> {
        self.cursor.advance();
        let kind = if self.cursor.current_char() == '$' {
            if self.cursor.peek_char(1) == '$' {
                self.cursor.advance_n(2);
                TokenKind::SystemLineComment
            } else {
                self.cursor.advance();
                TokenKind::DefinedLineComment
            }
        } else {
            TokenKind::LineComment
        };
        let start = self.cursor.position();
        while !self.cursor.is_at_end() && !matches!(self.cursor.current_char(), '\n' | '\r') {
            self.cursor.advance();
        }
        Ok(Token::new(kind, self.cursor.slice_from(start), pos))
    }

    /// Lexes a `/* */` block comment. An unterminated block is a lex
    /// error at the opening marker.
    pub(crate) fn lex_block_comment(&mut self, pos: Position) -> Result<Token<'a>> {
        self.cursor.advance_n(2);
        let kind = if self.cursor.current_char() == '$' {
            if self.cursor.peek_char(1) == '$' {
                self.cursor.advance_n(2);
                TokenKind::SystemBlockComment
            } else {
                self.cursor.advance();
                TokenKind::DefinedBlockComment
            }
        } else {
            TokenKind::BlockComment
        };
        let start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                return Err(ParseError::malformed("Unclosed block comment", pos));
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                break;
            }
            self.cursor.advance();
        }
        let value = self.cursor.slice_from(start);
        self.cursor.advance_n(2);
        Ok(Token::new(kind, value, pos))
    }
}
