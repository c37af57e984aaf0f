//! Operator and punctuation lexing.
//!
//! Handles the reserved punctuation and the derived multi-character
//! connectives. Longest match wins: `<=>` before `<=` before `<`, `!=`
//! before `!`, `@@+` before `@@`, and so on. `-->` is recognized here;
//! a `-` directly followed by a digit never reaches this module (the
//! dispatcher routes it to the number lexer).

use tptp_util::{Position, Result};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a punctuation or operator token.
    pub(crate) fn lex_operator(&mut self, pos: Position) -> Result<Token<'a>> {
        use TokenKind::*;

        let start = self.cursor.position();
        let c = self.cursor.current_char();
        self.cursor.advance();

        let kind = match c {
            '(' => LParen,
            ')' => RParen,
            '[' => LBracket,
            ']' => RBracket,
            '{' => LBrace,
            '}' => RBrace,
            ',' => Comma,
            '.' => Dot,
            '*' => Star,
            '+' => Plus,
            '>' => RAngle,
            '^' => Lambda,
            '|' => Or,
            '&' => And,
            '/' => Slash,
            '\\' => Backslash,
            '#' => Hash,
            ':' => {
                if self.cursor.match_char('=') {
                    Assignment
                } else {
                    Colon
                }
            }
            '~' => {
                if self.cursor.match_char('|') {
                    Nor
                } else if self.cursor.match_char('&') {
                    Nand
                } else {
                    Tilde
                }
            }
            '!' => {
                if self.cursor.match_char('=') {
                    NotEquals
                } else if self.cursor.match_char('!') {
                    ForallComb
                } else if self.cursor.match_char('>') {
                    TyForall
                } else {
                    Forall
                }
            }
            '?' => {
                if self.cursor.match_char('?') {
                    ExistsComb
                } else if self.cursor.match_char('*') {
                    TyExists
                } else {
                    Exists
                }
            }
            '@' => {
                if self.cursor.match_char('@') {
                    if self.cursor.match_char('+') {
                        ChoiceComb
                    } else if self.cursor.match_char('-') {
                        DescriptionComb
                    } else {
                        return Err(self.unrecognized("@@", pos));
                    }
                } else if self.cursor.match_char('+') {
                    Choice
                } else if self.cursor.match_char('-') {
                    Description
                } else if self.cursor.match_char('=') {
                    EqComb
                } else {
                    App
                }
            }
            '=' => {
                if self.cursor.match_char('=') {
                    Identity
                } else if self.cursor.match_char('>') {
                    Impl
                } else {
                    Equals
                }
            }
            '<' => {
                if self.cursor.match_char('=') {
                    if self.cursor.match_char('>') {
                        Iff
                    } else {
                        If
                    }
                } else if self.cursor.match_char('~') {
                    if self.cursor.match_char('>') {
                        Niff
                    } else {
                        return Err(self.unrecognized("<~", pos));
                    }
                } else if self.cursor.match_char('<') {
                    Subtype
                } else {
                    LAngle
                }
            }
            '-' => {
                if self.cursor.current_char() == '-' && self.cursor.peek_char(1) == '>' {
                    self.cursor.advance_n(2);
                    SequentArrow
                } else {
                    Dash
                }
            }
            other => return Err(self.unrecognized(other.to_string(), pos)),
        };

        Ok(Token::new(kind, self.cursor.slice_from(start), pos))
    }
}
