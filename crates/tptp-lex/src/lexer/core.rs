//! Core lexer: the dispatch loop.

use tptp_util::{ParseError, Position, Result};

use crate::cursor::Cursor;
use crate::token::Token;

/// Lexer for the TPTP input languages.
///
/// Transforms source text into a stream of [`Token`]s, pulled one at a
/// time with [`Lexer::next_token`]. Whitespace is discarded; comments are
/// emitted as tokens only when they are the first non-whitespace content
/// on their line, and silently consumed otherwise.
pub struct Lexer<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Line on which the previous token or comment ended. Used to decide
    /// whether a comment is the first content on its line.
    last_content_line: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            last_content_line: 0,
        }
    }

    /// Returns the next token, or `Ok(None)` at the end of input.
    ///
    /// Dispatches on the first character of the token. Any character no
    /// token can start with is a [`ParseError`] at that character.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_at_end() {
                return Ok(None);
            }

            let pos = self.cursor.pos();
            let leading = self.cursor.line() != self.last_content_line;

            let token = match self.cursor.current_char() {
                '%' => {
                    let tok = self.lex_line_comment(pos)?;
                    self.last_content_line = self.cursor.line();
                    if leading {
                        return Ok(Some(tok));
                    }
                    continue;
                }
                '/' if self.cursor.peek_char(1) == '*' => {
                    let tok = self.lex_block_comment(pos)?;
                    self.last_content_line = self.cursor.line();
                    if leading {
                        return Ok(Some(tok));
                    }
                    continue;
                }
                'a'..='z' => self.lex_lower_word(pos),
                'A'..='Z' => self.lex_upper_word(pos),
                '$' => self.lex_dollar_word(pos)?,
                '\'' => self.lex_single_quoted(pos)?,
                '"' => self.lex_double_quoted(pos)?,
                c if c.is_ascii_digit() => self.lex_number(pos)?,
                '+' | '-' if self.cursor.peek_char(1).is_ascii_digit() => self.lex_number(pos)?,
                _ => self.lex_operator(pos)?,
            };

            self.last_content_line = self.cursor.line();
            return Ok(Some(token));
        }
    }

    /// Raises an `Unrecognized token` error at the given position.
    pub(crate) fn unrecognized(&self, found: impl Into<String>, pos: Position) -> ParseError {
        ParseError::unrecognized(found, pos)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenKind};

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .map(|t| t.expect("lex error").kind)
            .collect()
    }

    #[test]
    fn empty_input() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn annotated_formula_shape() {
        use TokenKind::*;
        assert_eq!(
            kinds("fof(f, axiom, p)."),
            vec![LowerWord, LParen, LowerWord, Comma, LowerWord, Comma, LowerWord, RParen, Dot]
        );
    }

    #[test]
    fn positions_are_one_based() {
        let mut lexer = Lexer::new("a\n  b");
        let a = lexer.next_token().unwrap().unwrap();
        assert_eq!((a.pos.line, a.pos.column), (1, 1));
        let b = lexer.next_token().unwrap().unwrap();
        assert_eq!((b.pos.line, b.pos.column), (2, 3));
    }

    #[test]
    fn leading_comment_is_emitted() {
        use TokenKind::*;
        assert_eq!(kinds("% hi\np"), vec![LineComment, LowerWord]);
        assert_eq!(kinds("  % hi\np"), vec![LineComment, LowerWord]);
    }

    #[test]
    fn trailing_comment_is_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("p % hi\nq"), vec![LowerWord, LowerWord]);
        assert_eq!(kinds("p /* hi */ q"), vec![LowerWord, LowerWord]);
    }

    #[test]
    fn slash_without_star_is_a_token() {
        use TokenKind::*;
        assert_eq!(kinds("/ . \\"), vec![Slash, Dot, Backslash]);
    }

    #[test]
    fn unrecognized_character() {
        let mut lexer = Lexer::new("p ; q");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized token ';'");
        assert_eq!((err.line(), err.column()), (1, 3));
    }
}
