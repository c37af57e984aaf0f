//! Quoted atom lexing: single-quoted atomic words and double-quoted
//! distinct objects.
//!
//! The two forms differ in what the token payload keeps. Single-quoted
//! atoms are identified by their content, so the quotes are stripped and
//! the `\'`/`\\` escapes resolved. Distinct objects are identified by
//! their literal spelling, so the payload retains the quotes and escapes
//! verbatim.

use tptp_util::{ParseError, Position, Result};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a single-quoted atom. Empty and unterminated atoms are lex
    /// errors, as is any escape other than `\'` and `\\`.
    pub(crate) fn lex_single_quoted(&mut self, pos: Position) -> Result<Token<'a>> {
        self.cursor.advance();
        let mut value = String::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(ParseError::malformed("Unclosed single-quoted atom", pos));
            }
            match self.cursor.current_char() {
                '\'' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    let escaped = self.cursor.peek_char(1);
                    if escaped != '\'' && escaped != '\\' {
                        return Err(ParseError::malformed(
                            format!("Invalid escape '\\{escaped}' in single-quoted atom"),
                            self.cursor.pos(),
                        ));
                    }
                    self.cursor.advance();
                    self.cursor.advance();
                    value.push(escaped);
                }
                c if c.is_control() => {
                    return Err(ParseError::malformed(
                        "Control character in single-quoted atom",
                        self.cursor.pos(),
                    ));
                }
                c => {
                    value.push(c);
                    self.cursor.advance();
                }
            }
        }
        if value.is_empty() {
            return Err(ParseError::malformed("Empty single-quoted atom", pos));
        }
        Ok(Token::new(TokenKind::SingleQuoted, value, pos))
    }

    /// Lexes a double-quoted distinct object. The payload is the raw
    /// lexeme including the outer quotes.
    pub(crate) fn lex_double_quoted(&mut self, pos: Position) -> Result<Token<'a>> {
        let start = self.cursor.position();
        self.cursor.advance();
        loop {
            if self.cursor.is_at_end() {
                return Err(ParseError::malformed("Unclosed distinct object", pos));
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    let escaped = self.cursor.peek_char(1);
                    if escaped != '"' && escaped != '\\' {
                        return Err(ParseError::malformed(
                            format!("Invalid escape '\\{escaped}' in distinct object"),
                            self.cursor.pos(),
                        ));
                    }
                    self.cursor.advance();
                    self.cursor.advance();
                }
                c if c.is_control() => {
                    return Err(ParseError::malformed(
                        "Control character in distinct object",
                        self.cursor.pos(),
                    ));
                }
                _ => self.cursor.advance(),
            }
        }
        Ok(Token::new(
            TokenKind::DoubleQuoted,
            self.cursor.slice_from(start),
            pos,
        ))
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
    fn single_quoted_strips_quotes_and_escapes() {
        assert_eq!(lex_one("'abc'"), (TokenKind::SingleQuoted, "abc".into()));
        assert_eq!(
            lex_one("'a b c'"),
            (TokenKind::SingleQuoted, "a b c".into())
        );
        assert_eq!(
            lex_one(r"'it\'s \\ here'"),
            (TokenKind::SingleQuoted, r"it's \ here".into())
        );
    }

    #[test]
    fn double_quoted_retains_quotes_and_escapes() {
        assert_eq!(
            lex_one("\"cat\""),
            (TokenKind::DoubleQuoted, "\"cat\"".into())
        );
        assert_eq!(
            lex_one(r#""a\"b""#),
            (TokenKind::DoubleQuoted, r#""a\"b""#.into())
        );
    }

    #[test]
    fn empty_single_quoted_is_an_error() {
        let err = Lexer::new("''").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Empty single-quoted atom");
    }

    #[test]
    fn unterminated_quotes_are_errors() {
        let err = Lexer::new("'abc").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Unclosed single-quoted atom");
        let err = Lexer::new("\"abc").next_token().unwrap_err();
        assert_eq!(err.to_string(), "Unclosed distinct object");
    }

    #[test]
    fn bad_escape_is_an_error() {
        let err = Lexer::new(r"'a\nb'").next_token().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid escape '\\n' in single-quoted atom"
        );
    }
}
