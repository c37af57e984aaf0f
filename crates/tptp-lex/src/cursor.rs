//! Character cursor for traversing source text.
//!
//! The `Cursor` struct maintains position state while iterating through
//! source characters. It handles UTF-8 correctly and tracks line/column
//! information for error reporting. Line breaks come in three flavors in
//! TPTP input (`\n`, `\r`, `\r\n`); each counts as exactly one line.

use tptp_util::Position;

/// A cursor for traversing source text character by character.
///
/// The cursor keeps the current byte position in the source string and
/// provides methods for advancing, peeking ahead, and slicing lexemes.
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based, in characters).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current character, or `'\0'` at the end of the source.
    #[inline]
    pub fn current_char(&self) -> char {
        self.peek_char(0)
    }

    /// Returns the character `offset` characters ahead of the cursor
    /// (0 = current), or `'\0'` past the end.
    pub fn peek_char(&self, offset: usize) -> char {
        let mut chars = self.source[self.position..].chars();
        chars.nth(offset).unwrap_or('\0')
    }

    /// Advances the cursor by one character.
    ///
    /// Updates line and column tracking; a `\r\n` pair is consumed in a
    /// single step so it counts as one line break. Does nothing at the end
    /// of the source.
    pub fn advance(&mut self) {
        let Some(c) = self.source[self.position..].chars().next() else {
            return;
        };
        self.position += c.len_utf8();
        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {
                if self.source[self.position..].starts_with('\n') {
                    self.position += 1;
                }
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
    }

    /// Advances the cursor by `count` characters.
    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Returns true if the cursor is at the end of the source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Consumes the expected character if it is the current one.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace characters (including line breaks). Comments are
    /// not whitespace; the lexer handles those itself.
    pub fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Returns the current line number (1-based).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (1-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns the current position as a line/column pair.
    #[inline]
    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns the current byte position in the source.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the source slice from `start` (byte position) up to the
    /// current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }
}
