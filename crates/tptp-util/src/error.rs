//! The parse error type.
//!
//! There is exactly one error kind in this workspace: a `ParseError` with a
//! human-readable message and the 1-based position of the offending token.
//! There is no recovery; the first error aborts the parse.

use thiserror::Error;

use crate::span::Position;

/// Result type alias used throughout the lexer and parser.
pub type Result<T> = std::result::Result<T, ParseError>;

/// An error raised while tokenizing or parsing TPTP input.
///
/// `line` and `column` are 1-based; `(-1, -1)` marks errors on empty input
/// where no token was ever consumed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A character no token can start with, or a malformed literal start.
    #[error("Unrecognized token '{found}'")]
    UnrecognizedToken {
        found: String,
        line: i64,
        column: i64,
    },

    /// An unterminated or otherwise invalid literal or comment, or a
    /// grammar constraint violation (e.g. a quantified formula where a
    /// unitary term is required).
    #[error("{message}")]
    Malformed {
        message: String,
        line: i64,
        column: i64,
    },

    /// A well-formed token in a position where a different one is required.
    #[error("Expected {expected} but read {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: i64,
        column: i64,
    },

    /// The input ended while a production still needed tokens. Carries the
    /// position of the last successfully consumed token.
    #[error("Unexpected end of input when {expected} was expected")]
    UnexpectedEof {
        expected: String,
        line: i64,
        column: i64,
    },
}

impl ParseError {
    /// Shorthand for [`ParseError::UnrecognizedToken`] at a position.
    pub fn unrecognized(found: impl Into<String>, pos: Position) -> Self {
        ParseError::UnrecognizedToken {
            found: found.into(),
            line: pos.line as i64,
            column: pos.column as i64,
        }
    }

    /// Shorthand for [`ParseError::Malformed`] at a position.
    pub fn malformed(message: impl Into<String>, pos: Position) -> Self {
        ParseError::Malformed {
            message: message.into(),
            line: pos.line as i64,
            column: pos.column as i64,
        }
    }

    /// The 1-based line of the offending token, or -1 for empty input.
    pub fn line(&self) -> i64 {
        match self {
            ParseError::UnrecognizedToken { line, .. }
            | ParseError::Malformed { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEof { line, .. } => *line,
        }
    }

    /// The 1-based column of the offending token, or -1 for empty input.
    pub fn column(&self) -> i64 {
        match self {
            ParseError::UnrecognizedToken { column, .. }
            | ParseError::Malformed { column, .. }
            | ParseError::UnexpectedToken { column, .. }
            | ParseError::UnexpectedEof { column, .. } => *column,
        }
    }
}
