//! tptp-lex - Tokenizer for the TPTP input languages.
//!
//! This crate turns TPTP source text into a stream of [`Token`]s. The
//! tokenizer is a hand-written character transducer over a [`Cursor`]:
//! one dispatch on the first character of every token, with specialized
//! routines for words, numbers, quoted atoms, comments, and the operator
//! vocabulary (including the multi-character connectives such as `<=>`,
//! `~&`, `@@+`, `-->`).
//!
//! Two behaviors distinguish it from a generic lexer:
//!
//! - **Comments are tokens, sometimes.** A `%` line comment or `/* */`
//!   block comment is emitted as a token only when nothing but whitespace
//!   precedes it on its line; inline occurrences are consumed silently.
//!   A `/` not followed by `*` is the `Slash` token (needed for the
//!   non-classical `/.\` operator).
//! - **Positions are part of the contract.** Every token carries the
//!   1-based line/column of its first character, and every lexical error
//!   points at the first offending character.
//!
//! The lexer is driven pull-style via [`Lexer::next_token`] or as an
//! iterator of `Result<Token, ParseError>`.

pub mod cursor;
mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod edge_cases;
