//! The lexer implementation, split by token family.
//!
//! `core` owns the dispatch loop; the sibling modules hold the specialized
//! routines for comments, words, numbers, quoted atoms, and operators.

mod comment;
mod core;
mod number;
mod operator;
mod quoted;
mod word;

pub use self::core::Lexer;
