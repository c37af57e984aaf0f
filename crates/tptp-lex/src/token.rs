//! Token definitions for the TPTP languages.

use std::borrow::Cow;
use std::fmt;

use tptp_util::Position;

/// The kind of a lexical token.
///
/// One variant per terminal of the TPTP grammar, including the six comment
/// variants (normal / defined `$` / system `$$`, each as line or block).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Words
    /// `^[a-z][A-Za-z0-9_]*`
    LowerWord,
    /// `^[A-Z][A-Za-z0-9_]*`
    UpperWord,
    /// `$` followed by alphanumerics, e.g. `$ite`
    DollarWord,
    /// `$$` followed by alphanumerics, e.g. `$$system`
    DollarDollarWord,
    /// `'...'` quoted atom; payload is unquoted with escapes resolved
    SingleQuoted,
    /// `"..."` distinct object; payload retains quotes and escapes
    DoubleQuoted,

    // Numbers
    /// Signed or unsigned integer
    Int,
    /// `numerator/denominator`
    Rational,
    /// Decimal fraction and/or exponent form
    Real,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Colon,

    // Single-character operators
    /// `|`
    Or,
    /// `&`
    And,
    /// `~`
    Tilde,
    /// `!`
    Forall,
    /// `?`
    Exists,
    /// `^`
    Lambda,
    /// `@`
    App,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `>`
    RAngle,
    /// `<`
    LAngle,
    /// `#`
    Hash,
    /// `/`
    Slash,
    /// `\`
    Backslash,
    /// `-`
    Dash,
    /// `=`
    Equals,

    // Multi-character operators
    /// `<=>`
    Iff,
    /// `=>`
    Impl,
    /// `<=`
    If,
    /// `<~>`
    Niff,
    /// `~|`
    Nor,
    /// `~&`
    Nand,
    /// `!=`
    NotEquals,
    /// `!!`
    ForallComb,
    /// `??`
    ExistsComb,
    /// `!>`
    TyForall,
    /// `?*`
    TyExists,
    /// `@+`
    Choice,
    /// `@-`
    Description,
    /// `@@+`
    ChoiceComb,
    /// `@@-`
    DescriptionComb,
    /// `@=`
    EqComb,
    /// `:=`
    Assignment,
    /// `==`
    Identity,
    /// `-->`
    SequentArrow,
    /// `<<`
    Subtype,

    // Comments (only emitted when first on their line)
    LineComment,
    DefinedLineComment,
    SystemLineComment,
    BlockComment,
    DefinedBlockComment,
    SystemBlockComment,
}

impl TokenKind {
    /// True for the six comment kinds.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::LineComment
                | TokenKind::DefinedLineComment
                | TokenKind::SystemLineComment
                | TokenKind::BlockComment
                | TokenKind::DefinedBlockComment
                | TokenKind::SystemBlockComment
        )
    }

    /// The grammar-level name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LowerWord => "LOWERWORD",
            TokenKind::UpperWord => "UPPERWORD",
            TokenKind::DollarWord => "DOLLARWORD",
            TokenKind::DollarDollarWord => "DOLLARDOLLARWORD",
            TokenKind::SingleQuoted => "SINGLEQUOTED",
            TokenKind::DoubleQuoted => "DOUBLEQUOTED",
            TokenKind::Int => "INT",
            TokenKind::Rational => "RATIONAL",
            TokenKind::Real => "REAL",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Tilde => "NOT",
            TokenKind::Forall => "FORALL",
            TokenKind::Exists => "EXISTS",
            TokenKind::Lambda => "LAMBDA",
            TokenKind::App => "APP",
            TokenKind::Star => "STAR",
            TokenKind::Plus => "PLUS",
            TokenKind::RAngle => "RANGLE",
            TokenKind::LAngle => "LANGLE",
            TokenKind::Hash => "HASH",
            TokenKind::Slash => "SLASH",
            TokenKind::Backslash => "BACKSLASH",
            TokenKind::Dash => "DASH",
            TokenKind::Equals => "EQUALS",
            TokenKind::Iff => "IFF",
            TokenKind::Impl => "IMPL",
            TokenKind::If => "IF",
            TokenKind::Niff => "NIFF",
            TokenKind::Nor => "NOR",
            TokenKind::Nand => "NAND",
            TokenKind::NotEquals => "NOTEQUALS",
            TokenKind::ForallComb => "FORALLCOMB",
            TokenKind::ExistsComb => "EXISTSCOMB",
            TokenKind::TyForall => "TYFORALL",
            TokenKind::TyExists => "TYEXISTS",
            TokenKind::Choice => "CHOICE",
            TokenKind::Description => "DESCRIPTION",
            TokenKind::ChoiceComb => "CHOICECOMB",
            TokenKind::DescriptionComb => "DESCRIPTIONCOMB",
            TokenKind::EqComb => "EQCOMB",
            TokenKind::Assignment => "ASSIGNMENT",
            TokenKind::Identity => "IDENTITY",
            TokenKind::SequentArrow => "SEQUENTARROW",
            TokenKind::Subtype => "SUBTYPE",
            TokenKind::LineComment => "LINECOMMENT",
            TokenKind::DefinedLineComment => "DEFINEDLINECOMMENT",
            TokenKind::SystemLineComment => "SYSTEMLINECOMMENT",
            TokenKind::BlockComment => "BLOCKCOMMENT",
            TokenKind::DefinedBlockComment => "DEFINEDBLOCKCOMMENT",
            TokenKind::SystemBlockComment => "SYSTEMBLOCKCOMMENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical token: kind, payload, and the position of its first
/// character.
///
/// The payload borrows the source wherever possible; only tokens whose
/// surface form differs from their value (single-quoted atoms with escape
/// sequences) carry an owned string.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: Cow<'a, str>,
    pub pos: Position,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, value: impl Into<Cow<'a, str>>, pos: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            pos,
        }
    }

    /// True for the six comment kinds.
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Rendering used in `Expected ... but read ...` messages.
    pub fn describe(&self) -> String {
        format!("{} '{}'", self.kind, self.value)
    }
}
