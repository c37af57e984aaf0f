//! tptp-util - Shared foundation for the TPTP parsing crates.
//!
//! This crate holds the pieces every other crate in the workspace needs:
//! source positions and the parse error type. It deliberately has no
//! knowledge of tokens or AST nodes.

pub mod error;
pub mod span;

pub use error::{ParseError, Result};
pub use span::Position;

// Hash collections used across the workspace (meta maps, symbol sets).
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
