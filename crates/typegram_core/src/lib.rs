//! typegram_core: Core utilities shared by every typegram crate.
//!
//! Provides source positions, line/column mapping, and string interning.

pub mod intern;
pub mod text;

pub use intern::{InternedString, StringInterner};
pub use text::{LineAndColumn, LineMap, TextPos, TextRange, TextSpan};
