//! typegram_ast: syntax tree definitions for the TypeScript grammar layer.
//!
//! Defines the `SyntaxKind` enum, the arena-allocated node types, the flag
//! sets carried by tokens and nodes, and the contextual keyword tables.

pub mod keyword;
pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

pub use keyword::{ContextualKeyword, KeywordTypeKind, Modifier};
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
