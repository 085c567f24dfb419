//! typegram_scanner: the tokenizer underneath the type grammar engine.
//!
//! Produces [`Token`]s on demand, keeps the tokenizer context stack that
//! decides how `<` and `>` are read, tags soft keywords, collects comments,
//! and snapshots its full state for speculative parsing.

mod char_codes;
pub mod context;
mod scanner;
mod token;

pub use context::{ContextFrame, ContextStack, FrameKind, TokenOverride};
pub use scanner::{Scanner, ScannerState};
pub use token::Token;
