//! typegram_parser: recursive descent parser for a typed superset of a
//! dynamic scripting language.
//!
//! The type grammar sits on top of a host statement and expression grammar.
//! The same character stream is tokenized differently inside type positions,
//! ambiguous prefixes are resolved by speculation, and identifier-led
//! statements are routed to declaration parsers only when the words around
//! them allow it.

mod context;
mod declarations;
mod expressions;
mod host;
mod keywords;
mod lists;
mod modifiers;
mod options;
mod parser;
mod precedence;
mod scope;
mod speculation;
mod statements;
mod types;

use bumpalo::Bump;
use typegram_ast::node::SourceFile;
use typegram_diagnostics::PResult;

pub use declarations::DeclarationStart;
pub use host::{HostGrammar, SourceHost, SourceHostState};
pub use lists::{Bracket, DelimitedList, ListKind, SignatureReturn};
pub use modifiers::{ModifierRules, ModifierSet};
pub use options::ParserOptions;
pub use parser::{Parser, StandaloneType};
pub use precedence::OperatorPrecedence;
pub use scope::{BindingKind, ScopeKind, ScopeTracker};
pub use speculation::ParserState;

/// Parse a whole file into `arena`.
pub fn parse_source_file<'a>(
    arena: &'a Bump,
    file_name: &str,
    source_text: &str,
    options: ParserOptions,
) -> PResult<SourceFile<'a>> {
    Parser::with_options(arena, file_name, source_text, options).parse_source_file()
}
