//! Scope bookkeeping for declared names.
//!
//! Tracks which binding kinds each scope has seen for a name and rejects
//! redeclarations that cannot merge. Changes made while a speculative parse
//! is open are journaled so a rollback can undo them.

use rustc_hash::FxHashMap;
use typegram_core::intern::{InternedString, StringInterner};
use typegram_core::text::TextSpan;

/// What a declaration binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `var`, hoisted to the nearest function, module or file scope.
    Var,
    /// `let` and `const`.
    Lexical,
    Function,
    Class,
    TypeAlias,
    Interface,
    Enum,
    ConstEnum,
    Namespace,
    Import,
}

impl BindingKind {
    /// Whether two declarations of the same name may coexist in one scope.
    pub fn merges_with(self, other: BindingKind) -> bool {
        merges_one_way(self, other) || merges_one_way(other, self)
    }
}

fn merges_one_way(a: BindingKind, b: BindingKind) -> bool {
    use BindingKind::*;
    matches!(
        (a, b),
        (Var, Var)
            | (Var, TypeAlias)
            | (Var, Interface)
            | (Lexical, TypeAlias)
            | (Lexical, Interface)
            | (Function, Function)
            | (Function, TypeAlias)
            | (Function, Interface)
            | (Function, Namespace)
            | (Class, Interface)
            | (Class, Namespace)
            | (TypeAlias, Namespace)
            | (Interface, Interface)
            | (Interface, Namespace)
            | (Enum, Enum)
            | (Enum, Namespace)
            | (ConstEnum, ConstEnum)
            | (Namespace, Namespace)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    File,
    Module,
    Function,
    Block,
}

#[derive(Debug, Clone)]
struct Binding {
    kinds: Vec<BindingKind>,
    span: TextSpan,
}

#[derive(Debug, Clone)]
struct Scope {
    kind: ScopeKind,
    bindings: FxHashMap<InternedString, Binding>,
}

#[derive(Debug)]
enum Undo {
    Declared { scope: usize, name: InternedString, previous: Option<Binding> },
    Entered,
    Exited(Scope),
}

/// A conflicting earlier declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingConflict {
    pub existing: BindingKind,
    pub existing_span: TextSpan,
}

/// Position in the undo journal, taken when a speculative parse starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeMark {
    journal_len: usize,
}

#[derive(Debug, Default)]
pub struct ScopeTracker {
    interner: StringInterner,
    scopes: Vec<Scope>,
    journal: Vec<Undo>,
    open_marks: u32,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter_scope(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope { kind, bindings: FxHashMap::default() });
        self.record(Undo::Entered);
    }

    pub fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            self.record(Undo::Exited(scope));
        }
    }

    /// Declare `name` in the scope `kind` binds into.
    pub fn declare(&mut self, name: &str, kind: BindingKind, span: TextSpan) -> Result<(), BindingConflict> {
        let Some(index) = self.target_scope(kind) else {
            return Ok(());
        };
        let key = self.interner.intern(name);
        let previous = self.scopes[index].bindings.get(&key).cloned();
        if let Some(existing) = &previous {
            if let Some(&conflict) = existing.kinds.iter().find(|k| !k.merges_with(kind)) {
                return Err(BindingConflict { existing: conflict, existing_span: existing.span });
            }
        }
        self.scopes[index]
            .bindings
            .entry(key)
            .or_insert_with(|| Binding { kinds: Vec::new(), span })
            .kinds
            .push(kind);
        self.record(Undo::Declared { scope: index, name: key, previous });
        Ok(())
    }

    /// The kinds `name` is bound as in the innermost scope that declares it.
    pub fn lookup(&self, name: &str) -> Option<&[BindingKind]> {
        let key = self.interner.get(name)?;
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(&key))
            .map(|binding| binding.kinds.as_slice())
    }

    fn target_scope(&self, kind: BindingKind) -> Option<usize> {
        if kind == BindingKind::Var {
            self.scopes.iter().rposition(|scope| scope.kind != ScopeKind::Block)
        } else {
            self.scopes.len().checked_sub(1)
        }
    }

    fn record(&mut self, undo: Undo) {
        if self.open_marks > 0 {
            self.journal.push(undo);
        }
    }

    /// Start journaling for a speculative parse.
    pub fn mark(&mut self) -> ScopeMark {
        self.open_marks += 1;
        ScopeMark { journal_len: self.journal.len() }
    }

    /// Undo every change made since `mark`.
    pub fn rollback(&mut self, mark: ScopeMark) {
        while self.journal.len() > mark.journal_len {
            match self.journal.pop() {
                Some(Undo::Declared { scope, name, previous }) => {
                    if let Some(target) = self.scopes.get_mut(scope) {
                        match previous {
                            Some(binding) => {
                                target.bindings.insert(name, binding);
                            }
                            None => {
                                target.bindings.remove(&name);
                            }
                        }
                    }
                }
                Some(Undo::Entered) => {
                    self.scopes.pop();
                }
                Some(Undo::Exited(scope)) => self.scopes.push(scope),
                None => break,
            }
        }
        self.release();
    }

    /// Keep the changes made since `mark`.
    pub fn commit(&mut self, _mark: ScopeMark) {
        self.release();
    }

    fn release(&mut self) {
        self.open_marks = self.open_marks.saturating_sub(1);
        if self.open_marks == 0 {
            self.journal.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: u32) -> TextSpan {
        TextSpan::new(start, 1)
    }

    #[test]
    fn test_mergeable_declarations() {
        let mut scopes = ScopeTracker::new();
        scopes.enter_scope(ScopeKind::File);
        assert!(scopes.declare("Foo", BindingKind::Interface, span(0)).is_ok());
        assert!(scopes.declare("Foo", BindingKind::Interface, span(1)).is_ok());
        assert!(scopes.declare("Foo", BindingKind::Class, span(2)).is_ok());
        assert!(scopes.declare("f", BindingKind::Function, span(3)).is_ok());
        assert!(scopes.declare("f", BindingKind::Function, span(4)).is_ok());
        assert!(scopes.declare("f", BindingKind::Namespace, span(5)).is_ok());
        assert_eq!(scopes.lookup("Foo"), Some(&[BindingKind::Interface, BindingKind::Interface, BindingKind::Class][..]));
    }

    #[test]
    fn test_conflicting_declarations() {
        let mut scopes = ScopeTracker::new();
        scopes.enter_scope(ScopeKind::File);
        scopes.declare("x", BindingKind::Lexical, span(0)).unwrap();
        let conflict = scopes.declare("x", BindingKind::Var, span(7)).unwrap_err();
        assert_eq!(conflict.existing, BindingKind::Lexical);
        assert_eq!(conflict.existing_span, span(0));
        scopes.declare("T", BindingKind::TypeAlias, span(1)).unwrap();
        assert!(scopes.declare("T", BindingKind::Interface, span(2)).is_err());
        scopes.declare("E", BindingKind::Enum, span(3)).unwrap();
        assert!(scopes.declare("E", BindingKind::ConstEnum, span(4)).is_err());
    }

    #[test]
    fn test_block_scopes_shadow_and_var_hoists() {
        let mut scopes = ScopeTracker::new();
        scopes.enter_scope(ScopeKind::File);
        scopes.declare("x", BindingKind::Lexical, span(0)).unwrap();
        scopes.enter_scope(ScopeKind::Block);
        assert!(scopes.declare("x", BindingKind::Lexical, span(1)).is_ok());
        // `var` lands in the file scope, where `x` is lexical.
        assert!(scopes.declare("x", BindingKind::Var, span(2)).is_err());
        scopes.exit_scope();
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn test_rollback_restores_bindings_and_scopes() {
        let mut scopes = ScopeTracker::new();
        scopes.enter_scope(ScopeKind::File);
        let mark = scopes.mark();
        scopes.declare("a", BindingKind::Lexical, span(0)).unwrap();
        scopes.enter_scope(ScopeKind::Function);
        scopes.exit_scope();
        scopes.exit_scope();
        scopes.rollback(mark);
        assert_eq!(scopes.depth(), 1);
        assert!(scopes.lookup("a").is_none());
        assert!(scopes.declare("a", BindingKind::Var, span(1)).is_ok());
    }

    #[test]
    fn test_nested_marks() {
        let mut scopes = ScopeTracker::new();
        scopes.enter_scope(ScopeKind::File);
        let outer = scopes.mark();
        scopes.declare("a", BindingKind::Lexical, span(0)).unwrap();
        let inner = scopes.mark();
        scopes.declare("b", BindingKind::Lexical, span(1)).unwrap();
        scopes.rollback(inner);
        assert!(scopes.lookup("a").is_some());
        assert!(scopes.lookup("b").is_none());
        scopes.commit(outer);
        assert!(scopes.lookup("a").is_some());
    }
}
