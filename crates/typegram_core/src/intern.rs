//! String interning for declared names.
//!
//! The scope tracker keys its binding tables by interned names so that
//! redeclaration checks compare integers instead of strings.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// A lightweight handle to an interned string.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner. Cloning shares the underlying table.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self { rodeo: Arc::new(ThreadedRodeo::new()) }
    }

    /// Intern a string, returning the existing handle when already present.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Look up a string without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let interner = StringInterner::new();
        let a = interner.intern("Foo");
        let b = interner.intern("Foo");
        let c = interner.intern("Bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(c), "Bar");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_get_does_not_intern() {
        let interner = StringInterner::new();
        assert!(interner.get("ns").is_none());
        assert!(interner.is_empty());
        let ns = interner.intern("ns");
        assert_eq!(interner.get("ns"), Some(ns));
    }

    #[test]
    fn test_clones_share_table() {
        let interner = StringInterner::new();
        let shared = interner.clone();
        let key = interner.intern("shared");
        assert_eq!(shared.get("shared"), Some(key));
    }
}
