//! Soft keywords, modifiers and keyword type names.
//!
//! None of these words are reserved. The scanner produces them as plain
//! identifiers and tags each unescaped occurrence with its
//! [`ContextualKeyword`]; the parser decides at each call site whether the
//! word acts as a keyword there.

use crate::types::ModifierFlags;
use std::fmt;

macro_rules! word_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $text:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn text(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }

            pub fn classify(word: &str) -> Option<$name> {
                match word {
                    $($text => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.text())
            }
        }
    };
}

word_enum! {
    /// A word that acts as a keyword only in specific grammatical positions.
    pub enum ContextualKeyword {
        Abstract => "abstract",
        Accessor => "accessor",
        As => "as",
        Asserts => "asserts",
        Constructor => "constructor",
        Declare => "declare",
        Enum => "enum",
        From => "from",
        Get => "get",
        Global => "global",
        Implements => "implements",
        Infer => "infer",
        Interface => "interface",
        Intrinsic => "intrinsic",
        Is => "is",
        KeyOf => "keyof",
        Let => "let",
        Module => "module",
        Namespace => "namespace",
        Of => "of",
        Out => "out",
        Override => "override",
        Private => "private",
        Protected => "protected",
        Public => "public",
        Readonly => "readonly",
        Require => "require",
        Satisfies => "satisfies",
        Set => "set",
        Static => "static",
        Type => "type",
        Unique => "unique",
    }
}

word_enum! {
    /// A modifier word accepted by the modifier parser.
    ///
    /// `in` and `const` are reserved words; the rest are contextual.
    pub enum Modifier {
        Public => "public",
        Private => "private",
        Protected => "protected",
        Static => "static",
        Readonly => "readonly",
        Abstract => "abstract",
        Override => "override",
        Declare => "declare",
        Accessor => "accessor",
        In => "in",
        Out => "out",
        Const => "const",
    }
}

impl Modifier {
    pub const ACCESSIBILITY: &'static [Modifier] =
        &[Modifier::Public, Modifier::Private, Modifier::Protected];

    pub fn flag(self) -> ModifierFlags {
        match self {
            Modifier::Public => ModifierFlags::PUBLIC,
            Modifier::Private => ModifierFlags::PRIVATE,
            Modifier::Protected => ModifierFlags::PROTECTED,
            Modifier::Static => ModifierFlags::STATIC,
            Modifier::Readonly => ModifierFlags::READONLY,
            Modifier::Abstract => ModifierFlags::ABSTRACT,
            Modifier::Override => ModifierFlags::OVERRIDE,
            Modifier::Declare => ModifierFlags::AMBIENT,
            Modifier::Accessor => ModifierFlags::ACCESSOR,
            Modifier::In => ModifierFlags::IN,
            Modifier::Out => ModifierFlags::OUT,
            Modifier::Const => ModifierFlags::CONST,
        }
    }

    #[inline]
    pub fn is_accessibility(self) -> bool {
        matches!(self, Modifier::Public | Modifier::Private | Modifier::Protected)
    }
}

word_enum! {
    /// A predefined type name such as `string` or `never`.
    ///
    /// `void` and `null` are reserved words and arrive as keyword tokens; the
    /// rest are identifiers recognized only in type position.
    pub enum KeywordTypeKind {
        Any => "any",
        Unknown => "unknown",
        Number => "number",
        BigInt => "bigint",
        Boolean => "boolean",
        String => "string",
        Symbol => "symbol",
        Object => "object",
        Never => "never",
        Undefined => "undefined",
        Null => "null",
        Void => "void",
        Intrinsic => "intrinsic",
    }
}

impl KeywordTypeKind {
    /// Identifier words that name a keyword type in any type position.
    /// `intrinsic` is only special on the right-hand side of a type alias.
    pub fn from_type_name(word: &str) -> Option<KeywordTypeKind> {
        match KeywordTypeKind::classify(word)? {
            KeywordTypeKind::Intrinsic | KeywordTypeKind::Null | KeywordTypeKind::Void => None,
            kind => Some(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_round_trips_text() {
        for kw in ContextualKeyword::ALL {
            assert_eq!(ContextualKeyword::classify(kw.text()), Some(*kw));
        }
        assert_eq!(ContextualKeyword::classify("interfaceX"), None);
        assert_eq!(ContextualKeyword::classify("Declare"), None);
    }

    #[test]
    fn test_modifier_flags_are_distinct() {
        let mut seen = ModifierFlags::NONE;
        for modifier in Modifier::ALL {
            assert!(!seen.intersects(modifier.flag()), "{modifier} shares a flag");
            seen |= modifier.flag();
        }
        assert!(Modifier::Protected.is_accessibility());
        assert!(!Modifier::Static.is_accessibility());
    }

    #[test]
    fn test_keyword_type_names() {
        assert_eq!(KeywordTypeKind::from_type_name("never"), Some(KeywordTypeKind::Never));
        assert_eq!(KeywordTypeKind::from_type_name("intrinsic"), None);
        assert_eq!(KeywordTypeKind::from_type_name("void"), None);
        assert_eq!(KeywordTypeKind::from_type_name("Number"), None);
    }
}
