//! Flag sets carried by tokens and nodes.

bitflags::bitflags! {
    /// Flags for nodes and for the parser's context.
    ///
    /// The `*_CONTEXT` bits describe where the parser currently is; they are
    /// copied onto every node finished while they are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        const LET                           = 1 << 0;
        const CONST                         = 1 << 1;
        const NESTED_NAMESPACE              = 1 << 2;
        const NAMESPACE                     = 1 << 3;
        const GLOBAL_AUGMENTATION           = 1 << 4;
        const OPTIONAL_CHAIN                = 1 << 5;
        const EXPORT_CONTEXT                = 1 << 6;
        /// The node sits inside a `declare` region or an ambient module.
        const AMBIENT                       = 1 << 7;
        const TYPE_CONTEXT                  = 1 << 8;
        const DISALLOW_CONDITIONAL_TYPES_CONTEXT = 1 << 9;
        const FUNCTION_CONTEXT              = 1 << 10;
        const CLASS_CONTEXT                 = 1 << 11;
        const DISALLOW_IN_CONTEXT           = 1 << 12;
        /// The node produced a recoverable diagnostic.
        const THIS_NODE_HAS_ERROR           = 1 << 13;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();

        const CONTEXT_FLAGS = Self::AMBIENT.bits()
            | Self::TYPE_CONTEXT.bits()
            | Self::DISALLOW_CONDITIONAL_TYPES_CONTEXT.bits()
            | Self::FUNCTION_CONTEXT.bits()
            | Self::CLASS_CONTEXT.bits()
            | Self::DISALLOW_IN_CONTEXT.bits();

        /// Context bits that are recorded on finished nodes.
        const INHERITED_CONTEXT = Self::AMBIENT.bits() | Self::TYPE_CONTEXT.bits();
    }
}

bitflags::bitflags! {
    /// Modifier flags for declarations and members.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const NONE              = 0;
        const EXPORT            = 1 << 0;
        /// An explicit `declare`.
        const AMBIENT           = 1 << 1;
        const PUBLIC            = 1 << 2;
        const PRIVATE           = 1 << 3;
        const PROTECTED         = 1 << 4;
        const STATIC            = 1 << 5;
        const READONLY          = 1 << 6;
        const ACCESSOR          = 1 << 7;
        const ABSTRACT          = 1 << 8;
        const DEFAULT           = 1 << 9;
        const CONST             = 1 << 10;
        const OVERRIDE          = 1 << 11;
        const IN                = 1 << 12;
        const OUT               = 1 << 13;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const PARAMETER_PROPERTY_MODIFIER = Self::ACCESSIBILITY_MODIFIER.bits() | Self::READONLY.bits() | Self::OVERRIDE.bits();
        const EXPORT_DEFAULT = Self::EXPORT.bits() | Self::DEFAULT.bits();
    }
}

bitflags::bitflags! {
    /// Flags the scanner attaches to tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const UNTERMINATED                      = 1 << 1;
        /// The identifier was spelled with a `\u` escape. Escaped words never
        /// act as keywords.
        const UNICODE_ESCAPE                    = 1 << 2;
        const SCIENTIFIC                        = 1 << 3;
        const HEX_SPECIFIER                     = 1 << 4;
        const BINARY_SPECIFIER                  = 1 << 5;
        const OCTAL_SPECIFIER                   = 1 << 6;
        const CONTAINS_SEPARATOR                = 1 << 7;
        const SINGLE_QUOTE                      = 1 << 8;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}
