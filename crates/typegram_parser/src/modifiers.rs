//! Modifier sequences.
//!
//! A word is only taken as a modifier when the token after it can follow a
//! modifier on the same line; otherwise it is left for the caller as a
//! name (`class C { static: number }`). Ordering and exclusivity are
//! checked as each modifier is accepted.

use typegram_ast::keyword::Modifier;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::ModifierFlags;
use typegram_core::text::TextSpan;
use typegram_diagnostics::{messages, DiagnosticMessage, PResult};

use crate::host::HostGrammar;
use crate::parser::Parser;

/// Modifiers accepted so far, in source order.
#[derive(Debug, Clone, Default)]
pub struct ModifierSet {
    pub flags: ModifierFlags,
    pub entries: Vec<(Modifier, TextSpan)>,
}

impl ModifierSet {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.entries.iter().any(|(m, _)| *m == modifier)
    }

    pub fn span_of(&self, modifier: Modifier) -> Option<TextSpan> {
        self.entries.iter().find(|(m, _)| *m == modifier).map(|(_, span)| *span)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<(Modifier, TextSpan)> {
        self.entries.first().copied()
    }

    fn insert(&mut self, modifier: Modifier, span: TextSpan) {
        self.flags |= modifier.flag();
        self.entries.push((modifier, span));
    }
}

/// Which modifiers a position accepts, which it recognizes only to reject,
/// and the message used for a rejected one.
#[derive(Debug, Clone, Copy)]
pub struct ModifierRules {
    pub allowed: &'static [Modifier],
    pub disallowed: &'static [Modifier],
    pub message: &'static DiagnosticMessage,
}

impl ModifierRules {
    pub const CLASS_MEMBER: ModifierRules = ModifierRules {
        allowed: &[
            Modifier::Public,
            Modifier::Private,
            Modifier::Protected,
            Modifier::Static,
            Modifier::Readonly,
            Modifier::Abstract,
            Modifier::Override,
            Modifier::Declare,
            Modifier::Accessor,
        ],
        disallowed: &[Modifier::In, Modifier::Out, Modifier::Const],
        message: &messages::_0_MODIFIER_CANNOT_APPEAR_ON_A_CLASS_ELEMENT,
    };

    pub const TYPE_MEMBER: ModifierRules = ModifierRules {
        allowed: &[Modifier::Readonly],
        disallowed: &[
            Modifier::Public,
            Modifier::Private,
            Modifier::Protected,
            Modifier::Static,
            Modifier::Abstract,
            Modifier::Override,
            Modifier::Declare,
            Modifier::Accessor,
            Modifier::In,
            Modifier::Out,
            Modifier::Const,
        ],
        message: &messages::_0_MODIFIER_CANNOT_APPEAR_ON_A_TYPE_MEMBER,
    };

    pub const INDEX_SIGNATURE: ModifierRules = ModifierRules {
        allowed: &[Modifier::Static, Modifier::Readonly],
        disallowed: &[
            Modifier::Public,
            Modifier::Private,
            Modifier::Protected,
            Modifier::Abstract,
            Modifier::Override,
            Modifier::Declare,
            Modifier::Accessor,
            Modifier::In,
            Modifier::Out,
            Modifier::Const,
        ],
        message: &messages::_0_MODIFIER_CANNOT_APPEAR_ON_AN_INDEX_SIGNATURE,
    };

    pub const TYPE_PARAMETER: ModifierRules = ModifierRules {
        allowed: &[Modifier::In, Modifier::Out, Modifier::Const],
        disallowed: &[
            Modifier::Public,
            Modifier::Private,
            Modifier::Protected,
            Modifier::Static,
            Modifier::Readonly,
            Modifier::Abstract,
            Modifier::Override,
            Modifier::Declare,
            Modifier::Accessor,
        ],
        message: &messages::_0_MODIFIER_CANNOT_APPEAR_ON_A_TYPE_PARAMETER,
    };

    pub const PARAMETER: ModifierRules = ModifierRules {
        allowed: &[
            Modifier::Public,
            Modifier::Private,
            Modifier::Protected,
            Modifier::Readonly,
            Modifier::Override,
        ],
        disallowed: &[Modifier::Static, Modifier::Declare, Modifier::Abstract, Modifier::Accessor],
        message: &messages::_0_MODIFIER_CANNOT_BE_USED_HERE,
    };

    pub fn recognizes(&self, modifier: Modifier) -> bool {
        self.allowed.contains(&modifier) || self.disallowed.contains(&modifier)
    }
}

/// `(first, second)`: `first` must come before `second`.
const ORDER: &[(Modifier, Modifier)] = &[
    (Modifier::Public, Modifier::Override),
    (Modifier::Public, Modifier::Static),
    (Modifier::Public, Modifier::Readonly),
    (Modifier::Public, Modifier::Abstract),
    (Modifier::Public, Modifier::Accessor),
    (Modifier::Private, Modifier::Override),
    (Modifier::Private, Modifier::Static),
    (Modifier::Private, Modifier::Readonly),
    (Modifier::Private, Modifier::Abstract),
    (Modifier::Private, Modifier::Accessor),
    (Modifier::Protected, Modifier::Override),
    (Modifier::Protected, Modifier::Static),
    (Modifier::Protected, Modifier::Readonly),
    (Modifier::Protected, Modifier::Abstract),
    (Modifier::Protected, Modifier::Accessor),
    (Modifier::Static, Modifier::Readonly),
    (Modifier::Static, Modifier::Override),
    (Modifier::Static, Modifier::Accessor),
    (Modifier::Override, Modifier::Readonly),
    (Modifier::Override, Modifier::Accessor),
    (Modifier::Abstract, Modifier::Override),
    (Modifier::In, Modifier::Out),
];

/// Pairs that cannot appear together in either order.
const EXCLUSIVE: &[(Modifier, Modifier)] = &[
    (Modifier::Declare, Modifier::Override),
    (Modifier::Static, Modifier::Abstract),
];

impl<'a, H: HostGrammar> Parser<'a, H> {
    /// Parse a run of modifiers recognized by `rules`.
    ///
    /// `stop` is consulted before each candidate; when it answers `true` the
    /// candidate is left unparsed (a `static {` block, for instance).
    pub fn parse_modifiers(
        &mut self,
        rules: &ModifierRules,
        stop: Option<fn(&mut Self) -> bool>,
    ) -> PResult<ModifierSet> {
        let mut set = ModifierSet::default();
        while let Some(modifier) = self.modifier_candidate(rules) {
            if stop.is_some_and(|stop| stop(self)) {
                break;
            }
            if !self.look_ahead(|p| p.next_token_can_follow_modifier()) {
                break;
            }
            let span = self.token_span();
            if !rules.allowed.contains(&modifier) {
                return Err(self.error_at(span, rules.message, &[modifier.text()]));
            }
            self.check_modifier_order(&set, modifier, span)?;
            set.insert(modifier, span);
            self.next_token()?;
        }
        Ok(set)
    }

    /// Reject modifiers that `rules` does not allow, for a set parsed under
    /// broader rules.
    pub fn check_modifiers(&self, set: &ModifierSet, rules: &ModifierRules) -> PResult<()> {
        match set.entries.iter().find(|(m, _)| !rules.allowed.contains(m)) {
            Some((modifier, span)) => Err(self.error_at(*span, rules.message, &[modifier.text()])),
            None => Ok(()),
        }
    }

    fn modifier_candidate(&self, rules: &ModifierRules) -> Option<Modifier> {
        let token = self.token();
        let modifier = match token.kind {
            SyntaxKind::InKeyword => Modifier::In,
            SyntaxKind::ConstKeyword => Modifier::Const,
            SyntaxKind::Identifier if !token.is_escaped() => Modifier::classify(&token.value)?,
            _ => return None,
        };
        rules.recognizes(modifier).then_some(modifier)
    }

    fn next_token_can_follow_modifier(&mut self) -> PResult<bool> {
        self.next_token()?;
        if self.has_preceding_line_break() {
            return Ok(false);
        }
        Ok(matches!(
            self.kind(),
            SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken
        ) || self.kind().is_literal_property_name_start())
    }

    fn check_modifier_order(&self, set: &ModifierSet, modifier: Modifier, span: TextSpan) -> PResult<()> {
        if set.has(modifier) {
            return Err(self.error_at(span, &messages::_0_MODIFIER_ALREADY_SEEN, &[modifier.text()]));
        }
        if modifier.is_accessibility() && set.flags.intersects(ModifierFlags::ACCESSIBILITY_MODIFIER) {
            return Err(self.error_at(span, &messages::ACCESSIBILITY_MODIFIER_ALREADY_SEEN, &[]));
        }
        if let Some((_, after)) = ORDER.iter().find(|(first, second)| *first == modifier && set.has(*second)) {
            return Err(self.error_at(
                span,
                &messages::_0_MODIFIER_MUST_PRECEDE_1_MODIFIER,
                &[modifier.text(), after.text()],
            ));
        }
        let conflict = EXCLUSIVE.iter().find_map(|&(a, b)| {
            if a == modifier && set.has(b) {
                Some(b)
            } else if b == modifier && set.has(a) {
                Some(a)
            } else {
                None
            }
        });
        if let Some(existing) = conflict {
            return Err(self.error_at(
                span,
                &messages::_0_MODIFIER_CANNOT_BE_USED_WITH_1_MODIFIER,
                &[modifier.text(), existing.text()],
            ));
        }
        Ok(())
    }
}
