//! SyntaxKind enum: every token and node kind in the tree.
//!
//! Only reserved words get keyword token kinds. Soft keywords such as
//! `declare` or `readonly` are scanned as `Identifier` and classified
//! separately, see [`crate::keyword::ContextualKeyword`].

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,

    // Template parts
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Names
    Identifier,
    PrivateIdentifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================

    // Names
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,

    // Type members
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    GetAccessorSignature,
    SetAccessorSignature,

    // Types
    KeywordType,
    TypePredicate,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    OptionalType,
    RestType,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    ThisType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,
    NamedTupleMember,
    TemplateLiteralType,
    TemplateLiteralTypeSpan,
    ImportType,
    ExpressionWithTypeArguments,

    // Binding patterns
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    TaggedTemplateExpression,
    TypeAssertionExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TemplateExpression,
    TemplateSpan,
    SpreadElement,
    ClassExpression,
    OmittedExpression,
    AsExpression,
    SatisfiesExpression,
    NonNullExpression,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,

    // Statements
    Block,
    EmptyStatement,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    ExpressionStatement,
    IfStatement,
    ReturnStatement,
    ThrowStatement,

    // Declarations
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    EnumMember,
    ModuleDeclaration,
    ModuleBlock,
    HeritageClause,
    ImportEqualsDeclaration,
    ExternalModuleReference,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ExportAssignment,
    ExportDeclaration,
    NamedExports,
    NamespaceExport,
    ExportSpecifier,
    NamespaceExportDeclaration,

    // Class elements
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    ClassStaticBlockDeclaration,
    SemicolonClassElement,

    SourceFile,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::QualifiedName;

    /// Look up the token kind of a reserved word.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "catch" => SyntaxKind::CatchKeyword,
            "class" => SyntaxKind::ClassKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "debugger" => SyntaxKind::DebuggerKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "delete" => SyntaxKind::DeleteKeyword,
            "do" => SyntaxKind::DoKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "export" => SyntaxKind::ExportKeyword,
            "extends" => SyntaxKind::ExtendsKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "finally" => SyntaxKind::FinallyKeyword,
            "for" => SyntaxKind::ForKeyword,
            "function" => SyntaxKind::FunctionKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "in" => SyntaxKind::InKeyword,
            "instanceof" => SyntaxKind::InstanceOfKeyword,
            "new" => SyntaxKind::NewKeyword,
            "null" => SyntaxKind::NullKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "super" => SyntaxKind::SuperKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "this" => SyntaxKind::ThisKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "try" => SyntaxKind::TryKeyword,
            "typeof" => SyntaxKind::TypeOfKeyword,
            "var" => SyntaxKind::VarKeyword,
            "void" => SyntaxKind::VoidKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "with" => SyntaxKind::WithKeyword,
            _ => return None,
        };
        Some(kind)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self >= Self::FIRST_PUNCTUATION && self <= Self::LAST_PUNCTUATION
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self >= Self::FIRST_ASSIGNMENT && self <= Self::LAST_ASSIGNMENT
    }

    #[inline]
    pub fn is_token(self) -> bool {
        self < Self::FIRST_NODE
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self >= Self::FIRST_NODE
    }

    /// Identifiers and every reserved word: anything usable as a property name
    /// after `.` or inside an object literal.
    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::RegularExpressionLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
        )
    }

    pub fn is_template_part(self) -> bool {
        matches!(
            self,
            SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail
        )
    }

    /// Whether this token may start a property name (`foo`, `"foo"`, `1`, `[k]`, `#p`).
    pub fn is_literal_property_name_start(self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::PrivateIdentifier
            )
    }

    pub fn is_type_node(self) -> bool {
        self >= SyntaxKind::KeywordType && self <= SyntaxKind::ExpressionWithTypeArguments
    }

    /// Source text of a keyword or punctuation token.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::ClassKeyword => "class",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DebuggerKeyword => "debugger",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeleteKeyword => "delete",
            SyntaxKind::DoKeyword => "do",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::ExportKeyword => "export",
            SyntaxKind::ExtendsKeyword => "extends",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FunctionKeyword => "function",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::InstanceOfKeyword => "instanceof",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SuperKeyword => "super",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::ThisKeyword => "this",
            SyntaxKind::ThrowKeyword => "throw",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::TryKeyword => "try",
            SyntaxKind::TypeOfKeyword => "typeof",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::VoidKeyword => "void",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::WithKeyword => "with",
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(SyntaxKind::from_keyword("typeof"), Some(SyntaxKind::TypeOfKeyword));
        assert_eq!(SyntaxKind::from_keyword("in"), Some(SyntaxKind::InKeyword));
        assert_eq!(SyntaxKind::from_keyword("declare"), None);
        assert_eq!(SyntaxKind::from_keyword("enum"), None);
    }

    #[test]
    fn test_keyword_text_matches_lookup() {
        for kind in [SyntaxKind::BreakKeyword, SyntaxKind::InstanceOfKeyword, SyntaxKind::WithKeyword] {
            let text = kind.text().unwrap();
            assert_eq!(SyntaxKind::from_keyword(text), Some(kind));
            assert!(kind.is_keyword());
        }
    }

    #[test]
    fn test_ranges() {
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
        assert!(SyntaxKind::CommaToken.is_punctuation());
        assert!(SyntaxKind::MappedType.is_type_node());
        assert!(!SyntaxKind::Block.is_type_node());
        assert!(SyntaxKind::SourceFile.is_node());
        assert!(SyntaxKind::Identifier.is_token());
    }
}
