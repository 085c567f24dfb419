//! typegram_diagnostics: Diagnostic messages and error reporting.
//!
//! Every grammar violation the parser reports is one of the messages in
//! [`messages`], tagged with a TypeScript-compatible numeric code. A
//! diagnostic is either fatal (it aborts the parse and travels up as a
//! [`ParseError`]) or recoverable (it is attached to the finished tree).

use std::fmt;
use typegram_core::text::TextSpan;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// Whether a diagnostic ends the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The parse stops; no tree is produced.
    Fatal,
    /// The tree is still well-formed and the diagnostic is attached to it.
    Recoverable,
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1005, 2300).
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<String>,
    /// Character span of the offending token or node.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            severity: Severity::Fatal,
        }
    }

    /// Create a diagnostic with file and span info.
    pub fn with_location(
        file: impl Into<String>,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file.into()),
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Attach a span without a file name; the parser fills in the file.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} TS{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A fatal grammar violation. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{diagnostic}")]
pub struct ParseError {
    pub diagnostic: Diagnostic,
}

impl ParseError {
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic: diagnostic.with_severity(Severity::Fatal) }
    }

    pub fn code(&self) -> u32 {
        self.diagnostic.code
    }

    pub fn span(&self) -> Option<TextSpan> {
        self.diagnostic.span
    }
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        ParseError::new(diagnostic)
    }
}

pub type PResult<T> = Result<T, ParseError>;

/// Diagnostics accumulated during a parse.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self { diagnostics: Vec::new() }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop every diagnostic recorded after the first `len`.
    /// Used to discard what a rolled-back speculative parse reported.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file.cmp(&b.file).then_with(|| {
                let a_pos = a.span.map(|s| s.start).unwrap_or(0);
                let b_pos = b.span.map(|s| s.start).unwrap_or(0);
                a_pos.cmp(&b_pos)
            })
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1125, Error, "Hexadecimal digit expected.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1124, Error, "Digit expected.");
    pub const INVALID_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1351, Error, "Invalid Unicode escape sequence.");

    // ========================================================================
    // Grammar errors
    // ========================================================================
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const TRAILING_COMMA_NOT_ALLOWED: DiagnosticMessage = diag!(1009, Error, "Trailing comma not allowed.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token.");
    pub const A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA: DiagnosticMessage = diag!(1013, Error, "A rest parameter or binding pattern may not have a trailing comma.");
    pub const A_REST_PARAMETER_MUST_BE_LAST: DiagnosticMessage = diag!(1014, Error, "A rest parameter must be last in a parameter list.");
    pub const AN_INDEX_SIGNATURE_MUST_HAVE_A_TYPE_ANNOTATION: DiagnosticMessage = diag!(1021, Error, "An index signature must have a type annotation.");
    pub const READONLY_MODIFIER_CAN_ONLY_APPEAR_ON_A_PROPERTY_DECLARATION_OR_INDEX_SIGNATURE: DiagnosticMessage = diag!(1024, Error, "'readonly' modifier can only appear on a property declaration or index signature.");
    pub const ACCESSIBILITY_MODIFIER_ALREADY_SEEN: DiagnosticMessage = diag!(1028, Error, "Accessibility modifier already seen.");
    pub const _0_MODIFIER_MUST_PRECEDE_1_MODIFIER: DiagnosticMessage = diag!(1029, Error, "'{0}' modifier must precede '{1}' modifier.");
    pub const _0_MODIFIER_ALREADY_SEEN: DiagnosticMessage = diag!(1030, Error, "'{0}' modifier already seen.");
    pub const _0_MODIFIER_CANNOT_APPEAR_ON_A_CLASS_ELEMENT: DiagnosticMessage = diag!(1031, Error, "'{0}' modifier cannot appear on a class element.");
    pub const _0_MODIFIER_CANNOT_BE_USED_HERE: DiagnosticMessage = diag!(1042, Error, "'{0}' modifier cannot be used here.");
    pub const _0_MODIFIER_CANNOT_APPEAR_ON_A_TYPE_MEMBER: DiagnosticMessage = diag!(1070, Error, "'{0}' modifier cannot appear on a type member.");
    pub const _0_MODIFIER_CANNOT_APPEAR_ON_AN_INDEX_SIGNATURE: DiagnosticMessage = diag!(1071, Error, "'{0}' modifier cannot appear on an index signature.");
    pub const TYPE_PARAMETERS_CANNOT_APPEAR_ON_A_CONSTRUCTOR_DECLARATION: DiagnosticMessage = diag!(1092, Error, "Type parameters cannot appear on a constructor declaration.");
    pub const AN_ACCESSOR_CANNOT_HAVE_TYPE_PARAMETERS: DiagnosticMessage = diag!(1094, Error, "An accessor cannot have type parameters.");
    pub const _0_LIST_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1097, Error, "'{0}' list cannot be empty.");
    pub const TYPE_PARAMETER_LIST_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1098, Error, "Type parameter list cannot be empty.");
    pub const TYPE_ARGUMENT_LIST_CANNOT_BE_EMPTY: DiagnosticMessage = diag!(1099, Error, "Type argument list cannot be empty.");
    pub const A_RETURN_STATEMENT_CAN_ONLY_BE_USED_WITHIN_A_FUNCTION_BODY: DiagnosticMessage = diag!(1108, Error, "A 'return' statement can only be used within a function body.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1110, Error, "Type expected.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub const STRING_LITERAL_EXPECTED: DiagnosticMessage = diag!(1141, Error, "String literal expected.");
    pub const AN_IMPLEMENTATION_CANNOT_BE_DECLARED_IN_AMBIENT_CONTEXTS: DiagnosticMessage = diag!(1183, Error, "An implementation cannot be declared in ambient contexts.");
    pub const MODIFIERS_CANNOT_APPEAR_HERE: DiagnosticMessage = diag!(1184, Error, "Modifiers cannot appear here.");
    pub const ABSTRACT_MODIFIER_CAN_ONLY_APPEAR_ON_A_CLASS_METHOD_OR_PROPERTY_DECLARATION: DiagnosticMessage = diag!(1242, Error, "'abstract' modifier can only appear on a class, method, or property declaration.");
    pub const _0_MODIFIER_CANNOT_BE_USED_WITH_1_MODIFIER: DiagnosticMessage = diag!(1243, Error, "'{0}' modifier cannot be used with '{1}' modifier.");
    pub const METHOD_0_CANNOT_HAVE_AN_IMPLEMENTATION_BECAUSE_IT_IS_MARKED_ABSTRACT: DiagnosticMessage = diag!(1245, Error, "Method '{0}' cannot have an implementation because it is marked abstract.");
    pub const A_REQUIRED_ELEMENT_CANNOT_FOLLOW_AN_OPTIONAL_ELEMENT: DiagnosticMessage = diag!(1257, Error, "A required element cannot follow an optional element.");
    pub const AN_OPTIONAL_ELEMENT_CANNOT_FOLLOW_A_REST_ELEMENT: DiagnosticMessage = diag!(1266, Error, "An optional element cannot follow a rest element.");
    pub const _0_MODIFIER_CANNOT_APPEAR_ON_A_TYPE_PARAMETER: DiagnosticMessage = diag!(1273, Error, "'{0}' modifier cannot appear on a type parameter.");
    pub const _0_MODIFIER_CAN_ONLY_APPEAR_ON_A_TYPE_PARAMETER_OF_A_CLASS_INTERFACE_OR_TYPE_ALIAS: DiagnosticMessage = diag!(1274, Error, "'{0}' modifier can only appear on a type parameter of a class, interface or type alias.");
    pub const READONLY_TYPE_MODIFIER_IS_ONLY_PERMITTED_ON_ARRAY_AND_TUPLE_LITERAL_TYPES: DiagnosticMessage = diag!(1354, Error, "'readonly' type modifier is only permitted on array and tuple literal types.");
    pub const _0_IS_NOT_ALLOWED_AS_A_VARIABLE_DECLARATION_NAME: DiagnosticMessage = diag!(1389, Error, "'{0}' is not allowed as a variable declaration name.");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1400, Error, "Maximum nesting depth of {0} exceeded.");
    pub const TUPLE_MEMBERS_MUST_ALL_HAVE_NAMES_OR_ALL_NOT_HAVE_NAMES: DiagnosticMessage = diag!(5084, Error, "Tuple members must all have names or all not have names.");
    pub const INVALID_TUPLE_MEMBER_LABEL: DiagnosticMessage = diag!(5085, Error, "A tuple member label must be an identifier.");

    // ========================================================================
    // Binding errors
    // ========================================================================
    pub const DUPLICATE_IDENTIFIER_0: DiagnosticMessage = diag!(2300, Error, "Duplicate identifier '{0}'.");
    pub const A_PARAMETER_PROPERTY_IS_ONLY_ALLOWED_IN_A_CONSTRUCTOR_IMPLEMENTATION: DiagnosticMessage = diag!(2369, Error, "A parameter property is only allowed in a constructor implementation.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("'{0}' modifier must precede '{1}' modifier.", &["static", "readonly"]);
        assert_eq!(msg, "'static' modifier must precede 'readonly' modifier.");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Unexpected token.", &[]);
        assert_eq!(msg, "Unexpected token.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            "test.ts",
            TextSpan::new(10, 5),
            &messages::DUPLICATE_IDENTIFIER_0,
            &["foo"],
        );
        let display = format!("{}", diag);
        assert_eq!(display, "test.ts(10): error TS2300: Duplicate identifier 'foo'.");
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]);
        assert!(diag.file.is_none());
        assert!(diag.span.is_none());
        assert_eq!(diag.code, 1012);
        assert!(diag.is_error());
        assert!(diag.is_fatal());
    }

    #[test]
    fn test_parse_error_forces_fatal() {
        let diag = Diagnostic::new(&messages::TYPE_EXPECTED, &[])
            .with_severity(Severity::Recoverable);
        let err = ParseError::from(diag);
        assert!(err.diagnostic.is_fatal());
        assert_eq!(err.code(), 1110);
        assert_eq!(err.to_string(), "error TS1110: Type expected.");
    }

    #[test]
    fn test_collection_truncate() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]));
        let mark = collection.len();
        collection.add(Diagnostic::new(&messages::TYPE_EXPECTED, &[]));
        collection.add(Diagnostic::new(&messages::IDENTIFIER_EXPECTED, &[]));
        collection.truncate(mark);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.diagnostics()[0].code, 1012);
        assert_eq!(collection.error_count(), 1);
    }

    #[test]
    fn test_collection_sort() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location("b.ts", TextSpan::new(10, 1), &messages::UNEXPECTED_TOKEN, &[]));
        collection.add(Diagnostic::with_location("a.ts", TextSpan::new(5, 1), &messages::IDENTIFIER_EXPECTED, &[]));
        collection.add(Diagnostic::with_location("a.ts", TextSpan::new(1, 1), &messages::TYPE_EXPECTED, &[]));
        collection.sort();
        let codes: Vec<u32> = collection.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![1110, 1003, 1012]);
    }
}
