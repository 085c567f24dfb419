//! Rendering parser diagnostics through miette.

use std::fmt;

use miette::{LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;
use typegram_core::text::TextSpan;
use typegram_diagnostics::{Diagnostic, DiagnosticCategory, Severity};

/// A parser diagnostic attached to its source text.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SyntaxDiagnostic {
    message: String,
    code: String,
    src: NamedSource<String>,
    span: Option<SourceSpan>,
    label: &'static str,
    severity: miette::Severity,
}

impl SyntaxDiagnostic {
    pub fn new(file_name: &str, source_text: &str, diagnostic: &Diagnostic) -> Self {
        let severity = match diagnostic.category {
            DiagnosticCategory::Error => miette::Severity::Error,
            DiagnosticCategory::Warning => miette::Severity::Warning,
            DiagnosticCategory::Message => miette::Severity::Advice,
        };
        let label = match diagnostic.severity {
            Severity::Fatal => "parsing stopped here",
            Severity::Recoverable => "here",
        };
        Self {
            message: diagnostic.message_text.clone(),
            code: format!("TS{}", diagnostic.code),
            src: NamedSource::new(file_name, source_text.to_string()),
            span: diagnostic.span.map(|span| byte_span(source_text, span)),
            label,
            severity,
        }
    }
}

// Code and severity are per instance.
impl miette::Diagnostic for SyntaxDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(Some(self.label.to_string()), span))))
    }
}

/// Parser offsets count characters; miette wants bytes.
pub fn byte_span(source_text: &str, span: TextSpan) -> SourceSpan {
    let start = byte_offset(source_text, span.start as usize);
    let end = byte_offset(source_text, span.end() as usize);
    SourceSpan::new(start.into(), end - start)
}

fn byte_offset(source_text: &str, chars: usize) -> usize {
    source_text.char_indices().nth(chars).map_or(source_text.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_span_ascii() {
        let span = byte_span("let x = 1;", TextSpan::new(4, 1));
        assert_eq!(span.offset(), 4);
        assert_eq!(span.len(), 1);
    }

    #[test]
    fn test_byte_span_after_multibyte() {
        // "é" is two bytes, one character.
        let span = byte_span("'é' + x", TextSpan::new(6, 1));
        assert_eq!(span.offset(), 7);
        assert_eq!(span.len(), 1);
    }

    #[test]
    fn test_recoverable_diagnostic_renders_code_and_label() {
        use miette::Diagnostic as _;
        use typegram_diagnostics::messages;

        let diagnostic = Diagnostic::new(&messages::DUPLICATE_IDENTIFIER_0, &["x"])
            .with_span(TextSpan::new(4, 1))
            .with_severity(Severity::Recoverable);
        let report = SyntaxDiagnostic::new("a.ts", "let x;", &diagnostic);
        assert_eq!(report.code().map(|c| c.to_string()).as_deref(), Some("TS2300"));
        let labels: Vec<_> = report.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
    }

    #[test]
    fn test_span_past_end_clamps() {
        let span = byte_span("ab", TextSpan::new(2, 5));
        assert_eq!(span.offset(), 2);
        assert_eq!(span.len(), 0);
    }
}
