//! Lexer errors.
//!
//! Lex errors are fatal for the text being lexed: the parser does not try
//! to recover from them.

use wpp_diagnostic::{Diagnostic, ReportKind};
use wpp_ir::{SourceId, Span};

/// What went wrong. `Display` is the report overview.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("unexpected null byte")]
    InteriorNull,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("invalid hex escape")]
    InvalidHexEscape,
    #[error("invalid bin escape")]
    InvalidBinEscape,
}

/// A lexer error with its location.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    /// Text printed under the snippet arrow.
    pub fn detail(&self) -> &'static str {
        match self.kind {
            LexErrorKind::InvalidUtf8 => "invalid UTF-8 sequence begins here",
            LexErrorKind::InteriorNull => "source contains a null byte",
            LexErrorKind::UnterminatedComment => {
                "reached EOF while parsing comment that begins here"
            }
            LexErrorKind::InvalidHexEscape => "invalid character in hex escape",
            LexErrorKind::InvalidBinEscape => "invalid character in bin escape",
        }
    }

    pub fn report_kind(&self) -> ReportKind {
        match self.kind {
            LexErrorKind::InvalidUtf8 => ReportKind::Utf8,
            _ => ReportKind::Lexical,
        }
    }

    /// Convert to a diagnostic located in `source`.
    pub fn to_diagnostic(&self, source: SourceId) -> Diagnostic {
        Diagnostic::error(self.report_kind(), self.kind.to_string())
            .at(source, self.span)
            .with_detail(self.detail())
    }
}
