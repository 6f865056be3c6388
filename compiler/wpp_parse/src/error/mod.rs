//! Parse error types.
//!
//! A [`ParseError`] carries the report overview (its kind), the text printed
//! under the snippet arrow, and an optional hint. Lexer failures are wrapped
//! as [`ParseErrorKind::Lex`] and are fatal: document recovery stops at them.

use wpp_diagnostic::{Diagnostic, ReportKind};
use wpp_ir::{SourceId, Span};
use wpp_lexer::{LexError, LexErrorKind};

/// What went wrong. `Display` is the report overview.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexErrorKind),
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// A specific punctuation token, e.g. `` `)` ``.
    #[error("expected {0}")]
    ExpectedToken(&'static str),
    #[error("expected expression")]
    ExpectedExpression,
    #[error("expected statement")]
    ExpectedStatement,
    #[error("expected integer literal")]
    ExpectedInteger,
    #[error("duplicate parameter")]
    DuplicateParameter,
    #[error("invalid name")]
    InvalidName,
    #[error("no substitute argument")]
    NoSubstituteArgument,
    #[error("unexpected `->`")]
    UnexpectedArrow,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("empty slice")]
    EmptySlice,
    #[error("incorrect argument count")]
    IncorrectArgumentCount,
}

impl ParseErrorKind {
    /// Report category printed in the diagnostic header.
    pub fn report_kind(self) -> ReportKind {
        match self {
            ParseErrorKind::Lex(LexErrorKind::InvalidUtf8) => ReportKind::Utf8,
            ParseErrorKind::Lex(_) => ReportKind::Lexical,
            _ => ReportKind::Syntax,
        }
    }
}

/// A parse error with its location and explanation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub detail: String,
    pub hint: Option<String>,
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span, detail: impl Into<String>) -> Self {
        ParseError {
            kind,
            span,
            detail: detail.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Lexer errors end recovery: the rest of the text cannot be tokenized
    /// reliably.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lex(_))
    }

    pub fn report_kind(&self) -> ReportKind {
        self.kind.report_kind()
    }

    pub fn to_diagnostic(&self, source: SourceId) -> Diagnostic {
        Diagnostic::error(self.report_kind(), self.kind.to_string())
            .at(source, self.span)
            .with_detail(self.detail.clone())
            .with_hint_opt(self.hint.clone())
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(err.kind), err.span, err.detail())
    }
}
