//! Core diagnostic types.

use std::fmt;

use wpp_ir::{SourceId, Span};

use crate::WarningKind;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Which stage produced a report.
///
/// `Utf8` reports print a byte offset instead of line and column, since
/// the text cannot be decoded to count columns.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReportKind {
    Lexical,
    Syntax,
    Semantic,
    Utf8,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Lexical => "lexical",
            ReportKind::Syntax => "syntax",
            ReportKind::Semantic => "semantic",
            ReportKind::Utf8 => "utf8",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned report ready for rendering.
///
/// Diagnostics refer to their text through the source map rather than
/// owning a copy, so they stay small and can be built deep inside the
/// evaluator.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: ReportKind,
    /// One-line summary, e.g. "function not found".
    pub overview: String,
    /// Longer explanation printed under the snippet arrow.
    pub detail: String,
    pub hint: Option<String>,
    /// Primary location. `None` for reports with no position (summaries).
    pub location: Option<(SourceId, Span)>,
    /// Set for warnings so the caller can check them against the enabled flags.
    pub warning: Option<WarningKind>,
}

impl Diagnostic {
    fn new(severity: Severity, kind: ReportKind, overview: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            kind,
            overview: overview.into(),
            detail: String::new(),
            hint: None,
            location: None,
            warning: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(kind: ReportKind, overview: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, overview)
    }

    /// Create a warning diagnostic of the given warning kind.
    pub fn warning(kind: ReportKind, warning: WarningKind) -> Self {
        let mut diag = Self::new(Severity::Warning, kind, warning.overview());
        diag.warning = Some(warning);
        diag
    }

    /// Create an unpositioned note.
    pub fn note(overview: impl Into<String>) -> Self {
        Self::new(Severity::Note, ReportKind::Syntax, overview)
    }

    /// Set the primary location.
    #[must_use]
    pub fn at(mut self, source: SourceId, span: Span) -> Self {
        self.location = Some((source, span));
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Like [`with_hint`](Self::with_hint), but keeps the diagnostic unchanged for `None`.
    #[must_use]
    pub fn with_hint_opt(mut self, hint: Option<String>) -> Self {
        if hint.is_some() {
            self.hint = hint;
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
