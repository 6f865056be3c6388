//! Evaluation errors and their centralized constructors.
//!
//! Every failure the evaluator can raise is built by one of the `#[cold]`
//! functions below, so the wording of overviews, details and hints lives in
//! one place. Evaluation is fail-fast: the first error unwinds to the caller
//! of [`Interpreter::evaluate`](crate::Interpreter::evaluate).

use std::fmt::Display;
use std::path::Path;

use wpp_diagnostic::{Diagnostic, ReportKind};
use wpp_ir::{Arena, NodeId, SourceId, Span};
use wpp_parse::{ParseError, ParseErrorKind};

/// Result of evaluating one node.
pub type EvalResult = Result<Vec<u8>, EvalError>;

/// What went wrong. `Display` is the one-line overview of the report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("function not found")]
    FunctionNotFound,
    #[error("variable not found")]
    VariableNotFound,
    #[error("undefined function")]
    UndefinedFunction,
    #[error("no matches found")]
    NoMatchFound,
    #[error("assertion failed")]
    AssertionFailed,
    #[error("user error")]
    UserError,
    #[error("subcommand failed")]
    SubprocessFailed,
    #[error("file not found")]
    FileNotFound,
    #[error("empty path")]
    EmptyPath,
    #[error("intrinsic disabled")]
    IntrinsicDisabled,
    #[error("invalid slice")]
    InvalidSlice,
    #[error("index out of range")]
    IndexOutOfRange,
    /// Text handed to `eval` or `use` did not parse.
    #[error(transparent)]
    Syntax(ParseErrorKind),
}

/// An evaluation failure, located at the node that raised it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub node: NodeId,
    pub detail: String,
    pub hint: Option<String>,
    /// Explicit location for errors that have no node of their own, such as
    /// a syntax error inside a file pulled in by `use`.
    pub site: Option<(SourceId, Span)>,
}

impl EvalError {
    #[cold]
    pub fn new(kind: EvalErrorKind, node: NodeId, detail: impl Into<String>) -> Self {
        EvalError {
            kind,
            node,
            detail: detail.into(),
            hint: None,
            site: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Move the error to `node`, keeping its overview, detail and hint.
    #[must_use]
    pub fn relocate(mut self, node: NodeId) -> Self {
        self.node = node;
        self.site = None;
        self
    }

    pub fn report_kind(&self) -> ReportKind {
        match self.kind {
            EvalErrorKind::Syntax(kind) => kind.report_kind(),
            _ => ReportKind::Semantic,
        }
    }

    pub fn to_diagnostic(&self, arena: &Arena) -> Diagnostic {
        let diag = Diagnostic::error(self.report_kind(), self.kind.to_string())
            .with_detail(self.detail.clone())
            .with_hint_opt(self.hint.clone());

        if let Some((source, span)) = self.site {
            diag.at(source, span)
        } else if self.node.is_present() {
            let position = arena.position(self.node);
            diag.at(position.source, position.span)
        } else {
            diag
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// Functions

#[cold]
pub fn function_not_found(node: NodeId, name: &str) -> EvalError {
    EvalError::new(
        EvalErrorKind::FunctionNotFound,
        node,
        format!("attempting to invoke function '{name}' which is undefined"),
    )
    .with_hint("are you passing the correct number of arguments?")
}

#[cold]
pub fn undefined_function(node: NodeId, name: &str, arity: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndefinedFunction,
        node,
        format!("cannot drop undefined function '{name}' ({arity} parameters)"),
    )
    .with_hint("are you passing the correct number of arguments?")
}

// Variables

#[cold]
pub fn variable_not_found(node: NodeId, name: &str, is_function: bool) -> EvalError {
    let err = EvalError::new(
        EvalErrorKind::VariableNotFound,
        node,
        format!("attempting to reference variable '{name}' which is undefined"),
    );
    if is_function {
        err.with_hint(format!("did you mean to call `{name}()`?"))
    } else {
        err
    }
}

// Control flow

#[cold]
pub fn no_match_found(node: NodeId) -> EvalError {
    EvalError::new(
        EvalErrorKind::NoMatchFound,
        node,
        "exhausted all checks in match expression",
    )
    .with_hint("add a default arm with `*`")
}

#[cold]
pub fn assertion_failed(node: NodeId, lhs: &[u8], rhs: &[u8]) -> EvalError {
    EvalError::new(
        EvalErrorKind::AssertionFailed,
        node,
        format!("lhs='{}', rhs='{}'", lossy(lhs), lossy(rhs)),
    )
}

#[cold]
pub fn user_error(node: NodeId, msg: &[u8]) -> EvalError {
    EvalError::new(EvalErrorKind::UserError, node, lossy(msg))
}

// Slicing

#[cold]
pub fn invalid_slice(node: NodeId, detail: &str) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidSlice, node, detail)
}

#[cold]
pub fn index_out_of_range(node: NodeId, index: i64, len: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::IndexOutOfRange,
        node,
        format!("index {index} is out of range for a string of {len} characters"),
    )
}

// Intrinsics with side effects

#[cold]
pub fn intrinsic_disabled(node: NodeId, intrinsic: &str) -> EvalError {
    EvalError::new(
        EvalErrorKind::IntrinsicDisabled,
        node,
        format!("`{intrinsic}` not available"),
    )
}

#[cold]
pub fn subprocess_failed(node: NodeId, cmd: &[u8]) -> EvalError {
    EvalError::new(
        EvalErrorKind::SubprocessFailed,
        node,
        format!("subprocess exited with non-zero status `{}`", lossy(cmd)),
    )
}

#[cold]
pub fn subprocess_not_started(node: NodeId, cmd: &[u8], err: impl Display) -> EvalError {
    EvalError::new(
        EvalErrorKind::SubprocessFailed,
        node,
        format!("could not run `{}`: {err}", lossy(cmd)),
    )
}

#[cold]
pub fn empty_path(node: NodeId, intrinsic: &str) -> EvalError {
    EvalError::new(
        EvalErrorKind::EmptyPath,
        node,
        format!("`{intrinsic}` must be supplied a non-empty string"),
    )
}

#[cold]
pub fn file_not_found(node: NodeId, path: &[u8]) -> EvalError {
    EvalError::new(
        EvalErrorKind::FileNotFound,
        node,
        format!("file '{}' does not exist or could not be found", lossy(path)),
    )
}

#[cold]
pub fn file_unreadable(node: NodeId, path: &Path, err: impl Display) -> EvalError {
    EvalError::new(
        EvalErrorKind::FileNotFound,
        node,
        format!("there was an error while reading file '{}': {err}", path.display()),
    )
}

// Re-parsed text

/// A syntax error in text parsed at run time.
///
/// `site` is the location inside the parsed text; `eval` relocates the error
/// to its own node afterwards, `use` keeps it.
#[cold]
pub fn syntax_error(node: NodeId, source: SourceId, err: &ParseError) -> EvalError {
    EvalError {
        kind: EvalErrorKind::Syntax(err.kind),
        node,
        detail: err.detail.clone(),
        hint: err.hint.clone(),
        site: Some((source, err.span)),
    }
}
