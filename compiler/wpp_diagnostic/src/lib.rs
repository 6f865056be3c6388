//! Diagnostic system for wpp reports.
//!
//! Every report has:
//! - An overview (what went wrong, one line)
//! - A primary location (source + span)
//! - A detail line printed under the snippet arrow
//! - An optional hint
//!
//! Warnings are gated by [`WarningFlags`], which the driver builds from
//! `-W` switches.

mod diagnostic;
pub mod emitter;
mod warning;

pub use diagnostic::{Diagnostic, ReportKind, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use warning::{UnknownWarning, WarningFlags, WarningKind};

/// Parse nesting depth at which the "deep expression" warning fires.
pub const MAX_EXPR_DEPTH: usize = 256;
/// Call depth at which the "deep recursion" warning fires.
pub const MAX_REC_DEPTH: usize = 256;
/// Parse errors reported per document before the parser gives up.
pub const MAX_ERRORS: usize = 10;
