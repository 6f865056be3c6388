//! One interpreter plus the emitter its diagnostics are rendered through.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use wpp_diagnostic::{Diagnostic, DiagnosticEmitter, TerminalEmitter};
use wpp_eval::{EvalError, Interpreter};
use wpp_ir::SourceMode;
use wpp_parse::Recovery;

/// Why a run did not produce output.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The document had syntax errors; nothing was evaluated.
    #[error("aborting due to {count} syntax error(s)")]
    Parse { count: usize },
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("file '{}' not found", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("output file '{}' already exists (pass --force to overwrite)", .path.display())]
    OutputExists { path: PathBuf },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Failure {
    /// Parse and evaluation failures are rendered by the session when they
    /// happen. The rest still need printing.
    pub fn is_reported(&self) -> bool {
        matches!(self, Failure::Parse { .. } | Failure::Eval(_))
    }
}

/// An interpreter whose environment persists across every source run in it.
pub struct Session<W: Write> {
    interp: Interpreter,
    emitter: TerminalEmitter<W>,
}

impl<W: Write> Session<W> {
    pub fn new(interp: Interpreter, emitter: TerminalEmitter<W>) -> Self {
        Session { interp, emitter }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interp
    }

    /// Consume the session, returning the emitter (and through it, the
    /// rendered diagnostics when writing to a buffer).
    pub fn into_emitter(self) -> TerminalEmitter<W> {
        self.emitter
    }

    /// Parse `text` as a document and evaluate it.
    ///
    /// Every syntax error is reported, up to the per-document limit, and
    /// evaluation only starts when there were none. Warnings are reported as
    /// they are collected; the first evaluation error ends the run.
    #[tracing::instrument(level = "debug", skip(self, name, text), fields(path = %name.as_ref().display()))]
    pub fn run_source(
        &mut self,
        name: impl AsRef<Path>,
        text: Vec<u8>,
        mode: SourceMode,
    ) -> Result<Vec<u8>, Failure> {
        let source = self.interp.add_source(name, text, mode);
        let parsed = self.interp.parse(source, Recovery::Document);

        self.emit_all(&parsed.warnings);
        for err in &parsed.errors {
            self.emit(&err.to_diagnostic(source));
        }
        if parsed.suppressed > 0 {
            self.emit(&Diagnostic::note(format!(
                "{} more syntax error(s) not shown",
                parsed.suppressed
            )));
        }
        if parsed.has_errors() {
            self.emitter.flush();
            let count = parsed.errors.len() + parsed.suppressed;
            debug!(count, "not evaluating");
            return Err(Failure::Parse { count });
        }

        let result = self.interp.evaluate(parsed.root);
        let warnings = self.interp.take_warnings();
        self.emit_all(&warnings);
        if let Err(err) = &result {
            let diag = err.to_diagnostic(self.interp.arena());
            self.emit(&diag);
        }
        self.emitter.flush();
        result.map_err(Failure::Eval)
    }

    fn emit(&mut self, diag: &Diagnostic) {
        self.emitter.emit(diag, self.interp.sources());
    }

    fn emit_all(&mut self, diags: &[Diagnostic]) {
        self.emitter.emit_all(diags, self.interp.sources());
    }
}
