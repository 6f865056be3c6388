//! Shared test harness: parse and evaluate snippets.

use std::path::Path;

use parking_lot::{const_mutex, Mutex};
use wpp_diagnostic::Diagnostic;
use wpp_ir::SourceMode;
use wpp_parse::Recovery;

use crate::{EvalError, EvalResult, Interpreter};

/// Serializes tests that depend on the process working directory.
pub(crate) static CWD_LOCK: Mutex<()> = const_mutex(());

/// An interpreter whose `log` output is discarded.
pub(crate) fn quiet() -> Interpreter {
    Interpreter::builder()
        .log_handler(crate::silent_handler())
        .build()
}

/// Parse `src` as a file named `path` and evaluate it.
pub(crate) fn run_as(interp: &mut Interpreter, path: impl AsRef<Path>, src: &str) -> EvalResult {
    let source = interp.add_source(path, src.as_bytes().to_vec(), SourceMode::File);
    let out = interp.parse(source, Recovery::Document);
    assert!(
        out.errors.is_empty(),
        "unexpected parse errors for {src:?}: {:?}",
        out.errors
    );
    interp.evaluate(out.root)
}

pub(crate) fn run(interp: &mut Interpreter, src: &str) -> EvalResult {
    run_as(interp, "test.wpp", src)
}

/// Evaluate in a fresh interpreter and return the output as text.
pub(crate) fn eval(src: &str) -> String {
    match run(&mut quiet(), src) {
        Ok(out) => String::from_utf8_lossy(&out).into_owned(),
        Err(err) => panic!("evaluation of {src:?} failed: {err} ({})", err.detail),
    }
}

/// Evaluate in a fresh interpreter and return the error.
pub(crate) fn eval_err(src: &str) -> EvalError {
    match run(&mut quiet(), src) {
        Ok(out) => panic!(
            "expected {src:?} to fail, got {:?}",
            String::from_utf8_lossy(&out)
        ),
        Err(err) => err,
    }
}

/// Overviews of the warnings raised so far.
pub(crate) fn warning_overviews(interp: &mut Interpreter) -> Vec<String> {
    interp
        .take_warnings()
        .into_iter()
        .map(|d: Diagnostic| d.overview)
        .collect()
}
