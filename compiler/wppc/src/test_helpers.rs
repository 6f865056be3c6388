//! Sessions that render diagnostics into a buffer.

use parking_lot::{const_mutex, Mutex};
use wpp_diagnostic::{ColorMode, TerminalEmitter};
use wpp_eval::{silent_handler, Interpreter, InterpreterBuilder};

use crate::Session;

/// Serializes tests that depend on the process working directory.
pub(crate) static CWD_LOCK: Mutex<()> = const_mutex(());

pub(crate) fn plain_emitter() -> TerminalEmitter<Vec<u8>> {
    TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
}

pub(crate) fn session() -> Session<Vec<u8>> {
    session_with(Interpreter::builder())
}

pub(crate) fn session_with(builder: InterpreterBuilder) -> Session<Vec<u8>> {
    Session::new(builder.log_handler(silent_handler()).build(), plain_emitter())
}

/// Everything the session has rendered.
pub(crate) fn reports(session: Session<Vec<u8>>) -> String {
    String::from_utf8_lossy(&session.into_emitter().into_inner()).into_owned()
}
