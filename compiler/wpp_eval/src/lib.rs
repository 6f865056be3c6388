//! wpp Eval - tree-walking evaluator for wpp.
//!
//! # Architecture
//!
//! - [`Interpreter`]: owns the node arena, the source map and the
//!   [`Environment`], and walks documents to produce output bytes
//! - [`Environment`]: function generations, variables, the scope stack used
//!   by overflow arguments and `pop`, and call frames
//! - [`errors`]: `EvalError` and its centralized constructors
//! - `strings`: the pure string utilities behind `length`, `find`,
//!   `escape`, `slice` and postfix slicing
//! - `process`: `sh -c` subprocesses for `run` and `pipe`
//! - `log_handler`: where `log` output goes
//!
//! Errors are fail-fast: the first one unwinds out of
//! [`Interpreter::evaluate`]. Warnings are collected and drained with
//! [`Interpreter::take_warnings`].

mod environment;
pub mod errors;
pub mod interpreter;
pub mod log_handler;
mod process;
mod strings;
#[cfg(test)]
mod test_helpers;

pub use environment::{Environment, Frame, Resolved};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{EvalConfig, Interpreter, InterpreterBuilder};
pub use log_handler::{buffer_handler, silent_handler, stderr_handler, SharedLogHandler};
pub use strings::RangeError;
