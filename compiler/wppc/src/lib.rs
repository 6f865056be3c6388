//! wpp driver.
//!
//! Turns command-line [`Options`] into an [`Interpreter`](wpp_eval::Interpreter)
//! run: input files are evaluated in order against one environment and their
//! outputs concatenated, or lines are read interactively by the [`repl`].
//!
//! # Architecture
//!
//! ```text
//! Options ──► execute ──► Session::run_source ──► parse ──► evaluate
//!                │                 │
//!                ▼                 ▼
//!              repl          TerminalEmitter (stderr)
//! ```
//!
//! Program output goes to stdout (or `--output`); every diagnostic is
//! rendered by the session's emitter. `tracing` output, when enabled with
//! `WPP_LOG`, goes to stderr.

mod driver;
pub mod options;
pub mod repl;
pub mod session;
#[cfg(test)]
mod test_helpers;
mod tracing_setup;

pub use driver::{check_output, execute, run_file, run_files, write_output};
pub use options::{Options, OptionsError, USAGE};
pub use repl::repl;
pub use session::{Failure, Session};
pub use tracing_setup::init_tracing;
