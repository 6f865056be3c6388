//! `InterpreterBuilder` and the evaluation settings it carries.

use std::path::PathBuf;

use wpp_diagnostic::{WarningFlags, MAX_REC_DEPTH};
use wpp_ir::{Arena, SourceMap, StringInterner};
use wpp_stack::Depth;

use super::Interpreter;
use crate::log_handler::{stderr_handler, SharedLogHandler};
use crate::Environment;

/// Settings fixed for the lifetime of an interpreter.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Enabled warnings.
    pub warnings: WarningFlags,
    /// Make `run` and `pipe` fail instead of spawning processes.
    pub disable_run: bool,
    /// Directories `use` searches after the working directory, in order.
    pub search_paths: Vec<PathBuf>,
    /// Call depth at which "deep recursion" is reported.
    pub max_depth_warning: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            warnings: WarningFlags::default(),
            disable_run: false,
            search_paths: Vec::new(),
            max_depth_warning: MAX_REC_DEPTH,
        }
    }
}

/// Builder for [`Interpreter`].
///
/// ```ignore
/// let mut interp = InterpreterBuilder::new()
///     .warnings(WarningFlags::all())
///     .disable_run(true)
///     .build();
/// ```
#[derive(Default)]
pub struct InterpreterBuilder {
    config: EvalConfig,
    log_handler: Option<SharedLogHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every setting at once.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn warnings(mut self, warnings: WarningFlags) -> Self {
        self.config.warnings = warnings;
        self
    }

    #[must_use]
    pub fn disable_run(mut self, disable: bool) -> Self {
        self.config.disable_run = disable;
        self
    }

    /// Append a directory to the `use` search list.
    #[must_use]
    pub fn search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.search_paths.push(dir.into());
        self
    }

    #[must_use]
    pub fn max_depth_warning(mut self, depth: usize) -> Self {
        self.config.max_depth_warning = depth;
        self
    }

    /// Where `log` writes. Default is stderr.
    #[must_use]
    pub fn log_handler(mut self, handler: SharedLogHandler) -> Self {
        self.log_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            arena: Arena::new(),
            interner: StringInterner::new(),
            sources: SourceMap::new(),
            env: Environment::new(),
            call_depth: Depth::new(self.config.max_depth_warning),
            log: self.log_handler.unwrap_or_else(stderr_handler),
            warnings: Vec::new(),
            config: self.config,
        }
    }
}
