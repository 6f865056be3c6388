//! Tree-walking interpreter.
//!
//! Every node evaluates to a byte string. The interpreter owns the node
//! arena and the source map because `eval` and `use` parse more text while a
//! walk is in progress: nodes are always fetched by [`NodeId`] and cloned
//! out of the arena before any call that may append to it.
//!
//! # Module Structure
//!
//! - `mod.rs`: public API and node dispatch
//! - `builder.rs`: `InterpreterBuilder` and `EvalConfig`
//! - `call/`: definitions, invocation, argument binding, `new`/`pop`/`drop`
//! - `intrinsic/`: `run`, `pipe`, `file`, `assert`, `error`, `log` and the
//!   string utilities
//! - `reentry/`: `eval`/`!` and `use`, which parse and evaluate more text

mod builder;
mod call;
mod intrinsic;
mod reentry;

pub use builder::{EvalConfig, InterpreterBuilder};

use std::path::Path;

use tracing::trace;
use wpp_diagnostic::{Diagnostic, ReportKind, WarningKind};
use wpp_ir::{
    Arena, MatchArm, Name, Node, NodeId, SliceFlags, SourceId, SourceMap, SourceMode,
    StringInterner,
};
use wpp_lexer_core::SourceBuffer;
use wpp_parse::{ParseOutput, Recovery};
use wpp_stack::Depth;

use crate::errors::{index_out_of_range, no_match_found, EvalResult};
use crate::log_handler::SharedLogHandler;
use crate::{strings, Environment};

/// The evaluator and everything it mutates while running.
pub struct Interpreter {
    arena: Arena,
    interner: StringInterner,
    sources: SourceMap,
    env: Environment,
    config: EvalConfig,
    call_depth: Depth,
    log: SharedLogHandler,
    warnings: Vec<Diagnostic>,
}

impl Default for Interpreter {
    fn default() -> Self {
        InterpreterBuilder::new().build()
    }
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Warnings raised since the last call, in the order they fired.
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    /// Register a text so it can be parsed and reported against.
    pub fn add_source(&mut self, path: impl AsRef<Path>, text: Vec<u8>, mode: SourceMode) -> SourceId {
        self.sources.add(path, text, mode)
    }

    /// Parse a registered source into the arena.
    pub fn parse(&mut self, source: SourceId, recovery: Recovery) -> ParseOutput {
        let buffer = SourceBuffer::new(&self.sources.get(source).text);
        wpp_parse::parse(
            &buffer,
            &mut self.arena,
            &self.interner,
            source,
            self.config.warnings,
            recovery,
        )
    }

    /// Evaluate a parsed document (or any node) to its output.
    ///
    /// Fails on the first error. Definitions made before the failure stay in
    /// the environment.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&mut self, root: NodeId) -> EvalResult {
        self.eval(root)
    }

    // === Dispatch ===

    pub(crate) fn eval(&mut self, id: NodeId) -> EvalResult {
        wpp_stack::ensure_sufficient_stack(|| self.eval_node(id))
    }

    fn eval_node(&mut self, id: NodeId) -> EvalResult {
        let node = self.arena.get(id).clone();
        trace!(id = id.raw(), kind = node.kind_name(), "eval");

        match node {
            Node::Document { statements } => {
                let mut out = Vec::new();
                for stmt in statements {
                    out.extend(self.eval(stmt)?);
                }
                Ok(out)
            }
            Node::Block { statements, expr } => {
                for stmt in statements {
                    self.eval(stmt)?;
                }
                self.eval(expr)
            }
            Node::Fn { name, params, .. } => {
                self.define_function(id, name, params.len());
                Ok(Vec::new())
            }
            Node::Var { name, body } => self.define_variable(id, name, body),
            Node::VarRef { name } => self.variable(id, name),
            Node::FnInvoke { name, args } => self.invoke(id, name, &args),
            Node::Drop { name, arity } => self.drop_function(id, name, arity),
            Node::New { expr } => self.new_scope(expr),
            Node::Pop {
                name,
                args,
                n_popped,
            } => self.pop(id, name, &args, n_popped),
            Node::String { value } => Ok(value),
            Node::Concat { lhs, rhs } => {
                let mut out = self.eval(lhs)?;
                out.extend(self.eval(rhs)?);
                Ok(out)
            }
            Node::Slice {
                expr,
                start,
                stop,
                flags,
            } => self.slice(id, expr, start, stop, flags),
            Node::Match {
                test,
                arms,
                default,
            } => self.match_arms(id, test, &arms, default),
            Node::Codeify { expr } => self.codeify(id, expr),
            Node::Use { path } => self.use_file(id, path),
            Node::Run { cmd } => self.run(id, cmd),
            Node::Pipe { cmd, data } => self.pipe(id, cmd, data),
            Node::File { path } => self.file(id, path),
            Node::Assert { lhs, rhs } => self.assert(id, lhs, rhs),
            Node::Error { msg } => self.user_error(id, msg),
            Node::Log { msg } => self.log(msg),
            Node::Length { expr } => Ok(strings::length(&self.eval(expr)?)),
            Node::Find { haystack, needle } => {
                let haystack = self.eval(haystack)?;
                let needle = self.eval(needle)?;
                Ok(strings::find(&haystack, &needle))
            }
            Node::Escape { expr } => Ok(strings::escape(&self.eval(expr)?)),
            Node::SliceRange { expr, start, end } => self.slice_range(id, expr, start, end),
        }
    }

    // === Expressions ===

    /// `expr[stop]` truncation is applied before `start`.
    fn slice(
        &mut self,
        id: NodeId,
        expr: NodeId,
        start: i64,
        stop: i64,
        flags: SliceFlags,
    ) -> EvalResult {
        let value = self.eval(expr)?;
        if flags.contains(SliceFlags::INDEX) {
            return strings::char_at(&value, start).map_err(|len| index_out_of_range(id, start, len));
        }

        let value = if flags.contains(SliceFlags::STOP) {
            strings::take_chars(&value, stop)
        } else {
            value
        };
        Ok(if flags.contains(SliceFlags::START) {
            strings::skip_chars(&value, start)
        } else {
            value
        })
    }

    /// First arm whose pattern equals the test wins. Patterns are evaluated
    /// in order, only up to the match.
    fn match_arms(
        &mut self,
        id: NodeId,
        test: NodeId,
        arms: &[MatchArm],
        default: NodeId,
    ) -> EvalResult {
        let test = self.eval(test)?;
        for arm in arms {
            if self.eval(arm.pattern)? == test {
                return self.eval(arm.result);
            }
        }
        if default.is_present() {
            self.eval(default)
        } else {
            Err(no_match_found(id))
        }
    }

    // === Helpers ===

    fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Report `kind` at `node` unless it is disabled or this site already
    /// reported it.
    fn warn(&mut self, kind: WarningKind, node: NodeId, detail: impl FnOnce() -> String) {
        if !self.config.warnings.enabled(kind) {
            return;
        }
        let site = self.warning_site(node);
        if !self.env.first_warning(kind, site) {
            return;
        }
        let position = self.arena.position(node);
        self.warnings.push(
            Diagnostic::warning(ReportKind::Semantic, kind)
                .at(position.source, position.span)
                .with_detail(detail()),
        );
    }

    /// The syntactic site a warning at `node` belongs to.
    ///
    /// Code produced by `eval` is parsed afresh on every run, so its nodes
    /// are attributed to the nearest enclosing node outside generated code.
    fn warning_site(&self, node: NodeId) -> NodeId {
        self.arena
            .ancestors(node)
            .find(|&id| self.sources.get(self.arena.position(id).source).mode != SourceMode::Eval)
            .unwrap_or(node)
    }
}
