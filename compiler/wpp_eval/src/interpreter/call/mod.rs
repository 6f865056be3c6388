//! Definitions, calls and the scope stack.
//!
//! Arguments are evaluated right to left. When a call passes more values
//! than the selected definition declares, the surplus is pushed onto the
//! innermost scope of the stack, in evaluation order, and the rest bind to
//! the parameters positionally. `pop` pulls such values back off and appends
//! them to a new call.

use tracing::debug;
use wpp_diagnostic::WarningKind;
use wpp_ir::{Name, Node, NodeId, ParamList};

use super::Interpreter;
use crate::environment::Frame;
use crate::errors::{function_not_found, undefined_function, variable_not_found, EvalError, EvalResult};

impl Interpreter {
    // === Definitions ===

    pub(super) fn define_function(&mut self, node: NodeId, name: Name, arity: usize) {
        if self.env.define_function(name, arity, node) {
            let name = self.name(name);
            self.warn(WarningKind::FuncRedefined, node, || {
                format!("function '{name}' ({arity} parameters) redefined")
            });
        }
    }

    pub(super) fn define_variable(&mut self, node: NodeId, name: Name, body: NodeId) -> EvalResult {
        let value = self.eval(body)?;
        if self.env.define_variable(name, value) {
            let name = self.name(name);
            self.warn(WarningKind::VarRedefined, node, || {
                format!("variable '{name}' redefined")
            });
        }
        Ok(Vec::new())
    }

    pub(super) fn drop_function(&mut self, node: NodeId, name: Name, arity: usize) -> EvalResult {
        if self.env.drop_function(name, arity) {
            Ok(Vec::new())
        } else {
            Err(undefined_function(node, self.name(name), arity))
        }
    }

    // === References ===

    /// Parameters of the active call shadow variables.
    pub(super) fn variable(&mut self, node: NodeId, name: Name) -> EvalResult {
        if let Some(value) = self.env.frame().and_then(|frame| frame.get(name)) {
            let value = value.to_vec();
            if self.env.has_variable(name) {
                let name = self.name(name);
                self.warn(WarningKind::ParamShadowVar, node, || {
                    format!("parameter '{name}' is shadowing a variable")
                });
            }
            return Ok(value);
        }

        match self.env.variable(name) {
            Some(value) => Ok(value.to_vec()),
            None => Err(variable_not_found(
                node,
                self.name(name),
                self.env.has_function(name, 0),
            )),
        }
    }

    // === Calls ===

    pub(super) fn invoke(&mut self, node: NodeId, name: Name, args: &[NodeId]) -> EvalResult {
        let values = self.eval_args(args)?;
        self.call(node, name, values)
    }

    /// `pop name(args, *...)`: the popped values follow `args`, topmost first.
    pub(super) fn pop(
        &mut self,
        node: NodeId,
        name: Name,
        args: &[NodeId],
        n_popped: usize,
    ) -> EvalResult {
        let mut values = self.eval_args(args)?;
        for _ in 0..n_popped {
            match self.env.pop_value() {
                Some(value) => values.push(value),
                None => break,
            }
        }
        self.call(node, name, values)
    }

    /// `new expr`: evaluate `expr` with a fresh innermost scope.
    pub(super) fn new_scope(&mut self, expr: NodeId) -> EvalResult {
        self.env.open_scope();
        let result = self.eval(expr);
        self.env.close_scope();
        result
    }

    /// Evaluate right to left; the result is in textual order.
    fn eval_args(&mut self, args: &[NodeId]) -> Result<Vec<Vec<u8>>, EvalError> {
        let mut values = Vec::with_capacity(args.len());
        for &arg in args.iter().rev() {
            values.push(self.eval(arg)?);
        }
        values.reverse();
        Ok(values)
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(name = self.name(name), n_args = values.len())
    )]
    fn call(&mut self, node: NodeId, name: Name, mut values: Vec<Vec<u8>>) -> EvalResult {
        let n_args = values.len();
        let Some(resolved) = self.env.resolve(name, n_args) else {
            return Err(function_not_found(node, self.name(name)));
        };
        let Some((params, body)) = self.signature(resolved.node) else {
            return Err(function_not_found(node, self.name(name)));
        };

        let extra = n_args - resolved.arity;
        if extra > 0 {
            let callee = self.name(name);
            let arity = resolved.arity;
            self.warn(WarningKind::ExtraArgs, node, || {
                format!("`{callee}` takes {arity} arguments, {extra} more were pushed onto the stack")
            });
            debug!(extra, "overflow arguments");
            // The last argument was evaluated first, so it goes in first.
            for value in values.drain(resolved.arity..).rev() {
                self.env.push_value(value);
            }
        }

        let mut frame = Frame::inherit(self.env.frame(), name);
        for (&param, value) in params.iter().zip(values) {
            if frame.bind(param, value) {
                let (param, callee) = (self.name(param), self.name(name));
                self.warn(WarningKind::ParamShadowParam, node, || {
                    format!(
                        "parameter '{param}' inside function '{callee}' shadows parameter from enclosing function"
                    )
                });
            }
        }

        if self.call_depth.enter() {
            let depth = self.call_depth.current();
            self.warn(WarningKind::DeepRecursion, node, || {
                format!("the call depth has grown to >= {depth}")
            });
        }
        self.env.push_frame(frame);
        let result = self.eval(body);
        self.env.pop_frame();
        self.call_depth.exit();
        result
    }

    fn signature(&self, function: NodeId) -> Option<(ParamList, NodeId)> {
        match self.arena.get(function) {
            Node::Fn { params, body, .. } => Some((params.clone(), *body)),
            _ => None,
        }
    }
}
