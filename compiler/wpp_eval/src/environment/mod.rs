//! Run-time symbol tables.
//!
//! Names are bound late: call sites hold a [`Name`] and the arity they pass,
//! and the function is looked up here on every call. That is what makes
//! redefinition and `drop` work on code that was parsed earlier.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rustc_hash::{FxHashMap, FxHashSet};
use wpp_diagnostic::WarningKind;
use wpp_ir::{Name, NodeId};

/// A function selected for a call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// Number of declared parameters.
    pub arity: usize,
    /// The `Fn` node of the newest generation.
    pub node: NodeId,
}

/// Parameter bindings of one active call.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub function: Option<Name>,
    args: FxHashMap<Name, Vec<u8>>,
}

impl Frame {
    /// A frame that starts with every binding visible in `parent`.
    pub fn inherit(parent: Option<&Frame>, function: Name) -> Self {
        Frame {
            function: Some(function),
            args: parent.map(|p| p.args.clone()).unwrap_or_default(),
        }
    }

    /// Bind a parameter. Returns `true` when it replaced a binding.
    pub fn bind(&mut self, name: Name, value: Vec<u8>) -> bool {
        self.args.insert(name, value).is_some()
    }

    pub fn get(&self, name: Name) -> Option<&[u8]> {
        self.args.get(&name).map(Vec::as_slice)
    }
}

/// Function table, variables, scope stack and per-run bookkeeping.
///
/// Survives across evaluations, so successive REPL lines and successive
/// input files see each other's definitions.
#[derive(Debug)]
pub struct Environment {
    /// name -> declared arity -> generations, newest last.
    functions: FxHashMap<Name, BTreeMap<usize, Vec<NodeId>>>,
    variables: FxHashMap<Name, Vec<u8>>,
    /// Scope stack: `new` opens a sequence, overflow arguments are pushed
    /// onto the innermost one.
    scopes: Vec<Vec<Vec<u8>>>,
    frames: Vec<Frame>,
    /// Canonical paths already evaluated by `use`.
    seen_files: FxHashSet<PathBuf>,
    /// Sites that already produced a warning.
    warned: FxHashSet<(WarningKind, NodeId)>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            functions: FxHashMap::default(),
            variables: FxHashMap::default(),
            scopes: vec![Vec::new()],
            frames: Vec::new(),
            seen_files: FxHashSet::default(),
            warned: FxHashSet::default(),
        }
    }

    // === Functions ===

    /// Push a new generation. Returns `true` when `name`/`arity` was
    /// already defined.
    pub fn define_function(&mut self, name: Name, arity: usize, node: NodeId) -> bool {
        let generations = self
            .functions
            .entry(name)
            .or_default()
            .entry(arity)
            .or_default();
        let redefined = !generations.is_empty();
        generations.push(node);
        redefined
    }

    /// Pick the definition with the largest arity not above `n_args`.
    pub fn resolve(&self, name: Name, n_args: usize) -> Option<Resolved> {
        let (&arity, generations) = self.functions.get(&name)?.range(..=n_args).next_back()?;
        generations.last().map(|&node| Resolved { arity, node })
    }

    pub fn has_function(&self, name: Name, arity: usize) -> bool {
        self.functions
            .get(&name)
            .is_some_and(|arities| arities.contains_key(&arity))
    }

    /// Remove the newest generation of `name`/`arity`.
    ///
    /// Returns `false` if there was nothing to remove.
    pub fn drop_function(&mut self, name: Name, arity: usize) -> bool {
        let Some(arities) = self.functions.get_mut(&name) else {
            return false;
        };
        let Some(generations) = arities.get_mut(&arity) else {
            return false;
        };
        generations.pop();
        if generations.is_empty() {
            arities.remove(&arity);
        }
        if arities.is_empty() {
            self.functions.remove(&name);
        }
        true
    }

    // === Variables ===

    /// Set a variable. Returns `true` when it replaced an existing value.
    pub fn define_variable(&mut self, name: Name, value: Vec<u8>) -> bool {
        self.variables.insert(name, value).is_some()
    }

    pub fn variable(&self, name: Name) -> Option<&[u8]> {
        self.variables.get(&name).map(Vec::as_slice)
    }

    pub fn has_variable(&self, name: Name) -> bool {
        self.variables.contains_key(&name)
    }

    // === Scope stack ===

    pub fn open_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Close the innermost scope. The outermost one is never removed.
    pub fn close_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn push_value(&mut self, value: Vec<u8>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(value);
        }
    }

    pub fn pop_value(&mut self) -> Option<Vec<u8>> {
        self.scopes.last_mut().and_then(Vec::pop)
    }

    /// Values in the innermost scope, bottom first.
    pub fn scope_values(&self) -> &[Vec<u8>] {
        self.scopes.last().map_or(&[], Vec::as_slice)
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    // === Call frames ===

    pub fn frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    // === Bookkeeping ===

    /// Record a sourced file. Returns `false` if it was seen before.
    pub fn mark_seen(&mut self, path: PathBuf) -> bool {
        self.seen_files.insert(path)
    }

    /// Whether to report `kind` at `site`. Each pair is reported once.
    pub fn first_warning(&mut self, kind: WarningKind, site: NodeId) -> bool {
        self.warned.insert((kind, site))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
