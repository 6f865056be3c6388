//! Syntax tree node variants.
//!
//! Every node evaluates to a byte string. Children are [`NodeId`]s into the
//! same [`Arena`](crate::Arena); names are resolved through the evaluator's
//! tables at run time, never through node links, so a function can be
//! redefined or dropped after the call site was parsed.

use crate::{Name, NodeId};
use bitflags::bitflags;
use smallvec::SmallVec;

/// Child list for statements and call arguments.
pub type NodeList = SmallVec<[NodeId; 4]>;

/// Parameter names of a function definition.
pub type ParamList = SmallVec<[Name; 4]>;

/// One `pattern -> result` arm of a `match`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchArm {
    pub pattern: NodeId,
    pub result: NodeId,
}

bitflags! {
    /// Which bounds a postfix slice carries.
    ///
    /// `INDEX` is exclusive with `START`/`STOP`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct SliceFlags: u8 {
        const INDEX = 0b001;
        const START = 0b010;
        const STOP  = 0b100;
    }
}

/// A node in the flat syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Top-level sequence of statements; outputs are concatenated.
    Document { statements: NodeList },
    /// `{ stmt* expr }`; only the trailing expression produces output.
    Block { statements: NodeList, expr: NodeId },
    /// `let name(params) body`
    Fn {
        name: Name,
        params: ParamList,
        body: NodeId,
    },
    /// `let name body` / `var name body`
    Var { name: Name, body: NodeId },
    /// Bare identifier without an argument list.
    VarRef { name: Name },
    /// `name(args)`
    FnInvoke { name: Name, args: NodeList },
    /// `drop name(params)`
    Drop { name: Name, arity: usize },
    /// `new expr`
    New { expr: NodeId },
    /// `pop name(args, *, ...)`
    Pop {
        name: Name,
        args: NodeList,
        n_popped: usize,
    },
    /// Literal bytes (already unescaped).
    String { value: Vec<u8> },
    /// `lhs .. rhs`
    Concat { lhs: NodeId, rhs: NodeId },
    /// `expr[i]`, `expr[start:]`, `expr[:stop]`, `expr[start:stop]`
    ///
    /// For the index form the index is stored in `start`.
    Slice {
        expr: NodeId,
        start: i64,
        stop: i64,
        flags: SliceFlags,
    },
    /// `match test { pattern -> result ... * -> default }`
    Match {
        test: NodeId,
        arms: Vec<MatchArm>,
        default: NodeId,
    },
    /// `!expr` / `eval expr`
    Codeify { expr: NodeId },
    Run { cmd: NodeId },
    Pipe { cmd: NodeId, data: NodeId },
    File { path: NodeId },
    /// `use path` / `source path`
    Use { path: NodeId },
    Assert { lhs: NodeId, rhs: NodeId },
    Error { msg: NodeId },
    Log { msg: NodeId },
    Length { expr: NodeId },
    Find { haystack: NodeId, needle: NodeId },
    Escape { expr: NodeId },
    /// Keyword form `slice(str, start, end)`, inclusive byte range.
    SliceRange {
        expr: NodeId,
        start: NodeId,
        end: NodeId,
    },
}

impl Node {
    /// Visit every present child id, in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
        let mut visit = |id: NodeId| {
            if id.is_present() {
                f(id);
            }
        };
        match self {
            Node::Document { statements } => statements.iter().copied().for_each(&mut visit),
            Node::Block { statements, expr } => {
                statements.iter().copied().for_each(&mut visit);
                visit(*expr);
            }
            Node::FnInvoke { args, .. } | Node::Pop { args, .. } => {
                args.iter().copied().for_each(&mut visit);
            }
            Node::Match {
                test,
                arms,
                default,
            } => {
                visit(*test);
                for arm in arms {
                    visit(arm.pattern);
                    visit(arm.result);
                }
                visit(*default);
            }
            Node::Fn { body, .. } | Node::Var { body, .. } => visit(*body),
            Node::New { expr }
            | Node::Slice { expr, .. }
            | Node::Codeify { expr }
            | Node::Length { expr }
            | Node::Escape { expr } => visit(*expr),
            Node::Run { cmd } => visit(*cmd),
            Node::File { path } | Node::Use { path } => visit(*path),
            Node::Error { msg } | Node::Log { msg } => visit(*msg),
            Node::Concat { lhs, rhs } | Node::Assert { lhs, rhs } => {
                visit(*lhs);
                visit(*rhs);
            }
            Node::Pipe { cmd, data } => {
                visit(*cmd);
                visit(*data);
            }
            Node::Find { haystack, needle } => {
                visit(*haystack);
                visit(*needle);
            }
            Node::SliceRange { expr, start, end } => {
                visit(*expr);
                visit(*start);
                visit(*end);
            }
            Node::VarRef { .. } | Node::Drop { .. } | Node::String { .. } => {}
        }
    }

    /// Short variant name for tracing and debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Document { .. } => "document",
            Node::Block { .. } => "block",
            Node::Fn { .. } => "fn",
            Node::Var { .. } => "var",
            Node::VarRef { .. } => "varref",
            Node::FnInvoke { .. } => "fninvoke",
            Node::Drop { .. } => "drop",
            Node::New { .. } => "new",
            Node::Pop { .. } => "pop",
            Node::String { .. } => "string",
            Node::Concat { .. } => "concat",
            Node::Slice { .. } => "slice",
            Node::Match { .. } => "match",
            Node::Codeify { .. } => "codeify",
            Node::Run { .. } => "run",
            Node::Pipe { .. } => "pipe",
            Node::File { .. } => "file",
            Node::Use { .. } => "use",
            Node::Assert { .. } => "assert",
            Node::Error { .. } => "error",
            Node::Log { .. } => "log",
            Node::Length { .. } => "length",
            Node::Find { .. } => "find",
            Node::Escape { .. } => "escape",
            Node::SliceRange { .. } => "slice-range",
        }
    }
}
