//! Shared test harness: parse a snippet and render nodes as s-expressions.

use std::fmt::Write;

use wpp_diagnostic::WarningFlags;
use wpp_ir::{Arena, Node, NodeId, SliceFlags, SourceId, StringInterner};
use wpp_lexer_core::SourceBuffer;

use crate::{parse, ParseError, ParseOutput, Recovery};

pub(crate) struct Parsed {
    pub arena: Arena,
    pub interner: StringInterner,
    pub out: ParseOutput,
}

pub(crate) fn parse_with(src: &[u8], recovery: Recovery) -> Parsed {
    let mut arena = Arena::new();
    let interner = StringInterner::new();
    let buffer = SourceBuffer::new(src);
    let out = parse(
        &buffer,
        &mut arena,
        &interner,
        SourceId::new(0),
        WarningFlags::default(),
        recovery,
    );
    Parsed {
        arena,
        interner,
        out,
    }
}

/// Parse with document recovery and expect no errors.
pub(crate) fn parse_ok(src: &str) -> Parsed {
    let parsed = parse_with(src.as_bytes(), Recovery::Document);
    assert!(
        parsed.out.errors.is_empty(),
        "unexpected errors for {src:?}: {:?}",
        parsed.out.errors
    );
    parsed
}

/// Parse without recovery and return the first error.
pub(crate) fn parse_err(src: &str) -> ParseError {
    let parsed = parse_with(src.as_bytes(), Recovery::None);
    parsed
        .out
        .errors
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no error for {src:?}"))
}

/// Render the whole document, one statement per line.
pub(crate) fn render(src: &str) -> String {
    let parsed = parse_ok(src);
    parsed.render_root()
}

/// Render the value of a single string-literal statement.
pub(crate) fn string_value(src: &str) -> Vec<u8> {
    let parsed = parse_ok(src);
    let stmts = parsed.statements();
    assert_eq!(stmts.len(), 1, "expected one statement in {src:?}");
    match parsed.arena.get(stmts[0]) {
        Node::String { value } => value.clone(),
        other => panic!("expected string, got {other:?}"),
    }
}

impl Parsed {
    pub fn statements(&self) -> Vec<NodeId> {
        match self.arena.get(self.out.root) {
            Node::Document { statements } => statements.to_vec(),
            other => panic!("root is not a document: {other:?}"),
        }
    }

    pub fn render_root(&self) -> String {
        self.statements()
            .into_iter()
            .map(|id| self.render(id))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self, id: NodeId) -> String {
        let name = |n| self.interner.lookup(n);
        let list = |ids: &[NodeId]| {
            ids.iter()
                .map(|&id| self.render(id))
                .collect::<Vec<_>>()
                .join(" ")
        };

        match self.arena.get(id) {
            Node::Document { statements } => format!("(doc {})", list(statements)),
            Node::Block { statements, expr } => {
                if statements.is_empty() {
                    format!("(block {})", self.render(*expr))
                } else {
                    format!("(block {} => {})", list(statements), self.render(*expr))
                }
            }
            Node::Fn { name: n, params, body } => {
                let params: Vec<_> = params.iter().map(|&p| name(p)).collect();
                format!("(let {}({}) {})", name(*n), params.join(" "), self.render(*body))
            }
            Node::Var { name: n, body } => format!("(let {} {})", name(*n), self.render(*body)),
            Node::VarRef { name: n } => name(*n).to_string(),
            Node::FnInvoke { name: n, args } => format!("{}({})", name(*n), list(args)),
            Node::Drop { name: n, arity } => format!("(drop {}/{arity})", name(*n)),
            Node::New { expr } => format!("(new {})", self.render(*expr)),
            Node::Pop {
                name: n,
                args,
                n_popped,
            } => format!("(pop {}({}) *{n_popped})", name(*n), list(args)),
            Node::String { value } => format!("{:?}", String::from_utf8_lossy(value)),
            Node::Concat { lhs, rhs } => {
                format!("(.. {} {})", self.render(*lhs), self.render(*rhs))
            }
            Node::Slice {
                expr,
                start,
                stop,
                flags,
            } => {
                let mut range = String::new();
                if flags.contains(SliceFlags::INDEX) {
                    let _ = write!(range, "{start}");
                } else {
                    if flags.contains(SliceFlags::START) {
                        let _ = write!(range, "{start}");
                    }
                    range.push(':');
                    if flags.contains(SliceFlags::STOP) {
                        let _ = write!(range, "{stop}");
                    }
                }
                format!("{}[{range}]", self.render(*expr))
            }
            Node::Match {
                test,
                arms,
                default,
            } => {
                let mut out = format!("(match {}", self.render(*test));
                for arm in arms {
                    let _ = write!(
                        out,
                        " ({} -> {})",
                        self.render(arm.pattern),
                        self.render(arm.result)
                    );
                }
                if default.is_present() {
                    let _ = write!(out, " (* -> {})", self.render(*default));
                }
                out.push(')');
                out
            }
            Node::Codeify { expr } => format!("(! {})", self.render(*expr)),
            Node::Run { cmd } => format!("(run {})", self.render(*cmd)),
            Node::Pipe { cmd, data } => {
                format!("(pipe {} {})", self.render(*cmd), self.render(*data))
            }
            Node::File { path } => format!("(file {})", self.render(*path)),
            Node::Use { path } => format!("(use {})", self.render(*path)),
            Node::Assert { lhs, rhs } => {
                format!("(assert {} {})", self.render(*lhs), self.render(*rhs))
            }
            Node::Error { msg } => format!("(error {})", self.render(*msg)),
            Node::Log { msg } => format!("(log {})", self.render(*msg)),
            Node::Length { expr } => format!("(length {})", self.render(*expr)),
            Node::Find { haystack, needle } => {
                format!("(find {} {})", self.render(*haystack), self.render(*needle))
            }
            Node::Escape { expr } => format!("(escape {})", self.render(*expr)),
            Node::SliceRange { expr, start, end } => format!(
                "(slice {} {} {})",
                self.render(*expr),
                self.render(*start),
                self.render(*end)
            ),
        }
    }
}
