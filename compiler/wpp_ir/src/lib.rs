//! wpp IR - syntax tree and evaluation-time bookkeeping types.
//!
//! This crate contains the data structures shared by the lexer, parser and
//! evaluator:
//! - Spans for source locations
//! - Names for interned identifiers
//! - `NodeId` handles and the append-only node arena
//! - The source map that diagnostics resolve positions against
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers become `Name(u32)`, compared by integer
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId(u32)` indices
//! - **Hold Ids, Not Borrows**: the arena grows while the evaluator walks it
//!   (`eval`/`use` parse more code), so callers re-dereference ids after any
//!   call that may append

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod interner;
mod name;
mod node_id;
mod source;
mod span;

pub use arena::{Arena, Position};
pub use ast::{MatchArm, Node, NodeList, ParamList, SliceFlags};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use node_id::NodeId;
pub use source::{Location, Source, SourceId, SourceMap, SourceMode};
pub use span::{Span, SpanError};
