//! Low-level scanning primitives for the wpp lexer.
//!
//! - [`SourceBuffer`]: owned copy of the source with a `0x00` sentinel and
//!   zero padding, validated as UTF-8 on construction
//! - [`Cursor`]: `Copy` byte cursor over that buffer; cheap to snapshot,
//!   which is what lets the lexer re-lex a lookahead in a different mode
//! - [`utf8`]: table-driven UTF-8 validation and codepoint helpers

mod cursor;
mod source_buffer;
pub mod utf8;

pub use cursor::{is_whitespace, Cursor};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
