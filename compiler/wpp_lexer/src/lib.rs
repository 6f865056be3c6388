//! Lexer for wpp.
//!
//! The lexer is driven by the parser: every [`Lexer::peek`] and
//! [`Lexer::advance`] names the [`LexMode`] to scan in, and a lookahead
//! token that was scanned in a different mode is re-scanned from its start.
//! The same bytes therefore tokenize differently inside a string, a smart
//! string, a slice bracket or normal code.
//!
//! - [`keywords`]: reserved words
//! - [`escape`]: backslash escapes inside strings
//! - [`literal`]: `0x`/`0b` literal packing

mod escape;
mod keywords;
mod lex_error;
mod lexer;
mod literal;
mod token;

pub use escape::simple_escape;
pub use keywords::lookup as lookup_keyword;
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::Lexer;
pub use literal::{pack_bin, pack_hex};
pub use token::{LexMode, Token, TokenKind};
