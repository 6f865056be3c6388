//! Keyword resolution.
//!
//! Uses the identifier's length as a first-pass filter (keywords range
//! from 3 to 6 bytes), then matches against the keywords of that length.

use crate::TokenKind;

/// Look up a reserved keyword by text.
///
/// Returns the corresponding `TokenKind` if the text is a keyword, `None`
/// if it's a regular identifier.
#[inline]
pub fn lookup(text: &[u8]) -> Option<TokenKind> {
    match text.len() {
        3 => match text {
            b"let" => Some(TokenKind::Let),
            b"var" => Some(TokenKind::Var),
            b"map" => Some(TokenKind::Match),
            b"new" => Some(TokenKind::New),
            b"pop" => Some(TokenKind::Pop),
            b"run" => Some(TokenKind::Run),
            b"use" => Some(TokenKind::Use),
            b"log" => Some(TokenKind::Log),
            _ => None,
        },
        4 => match text {
            b"drop" => Some(TokenKind::Drop),
            b"eval" => Some(TokenKind::Eval),
            b"file" => Some(TokenKind::File),
            b"pipe" => Some(TokenKind::Pipe),
            b"find" => Some(TokenKind::Find),
            _ => None,
        },
        5 => match text {
            b"match" => Some(TokenKind::Match),
            b"error" => Some(TokenKind::Error),
            b"slice" => Some(TokenKind::Slice),
            _ => None,
        },
        6 => match text {
            b"prefix" => Some(TokenKind::Prefix),
            b"source" => Some(TokenKind::Use),
            b"assert" => Some(TokenKind::Assert),
            b"escape" => Some(TokenKind::Escape),
            b"length" => Some(TokenKind::Length),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests;
