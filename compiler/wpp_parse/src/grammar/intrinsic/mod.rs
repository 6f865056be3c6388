//! Intrinsic calls.
//!
//! Each intrinsic takes a fixed number of arguments, written either in
//! parentheses (`pipe("cmd", data)`) or bare (`pipe "cmd" data`). The
//! parenthesised form is checked against the expected count.

use wpp_ir::{Node, NodeId, NodeList};
use wpp_lexer::TokenKind;

use super::starts_expression;
use crate::{ParseError, ParseErrorKind, Parser};

/// Number of arguments an intrinsic keyword takes.
fn arity(kind: TokenKind) -> usize {
    match kind {
        TokenKind::Pipe | TokenKind::Assert | TokenKind::Find => 2,
        TokenKind::Slice => 3,
        _ => 1,
    }
}

impl Parser<'_> {
    #[tracing::instrument(level = "trace", skip(self))]
    pub(super) fn intrinsic(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.advance()?;
        let start = tok.span.start;
        let expected = arity(tok.kind);
        let spelled = String::from_utf8_lossy(self.text(tok)).into_owned();

        let args = if self.eat(TokenKind::LParen)? {
            let args = self.argument_list()?;
            if !self.eat(TokenKind::RParen)? {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedToken("`)`"),
                    self.here(),
                    "expecting `)` to terminate argument list",
                ));
            }
            if args.len() != expected {
                return Err(ParseError::new(
                    ParseErrorKind::IncorrectArgumentCount,
                    self.span_from(start),
                    format!(
                        "`{spelled}` takes {expected} argument{}, found {}",
                        if expected == 1 { "" } else { "s" },
                        args.len()
                    ),
                ));
            }
            args
        } else {
            let mut args = NodeList::new();
            for _ in 0..expected {
                if !starts_expression(self.peek()?) {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedExpression,
                        self.here(),
                        format!("expecting an argument for `{spelled}`"),
                    ));
                }
                args.push(self.expression()?);
            }
            args
        };

        let node = match tok.kind {
            TokenKind::Run => Node::Run { cmd: args[0] },
            TokenKind::Pipe => Node::Pipe {
                cmd: args[0],
                data: args[1],
            },
            TokenKind::File => Node::File { path: args[0] },
            TokenKind::Use => Node::Use { path: args[0] },
            TokenKind::Assert => Node::Assert {
                lhs: args[0],
                rhs: args[1],
            },
            TokenKind::Error => Node::Error { msg: args[0] },
            TokenKind::Log => Node::Log { msg: args[0] },
            TokenKind::Length => Node::Length { expr: args[0] },
            TokenKind::Find => Node::Find {
                haystack: args[0],
                needle: args[1],
            },
            TokenKind::Escape => Node::Escape { expr: args[0] },
            TokenKind::Slice => Node::SliceRange {
                expr: args[0],
                start: args[1],
                end: args[2],
            },
            _ => Node::Codeify { expr: args[0] },
        };

        Ok(self.alloc(node, self.span_from(start)))
    }
}

#[cfg(test)]
mod tests;
