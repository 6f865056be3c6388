//! Grammar rules.
//!
//! ```text
//! statement  := let | var | drop | intrinsic-stmt | expression
//! expression := primary slice? (`..` expression)?
//! ```
//!
//! Every rule starts with the lookahead on its first token and leaves it on
//! the first token after the construct.

mod expr;
mod intrinsic;
mod string;

use wpp_ir::{Name, Node, NodeId, ParamList};
use wpp_lexer::TokenKind;

use crate::{ParseError, ParseErrorKind, Parser};

/// Tokens that can begin an expression.
pub(crate) fn starts_expression(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier
            | TokenKind::Quote
            | TokenKind::DoubleQuote
            | TokenKind::Hex
            | TokenKind::Bin
            | TokenKind::RawStr
            | TokenKind::ParaStr
            | TokenKind::CodeStr
            | TokenKind::LBrace
            | TokenKind::Exclaim
            | TokenKind::Eval
            | TokenKind::Match
            | TokenKind::Pop
            | TokenKind::New
    ) || is_intrinsic_expr(kind)
}

/// Intrinsics that produce a value.
fn is_intrinsic_expr(kind: TokenKind) -> bool {
    kind.is_intrinsic() && !is_intrinsic_stmt(kind)
}

/// Intrinsics only allowed in statement position.
fn is_intrinsic_stmt(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Assert | TokenKind::Error | TokenKind::Log)
}

/// Tokens that can begin a statement.
pub(crate) fn starts_statement(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Let | TokenKind::Var | TokenKind::Drop)
        || is_intrinsic_stmt(kind)
        || starts_expression(kind)
}

impl Parser<'_> {
    pub(crate) fn statement(&mut self) -> Result<NodeId, ParseError> {
        self.nested(|p| match p.peek()? {
            TokenKind::Let => p.let_def(),
            TokenKind::Var => p.var_def(),
            TokenKind::Drop => p.drop_def(),
            kind if is_intrinsic_stmt(kind) => p.intrinsic(),
            kind if starts_expression(kind) => p.expression(),
            _ => Err(ParseError::new(
                ParseErrorKind::ExpectedStatement,
                p.here(),
                "expecting a statement to appear here",
            )),
        })
    }

    /// An identifier, interned.
    fn expect_name(&mut self, detail: &str) -> Result<Name, ParseError> {
        if self.peek()? != TokenKind::Identifier {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedIdentifier,
                self.here(),
                detail,
            ));
        }
        let tok = self.advance()?;
        Ok(self.intern(tok))
    }

    /// `let name expr` or `let name(params) expr`.
    #[tracing::instrument(level = "trace", skip(self))]
    fn let_def(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;
        let name = self.expect_name("expecting an identifier to follow `let`")?;

        if starts_expression(self.peek()?) {
            let body = self.expression()?;
            return Ok(self.alloc(Node::Var { name, body }, self.span_from(start)));
        }

        if !self.eat(TokenKind::LParen)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`(`"),
                self.here(),
                "expecting `(` to open parameter list",
            ));
        }

        let mut params = ParamList::new();
        while self.peek()? == TokenKind::Identifier {
            let tok = self.advance()?;
            let param = self.intern(tok);
            if params.contains(&param) {
                return Err(ParseError::new(
                    ParseErrorKind::DuplicateParameter,
                    tok.span,
                    "multiple occurrences of the same identifier in parameter list",
                ));
            }
            params.push(param);
            self.eat(TokenKind::Comma)?;
        }

        if self.peek()?.is_reserved() {
            let tok = self.peek_in(wpp_lexer::LexMode::Normal)?;
            return Err(ParseError::new(
                ParseErrorKind::InvalidName,
                tok.span,
                format!(
                    "parameter name '{}' conflicts with keyword of the same name",
                    String::from_utf8_lossy(self.text(tok))
                ),
            ));
        }

        if !self.eat(TokenKind::RParen)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`)`"),
                self.here(),
                "expecting `)` to terminate parameter list",
            )
            .with_hint("there might be a non-identifier token in the parameter list"));
        }

        let body = self.expression()?;
        Ok(self.alloc(Node::Fn { name, params, body }, self.span_from(start)))
    }

    /// `var name expr`
    fn var_def(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;
        let name = self.expect_name("expecting an identifier to follow `var`")?;

        if !starts_expression(self.peek()?) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.here(),
                "expecting an expression to follow the variable name",
            ));
        }

        let body = self.expression()?;
        Ok(self.alloc(Node::Var { name, body }, self.span_from(start)))
    }

    /// `drop name(params)`; only the number of parameters matters.
    fn drop_def(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;
        let name = self.expect_name("expecting identifier to follow `drop`")?;

        if !self.eat(TokenKind::LParen)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`(`"),
                self.here(),
                "expecting `(` to open parameter list",
            ));
        }

        let mut arity = 0;
        while self.peek()? == TokenKind::Identifier {
            self.advance()?;
            arity += 1;
            self.eat(TokenKind::Comma)?;
        }

        if !self.eat(TokenKind::RParen)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`)`"),
                self.here(),
                "expecting `)` to follow argument list",
            )
            .with_hint("there might be a non-identifier token in the argument list"));
        }

        Ok(self.alloc(Node::Drop { name, arity }, self.span_from(start)))
    }
}

#[cfg(test)]
mod tests;
