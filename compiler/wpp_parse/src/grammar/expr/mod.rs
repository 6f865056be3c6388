//! Expression parsing: calls, blocks, `match`, `new`, `pop`, codeify,
//! concatenation and postfix slices.

use wpp_ir::{MatchArm, Node, NodeId, NodeList, SliceFlags};
use wpp_lexer::{LexMode, TokenKind};

use super::{starts_expression, starts_statement};
use crate::{ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `primary slice? (.. expression)?`
    pub(crate) fn expression(&mut self) -> Result<NodeId, ParseError> {
        self.nested(|p| {
            let start = p.lexer.position();
            let mut lhs = p.primary()?;

            if p.peek()? == TokenKind::LBracket {
                lhs = p.slice(lhs, start)?;
            }

            if p.eat(TokenKind::Cat)? {
                let rhs = p.expression()?;
                lhs = p.alloc(Node::Concat { lhs, rhs }, p.span_from(start));
            }

            Ok(lhs)
        })
    }

    fn primary(&mut self) -> Result<NodeId, ParseError> {
        match self.peek()? {
            TokenKind::Identifier => self.call(),
            TokenKind::Quote | TokenKind::DoubleQuote => self.normal_string(),
            TokenKind::Hex | TokenKind::Bin => self.packed_literal(),
            TokenKind::RawStr => self.raw_string(),
            TokenKind::ParaStr => self.para_string(),
            TokenKind::CodeStr => self.code_string(),
            TokenKind::LBrace => self.block(),
            TokenKind::Exclaim => self.codeify(),
            TokenKind::Match => self.match_expr(),
            TokenKind::Pop => self.pop(),
            TokenKind::New => self.new_expr(),
            kind if starts_expression(kind) => self.intrinsic(),
            _ => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.here(),
                "expecting an expression to appear here",
            )),
        }
    }

    /// `name` or `name(args)`. Without an argument list the name is a
    /// variable reference.
    fn call(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.advance()?;
        let name = self.intern(tok);

        if !self.eat(TokenKind::LParen)? {
            return Ok(self.alloc(Node::VarRef { name }, tok.span));
        }

        let args = self.argument_list()?;

        if !self.eat(TokenKind::RParen)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`)`"),
                self.here(),
                "expecting `)` to follow argument list",
            )
            .with_hint("there might be a non-expression token in the argument list"));
        }

        Ok(self.alloc(Node::FnInvoke { name, args }, self.span_from(tok.span.start)))
    }

    /// Expressions separated by optional commas.
    pub(super) fn argument_list(&mut self) -> Result<NodeList, ParseError> {
        let mut args = NodeList::new();
        while starts_expression(self.peek()?) {
            args.push(self.expression()?);
            self.eat(TokenKind::Comma)?;
        }
        Ok(args)
    }

    /// `{ statement* expression }`
    fn block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;

        if self.peek()? == TokenKind::RBrace {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.here(),
                "expecting a trailing expression at the end of block",
            ));
        }

        let mut statements = NodeList::new();
        let mut last_is_expr = false;
        while starts_statement(self.peek()?) {
            last_is_expr = starts_expression(self.peek()?);
            statements.push(self.statement()?);
        }

        let Some(expr) = statements.pop().filter(|_| last_is_expr) else {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                wpp_ir::Span::point(start),
                "expecting a trailing expression at the end of block that begins here",
            ));
        };

        if self.peek()? == TokenKind::Arrow {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedArrow,
                self.here(),
                "found `->` inside a block expression",
            )
            .with_hint("did you forget the test expression for match?"));
        }

        if !self.eat(TokenKind::RBrace)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`}`"),
                wpp_ir::Span::point(start),
                "expecting `}` to terminate block expression that begins here",
            ));
        }

        Ok(self.alloc(Node::Block { statements, expr }, self.span_from(start)))
    }

    /// `match test { pattern -> result ... * -> default }`
    fn match_expr(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;

        if !starts_expression(self.peek()?) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.here(),
                "expecting an expression to follow `match`",
            )
            .with_hint("insert a test expression for `match` to match on"));
        }
        let test = self.expression()?;

        if !self.eat(TokenKind::LBrace)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`{`"),
                self.here(),
                "expecting `{` to begin match expression body",
            ));
        }

        let mut arms = Vec::new();
        while starts_expression(self.peek()?) {
            let pattern = self.expression()?;
            let result = self.arm_result()?;
            arms.push(MatchArm { pattern, result });
        }

        let default = if self.eat(TokenKind::Star)? {
            self.arm_result()?
        } else {
            NodeId::NONE
        };

        if !self.eat(TokenKind::RBrace)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`}`"),
                wpp_ir::Span::point(start),
                "expecting `}` to terminate match expression that begins here",
            ));
        }

        Ok(self.alloc(
            Node::Match {
                test,
                arms,
                default,
            },
            self.span_from(start),
        ))
    }

    /// `-> expression`
    fn arm_result(&mut self) -> Result<NodeId, ParseError> {
        if !self.eat(TokenKind::Arrow)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`->`"),
                self.here(),
                "expecting `->` to denote right hand side of match arm",
            ));
        }

        if !starts_expression(self.peek()?) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.here(),
                "expecting an expression after `->`",
            ));
        }

        self.expression()
    }

    /// `new expression`
    fn new_expr(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;

        if !starts_expression(self.peek()?) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.here(),
                "expecting an expression to follow `new`",
            ));
        }

        let expr = self.expression()?;
        Ok(self.alloc(Node::New { expr }, self.span_from(start)))
    }

    /// `pop name(args, *, ...)`
    fn pop(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;
        let name = self.expect_name("expecting identifier to follow `pop`")?;

        if !self.eat(TokenKind::LParen)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`(`"),
                self.here(),
                "expecting `(` to open argument list",
            ));
        }

        let args = self.argument_list()?;

        if self.peek()? != TokenKind::Star {
            return Err(ParseError::new(
                ParseErrorKind::NoSubstituteArgument,
                wpp_ir::Span::point(start),
                "the function template must specify an argument with which to substitute the popped value",
            )
            .with_hint(
                "insert `*` somewhere in the argument list to specify that the popped value will be passed to that index",
            ));
        }

        let mut n_popped = 0;
        while self.eat(TokenKind::Star)? {
            n_popped += 1;
            self.eat(TokenKind::Comma)?;
        }

        if !self.eat(TokenKind::RParen)? {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`)`"),
                self.here(),
                "expecting `)` to terminate argument list",
            )
            .with_hint("`*` must come at the end of the argument list"));
        }

        Ok(self.alloc(
            Node::Pop {
                name,
                args,
                n_popped,
            },
            self.span_from(start),
        ))
    }

    /// `!expression`
    fn codeify(&mut self) -> Result<NodeId, ParseError> {
        let start = self.advance()?.span.start;

        if !starts_expression(self.peek()?) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                self.here(),
                "expecting an expression to follow `!`",
            )
            .with_hint("insert an expression after `!`"));
        }

        let expr = self.expression()?;
        Ok(self.alloc(Node::Codeify { expr }, self.span_from(start)))
    }

    /// `[i]`, `[start:]`, `[:stop]` or `[start:stop]` after `expr`.
    fn slice(&mut self, expr: NodeId, start: u32) -> Result<NodeId, ParseError> {
        self.advance_in(LexMode::Slice)?;

        let mut flags = SliceFlags::empty();
        let mut lo = 0;
        let mut hi = 0;

        match self.peek_in(LexMode::Slice)?.kind {
            TokenKind::Int => {
                lo = self.slice_int()?;
                if self.peek_in(LexMode::Slice)?.kind == TokenKind::Colon {
                    self.advance_in(LexMode::Slice)?;
                    flags = SliceFlags::START;
                    if self.peek_in(LexMode::Slice)?.kind == TokenKind::Int {
                        hi = self.slice_int()?;
                        flags |= SliceFlags::STOP;
                    }
                } else {
                    flags = SliceFlags::INDEX;
                }
            }
            TokenKind::Colon => {
                self.advance_in(LexMode::Slice)?;
                flags = SliceFlags::STOP;
                if self.peek_in(LexMode::Slice)?.kind != TokenKind::Int {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedInteger,
                        self.here(),
                        "expecting an integer literal for stop index",
                    ));
                }
                hi = self.slice_int()?;
            }
            _ => {}
        }

        if flags.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptySlice,
                self.here(),
                "expecting slice indices or range",
            ));
        }

        if self.peek_in(LexMode::Slice)?.kind != TokenKind::RBracket {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedToken("`]`"),
                self.here(),
                "expecting `]` to terminate string slice",
            ));
        }
        self.advance_in(LexMode::Slice)?;

        Ok(self.alloc(
            Node::Slice {
                expr,
                start: lo,
                stop: hi,
                flags,
            },
            self.span_from(start),
        ))
    }

    fn slice_int(&mut self) -> Result<i64, ParseError> {
        let tok = self.advance_in(LexMode::Slice)?;
        std::str::from_utf8(self.text(tok))
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::ExpectedInteger,
                    tok.span,
                    "integer literal is out of range",
                )
            })
    }
}

#[cfg(test)]
mod tests;
