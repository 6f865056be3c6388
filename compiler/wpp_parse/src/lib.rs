//! Recursive descent parser for wpp.
//!
//! The parser pulls tokens from a [`Lexer`] one at a time and names the
//! lexical mode for every request, so strings, smart strings and slice
//! brackets are tokenized according to where they appear. Nodes go straight
//! into a caller-owned [`Arena`], which may already hold the nodes of other
//! sources: `eval` and `use` parse more text into the same arena while the
//! evaluator is running.
//!
//! # Recovery
//!
//! [`Recovery::Document`] reports an error and keeps going at the next
//! statement, so one pass surfaces several independent errors. Statements
//! that parse are kept in the document. [`Recovery::None`] stops at the first
//! error; it is used for text re-parsed at run time.

mod error;
mod grammar;
#[cfg(test)]
mod test_helpers;

pub use error::{ParseError, ParseErrorKind};

use tracing::debug;
use wpp_diagnostic::{Diagnostic, ReportKind, WarningFlags, WarningKind, MAX_ERRORS, MAX_EXPR_DEPTH};
use wpp_ir::{Arena, Name, Node, NodeId, NodeList, Position, SourceId, Span, StringInterner};
use wpp_lexer::{LexMode, Lexer, Token, TokenKind};
use wpp_lexer_core::SourceBuffer;
use wpp_stack::Depth;

/// How to continue after a syntax error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Report and resynchronize at the next statement.
    Document,
    /// Stop at the first error.
    None,
}

/// Result of parsing one source.
#[derive(Debug)]
pub struct ParseOutput {
    /// The `Document` node, or [`NodeId::NONE`] when the text could not be
    /// lexed at all.
    pub root: NodeId,
    /// Reported errors, in source order. At most [`MAX_ERRORS`].
    pub errors: Vec<ParseError>,
    /// Errors found after [`MAX_ERRORS`] had been reported.
    pub suppressed: usize,
    /// Parse-time warnings (deep nesting).
    pub warnings: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse `buffer` as a document into `arena`.
#[tracing::instrument(level = "debug", skip_all, fields(source = source.index()))]
pub fn parse(
    buffer: &SourceBuffer,
    arena: &mut Arena,
    interner: &StringInterner,
    source: SourceId,
    warnings: WarningFlags,
    recovery: Recovery,
) -> ParseOutput {
    let lexer = match Lexer::new(buffer) {
        Ok(lexer) => lexer,
        Err(err) => {
            return ParseOutput {
                root: NodeId::NONE,
                errors: vec![err.into()],
                suppressed: 0,
                warnings: Vec::new(),
            }
        }
    };

    let parser = Parser {
        lexer,
        arena,
        interner,
        source,
        flags: warnings,
        depth: Depth::new(MAX_EXPR_DEPTH),
        prev_end: 0,
        source_len: buffer.len(),
        warned_deep: false,
        warnings: Vec::new(),
    };
    parser.document(recovery)
}

/// Parser state.
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    arena: &'a mut Arena,
    interner: &'a StringInterner,
    source: SourceId,
    flags: WarningFlags,
    depth: Depth,
    /// End offset of the last consumed token.
    prev_end: u32,
    source_len: u32,
    warned_deep: bool,
    warnings: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    // === Token access ===

    #[inline]
    fn peek(&mut self) -> Result<TokenKind, ParseError> {
        Ok(self.lexer.peek(LexMode::Normal)?.kind)
    }

    #[inline]
    fn peek_in(&mut self, mode: LexMode) -> Result<Token, ParseError> {
        Ok(self.lexer.peek(mode)?)
    }

    #[inline]
    fn advance(&mut self) -> Result<Token, ParseError> {
        self.advance_in(LexMode::Normal)
    }

    fn advance_in(&mut self, mode: LexMode) -> Result<Token, ParseError> {
        let tok = self.lexer.advance(mode)?;
        self.prev_end = tok.span.end;
        Ok(tok)
    }

    /// Consume the lookahead if it is `kind`.
    fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.peek()? == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Span of the lookahead token, used to locate "expected ..." errors.
    fn here(&self) -> Span {
        Span::point(self.lexer.position())
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    fn text(&self, tok: Token) -> &'a [u8] {
        self.lexer.text(tok)
    }

    fn intern(&self, tok: Token) -> Name {
        self.interner.intern(&String::from_utf8_lossy(self.text(tok)))
    }

    // === Node construction ===

    /// Add a node and adopt its children.
    fn alloc(&mut self, node: Node, span: Span) -> NodeId {
        let position = Position {
            source: self.source,
            span,
            parent: NodeId::NONE,
        };
        let mut children = NodeList::new();
        node.for_each_child(|child| children.push(child));
        let id = self.arena.add(node, position);
        for child in children {
            self.arena.set_parent(child, id);
        }
        id
    }

    // === Warnings ===

    /// Count one level of statement/expression nesting.
    fn enter_nesting(&mut self) {
        if self.depth.enter()
            && !self.warned_deep
            && self.flags.enabled(WarningKind::DeepExpression)
        {
            self.warned_deep = true;
            self.warnings.push(
                Diagnostic::warning(ReportKind::Syntax, WarningKind::DeepExpression)
                    .at(self.source, self.here())
                    .with_detail(format!(
                        "the nested expression depth has grown to >= {MAX_EXPR_DEPTH}"
                    ))
                    .with_hint("this may indicate deeply nested expressions"),
            );
        }
    }

    /// Run `f` one nesting level deeper, growing the stack if needed.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.enter_nesting();
        let result = wpp_stack::ensure_sufficient_stack(|| f(self));
        self.depth.exit();
        result
    }

    // === Document ===

    fn document(mut self, recovery: Recovery) -> ParseOutput {
        let mut statements = NodeList::new();
        let mut errors = Vec::new();
        let mut suppressed = 0usize;
        // Offset of the last reported error while skipping a broken statement.
        let mut resync_at: Option<u32> = None;

        loop {
            match self.peek() {
                Ok(TokenKind::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    Self::report(&mut errors, &mut suppressed, err);
                    break;
                }
            }

            match self.statement() {
                Ok(stmt) => {
                    statements.push(stmt);
                    resync_at = None;
                }
                Err(err) if err.is_fatal() || recovery == Recovery::None => {
                    Self::report(&mut errors, &mut suppressed, err);
                    break;
                }
                Err(err) => {
                    if resync_at == Some(err.span.start) {
                        // Failed again on the reported token: drop it and retry.
                        debug!(at = err.span.start, "resync");
                        if let Err(err) = self.advance() {
                            Self::report(&mut errors, &mut suppressed, err);
                            break;
                        }
                    } else {
                        resync_at = Some(err.span.start);
                        Self::report(&mut errors, &mut suppressed, err);
                    }
                }
            }
        }

        let root = self.alloc(
            Node::Document { statements },
            Span::new(0, self.source_len),
        );
        ParseOutput {
            root,
            errors,
            suppressed,
            warnings: self.warnings,
        }
    }

    fn report(errors: &mut Vec<ParseError>, suppressed: &mut usize, err: ParseError) {
        debug!(error = %err.kind, at = err.span.start, "parse error");
        if errors.len() < MAX_ERRORS {
            errors.push(err);
        } else {
            *suppressed += 1;
        }
    }
}
