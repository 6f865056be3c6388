//! The mode-switching lexer.
//!
//! Holds one token of lookahead together with the mode it was scanned in.
//! Asking for the lookahead in another mode rewinds to the token's start
//! and scans again, which is how the parser moves between code, strings
//! and slice brackets without a separate tokenization pass.

use tracing::trace;
use wpp_ir::Span;
use wpp_lexer_core::{is_whitespace, Cursor, EncodingIssueKind, SourceBuffer};

use crate::escape::{decode_bin_escape, decode_hex_escape, simple_escape};
use crate::{keywords, LexError, LexErrorKind, LexMode, Token, TokenKind};

/// Lexer over one source buffer.
pub struct Lexer<'a> {
    /// Positioned just past `lookahead`.
    cursor: Cursor<'a>,
    lookahead: Token,
    lookahead_mode: LexMode,
}

impl<'a> Lexer<'a> {
    /// Validate the buffer and scan the first token in [`LexMode::Normal`].
    ///
    /// Encoding problems are reported before any token is produced.
    pub fn new(buffer: &'a SourceBuffer) -> Result<Self, LexError> {
        if let Some(issue) = buffer.encoding_issues().first() {
            let kind = match issue.kind {
                EncodingIssueKind::InvalidUtf8 => LexErrorKind::InvalidUtf8,
                EncodingIssueKind::InteriorNull => LexErrorKind::InteriorNull,
            };
            return Err(LexError::new(kind, Span::point(issue.pos)));
        }

        let mut lexer = Lexer {
            cursor: buffer.cursor(),
            lookahead: Token::new(TokenKind::Eof, Span::point(0)),
            lookahead_mode: LexMode::Normal,
        };
        lexer.lookahead = lexer.next_token(LexMode::Normal)?;
        Ok(lexer)
    }

    /// The next token, scanned in `mode`.
    pub fn peek(&mut self, mode: LexMode) -> Result<Token, LexError> {
        if mode != self.lookahead_mode {
            self.cursor.seek(self.lookahead.span.start);
            self.lookahead = self.next_token(mode)?;
            self.lookahead_mode = mode;
        }
        Ok(self.lookahead)
    }

    /// Consume the next token (scanned in `mode`) and scan the one after it
    /// in the same mode.
    pub fn advance(&mut self, mode: LexMode) -> Result<Token, LexError> {
        let tok = self.peek(mode)?;
        self.lookahead = self.next_token(mode)?;
        trace!(kind = ?tok.kind, start = tok.span.start, ?mode, "advance");
        Ok(tok)
    }

    /// Source text of a token.
    pub fn text(&self, tok: Token) -> &'a [u8] {
        self.cursor.slice(tok.span.start, tok.span.end)
    }

    /// Byte offset of the lookahead token.
    pub fn position(&self) -> u32 {
        self.lookahead.span.start
    }

    fn next_token(&mut self, mode: LexMode) -> Result<Token, LexError> {
        match mode {
            LexMode::Normal => self.lex_normal(),
            LexMode::String => self.lex_string(),
            LexMode::StringRaw => Ok(self.lex_raw()),
            LexMode::StringPara | LexMode::StringCode => self.lex_smart_body(),
            LexMode::Char => Ok(self.lex_char()),
            LexMode::Slice => Ok(self.lex_slice()),
        }
    }

    fn token(&self, kind: TokenKind, start: u32) -> Token {
        Token::new(kind, Span::new(start, self.cursor.pos()))
    }

    fn simple(&mut self, kind: TokenKind, start: u32, len: u32) -> Token {
        self.cursor.advance_n(len);
        self.token(kind, start)
    }

    /// `'` or `"` at the cursor.
    fn quote(&mut self, start: u32) -> Option<Token> {
        match self.cursor.current() {
            b'\'' => Some(self.simple(TokenKind::Quote, start, 1)),
            b'"' => Some(self.simple(TokenKind::DoubleQuote, start, 1)),
            _ => None,
        }
    }

    // === Normal mode ===

    fn lex_normal(&mut self) -> Result<Token, LexError> {
        loop {
            let start = self.cursor.pos();
            if self.cursor.is_eof() {
                return Ok(self.token(TokenKind::Eof, start));
            }
            if let Some(tok) = self.quote(start) {
                return Ok(tok);
            }

            let c = self.cursor.current();
            let next = self.cursor.peek();
            let tok = match c {
                b'#' if next == b'[' => {
                    self.skip_block_comment(start)?;
                    continue;
                }
                b'#' => {
                    self.cursor.eat_until_newline_or_eof();
                    continue;
                }
                c if is_whitespace(c) => {
                    self.cursor.eat_whitespace();
                    continue;
                }
                b'r' | b'p' | b'c' => self.lex_smart_or_identifier(start),
                b'0' if next == b'x' => self.lex_literal(TokenKind::Hex, start, u8::is_ascii_hexdigit),
                b'0' if next == b'b' => self.lex_literal(TokenKind::Bin, start, |b: &u8| matches!(*b, b'0' | b'1')),
                b'.' if next == b'.' => self.simple(TokenKind::Cat, start, 2),
                b'-' if next == b'>' => self.simple(TokenKind::Arrow, start, 2),
                b',' => self.simple(TokenKind::Comma, start, 1),
                b'|' => self.simple(TokenKind::Bar, start, 1),
                b'=' => self.simple(TokenKind::Equal, start, 1),
                b'!' => self.simple(TokenKind::Exclaim, start, 1),
                b'*' => self.simple(TokenKind::Star, start, 1),
                b'(' => self.simple(TokenKind::LParen, start, 1),
                b')' => self.simple(TokenKind::RParen, start, 1),
                b'{' => self.simple(TokenKind::LBrace, start, 1),
                b'}' => self.simple(TokenKind::RBrace, start, 1),
                b'[' => self.simple(TokenKind::LBracket, start, 1),
                b']' => self.simple(TokenKind::RBracket, start, 1),
                _ => self.lex_identifier(start),
            };
            return Ok(tok);
        }
    }

    /// Skip a nestable `#[ ... ]` comment.
    fn skip_block_comment(&mut self, start: u32) -> Result<(), LexError> {
        self.cursor.advance_n(2);
        let mut depth = 1usize;

        while depth > 0 {
            if self.cursor.is_eof() {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedComment,
                    Span::new(start, start + 2),
                ));
            }
            if self.cursor.starts_with(b"#[") {
                depth += 1;
                self.cursor.advance_n(2);
            } else {
                if self.cursor.current() == b']' {
                    depth -= 1;
                }
                self.cursor.advance();
            }
        }
        Ok(())
    }

    /// `r`, `p` or `c`, a non-whitespace delimiter character and a quote
    /// open a smart string. Anything else is an identifier.
    fn lex_smart_or_identifier(&mut self, start: u32) -> Token {
        let kind = match self.cursor.current() {
            b'r' => TokenKind::RawStr,
            b'p' => TokenKind::ParaStr,
            _ => TokenKind::CodeStr,
        };

        let mut probe = self.cursor;
        probe.advance();
        let delim = probe.current();
        if probe.is_eof() || is_whitespace(delim) {
            return self.lex_identifier(start);
        }
        probe.advance_char();
        if !matches!(probe.current(), b'\'' | b'"') {
            return self.lex_identifier(start);
        }

        let delim_end = probe.pos();
        self.cursor.seek(delim_end);
        self.token(kind, start)
    }

    fn lex_literal(&mut self, kind: TokenKind, start: u32, digit: impl Fn(&u8) -> bool) -> Token {
        self.cursor.advance_n(2);
        self.cursor.eat_while(|b| digit(&b) || b == b'_');
        self.token(kind, start)
    }

    fn lex_identifier(&mut self, start: u32) -> Token {
        loop {
            let c = self.cursor.current();
            let stop = self.cursor.is_eof()
                || is_whitespace(c)
                || matches!(c, b'(' | b')' | b'{' | b'}' | b'[' | b']' | b',' | b'\'' | b'"')
                || self.cursor.starts_with(b"..")
                || self.cursor.starts_with(b"#[");
            if stop {
                break;
            }
            self.cursor.advance_char();
        }

        let text = self.cursor.slice_from(start);
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Identifier);
        self.token(kind, start)
    }

    // === String modes ===

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return Ok(self.token(TokenKind::Eof, start));
        }
        if let Some(tok) = self.quote(start) {
            return Ok(tok);
        }
        if self.cursor.current() == b'\\' {
            return self.lex_escape(start);
        }
        self.cursor.advance();
        self.cursor.skip_to_string_delim();
        Ok(self.token(TokenKind::Text, start))
    }

    fn lex_raw(&mut self) -> Token {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return self.token(TokenKind::Eof, start);
        }
        if let Some(tok) = self.quote(start) {
            return tok;
        }
        self.cursor.skip_to_quote();
        self.token(TokenKind::Text, start)
    }

    /// Paragraph and code strings: whitespace runs and line breaks are
    /// separate tokens so the parser can reflow them.
    fn lex_smart_body(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return Ok(self.token(TokenKind::Eof, start));
        }
        if let Some(tok) = self.quote(start) {
            return Ok(tok);
        }

        match self.cursor.current() {
            b'\\' => self.lex_escape(start),
            b'\n' => Ok(self.simple(TokenKind::Newline, start, 1)),
            b'\r' if self.cursor.peek() == b'\n' => Ok(self.simple(TokenKind::Newline, start, 2)),
            b' ' | b'\t' | b'\r' => {
                self.cursor.eat_while(|b| matches!(b, b' ' | b'\t' | b'\r'));
                Ok(self.token(TokenKind::Whitespace, start))
            }
            _ => {
                self.cursor.eat_while(|b| {
                    !matches!(b, b'\\' | b'\'' | b'"' | b'\n' | b'\r' | b' ' | b'\t')
                });
                Ok(self.token(TokenKind::Text, start))
            }
        }
    }

    /// A backslash sequence. Unknown escapes produce a one-byte text token
    /// for the backslash itself.
    fn lex_escape(&mut self, start: u32) -> Result<Token, LexError> {
        let c = self.cursor.peek();

        if let Some(byte) = simple_escape(c) {
            return Ok(self.simple(TokenKind::EscapeSeq(byte), start, 2));
        }

        match c {
            b'x' => {
                let rest = self.cursor.slice(start + 2, start + 4);
                let digits = <[u8; 2]>::try_from(rest).ok();
                let byte = digits.and_then(decode_hex_escape).ok_or_else(|| {
                    LexError::new(LexErrorKind::InvalidHexEscape, self.escape_span(start, 4))
                })?;
                Ok(self.simple(TokenKind::EscapeSeq(byte), start, 4))
            }
            b'b' => {
                let rest = self.cursor.slice(start + 2, start + 10);
                let digits = <[u8; 8]>::try_from(rest).ok();
                let byte = digits.and_then(decode_bin_escape).ok_or_else(|| {
                    LexError::new(LexErrorKind::InvalidBinEscape, self.escape_span(start, 10))
                })?;
                Ok(self.simple(TokenKind::EscapeSeq(byte), start, 10))
            }
            _ => Ok(self.simple(TokenKind::Text, start, 1)),
        }
    }

    fn escape_span(&self, start: u32, len: u32) -> Span {
        Span::new(start, (start + len).min(self.cursor.source_len()))
    }

    // === Char and slice modes ===

    fn lex_char(&mut self) -> Token {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return self.token(TokenKind::Eof, start);
        }
        self.cursor.advance_char();
        self.token(TokenKind::Char, start)
    }

    fn lex_slice(&mut self) -> Token {
        self.cursor.eat_whitespace();
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return self.token(TokenKind::Eof, start);
        }

        match self.cursor.current() {
            b':' => self.simple(TokenKind::Colon, start, 1),
            b']' => self.simple(TokenKind::RBracket, start, 1),
            b'-' if self.cursor.peek().is_ascii_digit() => {
                self.cursor.advance();
                self.cursor.eat_while(|b| b.is_ascii_digit());
                self.token(TokenKind::Int, start)
            }
            c if c.is_ascii_digit() => {
                self.cursor.eat_while(|b| b.is_ascii_digit());
                self.token(TokenKind::Int, start)
            }
            _ => {
                self.cursor.advance_char();
                self.token(TokenKind::Unknown, start)
            }
        }
    }
}
