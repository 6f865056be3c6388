//! String literals.
//!
//! - `"..."` / `'...'`: escapes decoded, the other quote is literal
//! - `0x..` / `0b..`: packed bytes
//! - `r<d>"...."<d>`: raw, no escapes
//! - `p<d>"...."<d>`: paragraph, whitespace reflowed
//! - `c<d>"...."<d>`: code, common indentation stripped
//!
//! Smart strings end at their opening quote immediately followed by the
//! delimiter character `<d>`; any other quote is content.

use wpp_ir::{Node, NodeId, Span};
use wpp_lexer::{pack_bin, pack_hex, LexMode, Token, TokenKind};

use crate::{ParseError, ParseErrorKind, Parser};

/// One lexical piece of a paragraph or code string body.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Text(Vec<u8>),
    Whitespace(Vec<u8>),
    Newline(Vec<u8>),
}

impl<'a> Parser<'a> {
    pub(super) fn normal_string(&mut self) -> Result<NodeId, ParseError> {
        let open = self.advance_in(LexMode::String)?;
        let mut value = Vec::new();

        loop {
            let tok = self.peek_in(LexMode::String)?;
            match tok.kind {
                kind if kind == open.kind => break,
                TokenKind::Eof => {
                    return Err(unterminated(open.span, "string literal"));
                }
                TokenKind::EscapeSeq(byte) => value.push(byte),
                _ => value.extend_from_slice(self.text(tok)),
            }
            self.advance_in(LexMode::String)?;
        }
        self.advance()?;

        Ok(self.alloc(Node::String { value }, self.span_from(open.span.start)))
    }

    /// `0x...` or `0b...`
    pub(super) fn packed_literal(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.advance()?;
        let digits = self.text(tok).get(2..).unwrap_or_default();
        let value = if tok.kind == TokenKind::Hex {
            pack_hex(digits)
        } else {
            pack_bin(digits)
        };
        Ok(self.alloc(Node::String { value }, tok.span))
    }

    pub(super) fn raw_string(&mut self) -> Result<NodeId, ParseError> {
        let (smart, delim, quote) = self.open_smart(LexMode::StringRaw)?;
        let mut value = Vec::new();

        loop {
            let tok = self.peek_in(LexMode::StringRaw)?;
            if tok.kind == TokenKind::Eof {
                return Err(unterminated(smart.span, "raw string literal"));
            }

            let tok = self.advance_in(LexMode::StringRaw)?;
            if tok.kind == quote && self.close_smart(delim)? {
                break;
            }
            value.extend_from_slice(self.text(tok));
        }

        Ok(self.alloc(Node::String { value }, self.span_from(smart.span.start)))
    }

    pub(super) fn para_string(&mut self) -> Result<NodeId, ParseError> {
        let (smart, delim, quote) = self.open_smart(LexMode::StringPara)?;
        let pieces = self.smart_pieces(
            LexMode::StringPara,
            smart,
            delim,
            quote,
            "paragraph string literal",
        )?;
        let value = reflow_paragraph(pieces);
        Ok(self.alloc(Node::String { value }, self.span_from(smart.span.start)))
    }

    pub(super) fn code_string(&mut self) -> Result<NodeId, ParseError> {
        let (smart, delim, quote) = self.open_smart(LexMode::StringCode)?;
        let pieces =
            self.smart_pieces(LexMode::StringCode, smart, delim, quote, "code string literal")?;
        let value = dedent_code(pieces);
        Ok(self.alloc(Node::String { value }, self.span_from(smart.span.start)))
    }

    /// Consume the smart prefix and the opening quote. Returns the prefix
    /// token, the delimiter text and the quote kind.
    fn open_smart(&mut self, mode: LexMode) -> Result<(Token, &'a [u8], TokenKind), ParseError> {
        let smart = self.advance()?;
        let delim = self.text(smart).get(1..).unwrap_or_default();
        let quote = self.advance_in(mode)?.kind;
        Ok((smart, delim, quote))
    }

    /// After a quote: consume the delimiter if it follows.
    fn close_smart(&mut self, delim: &[u8]) -> Result<bool, ParseError> {
        let tok = self.peek_in(LexMode::Char)?;
        if tok.kind == TokenKind::Char && self.text(tok) == delim {
            self.advance_in(LexMode::Char)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Body of a paragraph or code string, up to and including the closing
    /// quote and delimiter.
    fn smart_pieces(
        &mut self,
        mode: LexMode,
        smart: Token,
        delim: &[u8],
        quote: TokenKind,
        what: &str,
    ) -> Result<Vec<Piece>, ParseError> {
        let mut pieces = Vec::new();

        loop {
            let tok = self.peek_in(mode)?;
            if tok.kind == TokenKind::Eof {
                return Err(unterminated(smart.span, what));
            }

            let tok = self.advance_in(mode)?;
            let piece = match tok.kind {
                kind if kind == quote => {
                    if self.close_smart(delim)? {
                        return Ok(pieces);
                    }
                    Piece::Text(self.text(tok).to_vec())
                }
                TokenKind::EscapeSeq(byte) => Piece::Text(vec![byte]),
                TokenKind::Whitespace => Piece::Whitespace(self.text(tok).to_vec()),
                TokenKind::Newline => Piece::Newline(self.text(tok).to_vec()),
                _ => Piece::Text(self.text(tok).to_vec()),
            };
            pieces.push(piece);
        }
    }
}

#[cold]
fn unterminated(open: Span, what: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnterminatedString,
        open,
        format!("reached EOF while parsing {what} that begins here"),
    )
}

/// Paragraph layout.
///
/// Leading whitespace is dropped. A line break replaces any whitespace (or
/// line break) right before it and swallows the indentation after it. Runs
/// of one whitespace character collapse to a single one. Trailing
/// whitespace is trimmed.
fn reflow_paragraph(pieces: Vec<Piece>) -> Vec<u8> {
    // (bytes, is_whitespace)
    let mut chunks: Vec<(Vec<u8>, bool)> = Vec::new();
    let mut pieces = pieces
        .into_iter()
        .skip_while(|piece| !matches!(piece, Piece::Text(_)))
        .peekable();

    while let Some(piece) = pieces.next() {
        match piece {
            Piece::Newline(bytes) => {
                if chunks.last().is_some_and(|(_, ws)| *ws) {
                    chunks.pop();
                }
                chunks.push((bytes, true));
                pieces.next_if(|next| matches!(next, Piece::Whitespace(_)));
            }
            Piece::Whitespace(mut bytes) => {
                bytes.dedup();
                chunks.push((bytes, true));
            }
            Piece::Text(bytes) => chunks.push((bytes, false)),
        }
    }

    let keep = chunks.iter().rposition(|(_, ws)| !ws).map_or(0, |i| i + 1);
    chunks.truncate(keep);
    chunks.into_iter().flat_map(|(bytes, _)| bytes).collect()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ChunkKind {
    /// Indentation at the start of a line.
    Leading,
    Newline,
    Whitespace,
    Other,
}

/// Code layout.
///
/// Blank lines before the first text are removed, everything after the
/// last text is removed, and the smallest indentation is stripped from
/// every line.
fn dedent_code(pieces: Vec<Piece>) -> Vec<u8> {
    let mut chunks: Vec<(Vec<u8>, ChunkKind)> = Vec::new();
    let mut pieces = pieces.into_iter().peekable();

    // Whitespace at the very start is indentation unless more whitespace
    // follows it.
    if let Some(Piece::Whitespace(bytes)) =
        pieces.next_if(|piece| matches!(piece, Piece::Whitespace(_)))
    {
        let kind = match pieces.peek() {
            Some(Piece::Whitespace(_) | Piece::Newline(_)) => ChunkKind::Whitespace,
            _ => ChunkKind::Leading,
        };
        chunks.push((bytes, kind));
    }

    while let Some(piece) = pieces.next() {
        match piece {
            Piece::Newline(bytes) => {
                chunks.push((bytes, ChunkKind::Newline));
                let indent = match pieces.next_if(|next| matches!(next, Piece::Whitespace(_))) {
                    Some(Piece::Whitespace(bytes)) => bytes,
                    _ => Vec::new(),
                };
                chunks.push((indent, ChunkKind::Leading));
            }
            Piece::Whitespace(bytes) => chunks.push((bytes, ChunkKind::Whitespace)),
            Piece::Text(bytes) => chunks.push((bytes, ChunkKind::Other)),
        }
    }

    // Drop everything up to the last line break before the first text.
    let first_text = chunks
        .iter()
        .position(|(_, kind)| *kind == ChunkKind::Other)
        .unwrap_or(chunks.len());
    if let Some(newline) = chunks[..first_text]
        .iter()
        .rposition(|(_, kind)| *kind == ChunkKind::Newline)
    {
        chunks.drain(..=newline);
    }

    if let Some(last_text) = chunks.iter().rposition(|(_, kind)| *kind == ChunkKind::Other) {
        chunks.truncate(last_text + 1);
    }

    let common = chunks
        .iter()
        .filter(|(_, kind)| *kind == ChunkKind::Leading)
        .map(|(bytes, _)| bytes.len())
        .min()
        .unwrap_or(0);

    chunks
        .into_iter()
        .flat_map(|(bytes, kind)| {
            let skip = if kind == ChunkKind::Leading { common } else { 0 };
            bytes.into_iter().skip(skip)
        })
        .collect()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
