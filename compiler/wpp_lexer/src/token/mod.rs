//! Tokens and lexical modes.

use std::fmt;

use wpp_ir::Span;

/// Lexical mode requested by the parser for the next token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LexMode {
    /// Code: punctuation, identifiers, keywords, literals. Skips whitespace
    /// and comments.
    Normal,
    /// Inside `"..."` / `'...'`: text runs, escapes and quotes.
    String,
    /// Inside a raw smart string: text runs and quotes only.
    StringRaw,
    /// Inside a paragraph smart string: like `String`, with whitespace and
    /// newlines as separate tokens.
    StringPara,
    /// Inside a code smart string: same tokens as `StringPara`.
    StringCode,
    /// Exactly one character.
    Char,
    /// Inside `[...]`: integers, `:` and `]`.
    Slice,
}

/// Token kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,

    // === Punctuation ===
    /// `'`
    Quote,
    /// `"`
    DoubleQuote,
    /// `..`
    Cat,
    /// `->`
    Arrow,
    Comma,
    Star,
    Bar,
    Equal,
    Exclaim,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // === Names ===
    Identifier,
    Let,
    Var,
    Drop,
    Prefix,
    /// `match` or `map`.
    Match,
    New,
    Pop,
    Eval,

    // === Intrinsics ===
    Run,
    Pipe,
    File,
    /// `use` or `source`.
    Use,
    Assert,
    Error,
    Log,
    Length,
    Find,
    Escape,
    Slice,

    // === Literals ===
    /// `0x...`, text includes the prefix.
    Hex,
    /// `0b...`, text includes the prefix.
    Bin,
    /// `r` + delimiter, opens a raw string.
    RawStr,
    /// `p` + delimiter, opens a paragraph string.
    ParaStr,
    /// `c` + delimiter, opens a code string.
    CodeStr,

    // === String modes ===
    /// Literal text inside a string.
    Text,
    /// A decoded escape sequence.
    EscapeSeq(u8),
    /// A run of spaces and tabs (paragraph/code strings).
    Whitespace,
    /// A line break (paragraph/code strings).
    Newline,

    // === Char / slice modes ===
    Char,
    Int,
    Colon,
    /// A character with no meaning in the current mode.
    Unknown,
}

impl TokenKind {
    /// Whether this kind is one of the intrinsic keywords.
    pub fn is_intrinsic(self) -> bool {
        matches!(
            self,
            TokenKind::Run
                | TokenKind::Pipe
                | TokenKind::File
                | TokenKind::Use
                | TokenKind::Assert
                | TokenKind::Error
                | TokenKind::Log
                | TokenKind::Length
                | TokenKind::Find
                | TokenKind::Escape
                | TokenKind::Slice
        )
    }

    /// Whether this kind is a keyword that cannot be used as a name.
    pub fn is_reserved(self) -> bool {
        self.is_intrinsic()
            || matches!(
                self,
                TokenKind::Let
                    | TokenKind::Var
                    | TokenKind::Drop
                    | TokenKind::Prefix
                    | TokenKind::Match
                    | TokenKind::New
                    | TokenKind::Pop
                    | TokenKind::Eval
            )
    }

    /// Whether this kind opens a smart string.
    pub fn is_smart_string(self) -> bool {
        matches!(self, TokenKind::RawStr | TokenKind::ParaStr | TokenKind::CodeStr)
    }

    /// Human-readable name used in parse errors.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Quote => "`'`",
            TokenKind::DoubleQuote => "`\"`",
            TokenKind::Cat => "`..`",
            TokenKind::Arrow => "`->`",
            TokenKind::Comma => "`,`",
            TokenKind::Star => "`*`",
            TokenKind::Bar => "`|`",
            TokenKind::Equal => "`=`",
            TokenKind::Exclaim => "`!`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Identifier => "identifier",
            TokenKind::Let => "`let`",
            TokenKind::Var => "`var`",
            TokenKind::Drop => "`drop`",
            TokenKind::Prefix => "`prefix`",
            TokenKind::Match => "`match`",
            TokenKind::New => "`new`",
            TokenKind::Pop => "`pop`",
            TokenKind::Eval => "`eval`",
            TokenKind::Run => "`run`",
            TokenKind::Pipe => "`pipe`",
            TokenKind::File => "`file`",
            TokenKind::Use => "`use`",
            TokenKind::Assert => "`assert`",
            TokenKind::Error => "`error`",
            TokenKind::Log => "`log`",
            TokenKind::Length => "`length`",
            TokenKind::Find => "`find`",
            TokenKind::Escape => "`escape`",
            TokenKind::Slice => "`slice`",
            TokenKind::Hex => "hex literal",
            TokenKind::Bin => "binary literal",
            TokenKind::RawStr => "raw string",
            TokenKind::ParaStr => "paragraph string",
            TokenKind::CodeStr => "code string",
            TokenKind::Text => "text",
            TokenKind::EscapeSeq(_) => "escape sequence",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::Char => "character",
            TokenKind::Int => "integer literal",
            TokenKind::Colon => "`:`",
            TokenKind::Unknown => "unknown character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token: kind plus the byte span of its text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

wpp_ir::static_assert_size!(Token, 12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_covers_intrinsics_and_keywords() {
        assert!(TokenKind::Run.is_reserved());
        assert!(TokenKind::Let.is_reserved());
        assert!(TokenKind::Prefix.is_reserved());
        assert!(!TokenKind::Identifier.is_reserved());
        assert!(!TokenKind::Let.is_intrinsic());
    }

    #[test]
    fn display_names() {
        assert_eq!(TokenKind::RParen.to_string(), "`)`");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
    }
}
