use super::*;
use crate::test_helpers::{parse_err, string_value};
use pretty_assertions::assert_eq;

fn value(src: &str) -> String {
    String::from_utf8(string_value(src)).unwrap()
}

// === Normal strings ===

#[test]
fn escapes_are_decoded() {
    assert_eq!(string_value(r#""a\nb\tc""#), b"a\nb\tc");
    assert_eq!(string_value(r#""\x41\b01000010""#), b"AB");
    assert_eq!(string_value(r#""\xff""#), vec![0xFF]);
}

#[test]
fn unknown_escape_keeps_backslash() {
    assert_eq!(value(r#""a\qb""#), r"a\qb");
}

#[test]
fn other_quote_is_literal() {
    assert_eq!(value(r#""it's""#), "it's");
    assert_eq!(value(r#"'say "hi"'"#), r#"say "hi""#);
    assert_eq!(value(r#""\"""#), "\"");
}

#[test]
fn comment_syntax_inside_strings() {
    assert_eq!(value(r##""#[ not a comment""##), "#[ not a comment");
    assert_eq!(value(r##""# nor this""##), "# nor this");
}

#[test]
fn unterminated_string() {
    let err = parse_err(r#"let x "abc"#);
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    assert_eq!(err.detail, "reached EOF while parsing string literal that begins here");
    assert_eq!(err.span, Span::new(6, 7));
}

#[test]
fn invalid_escape_is_lexical() {
    let err = parse_err(r#""\xZZ""#);
    assert!(err.is_fatal());
    assert_eq!(err.to_string(), "invalid hex escape");
}

// === Packed literals ===

#[test]
fn hex_and_bin_literals() {
    assert_eq!(string_value("0x41_42"), b"AB");
    assert_eq!(string_value("0x141"), vec![0x01, 0x41]);
    assert_eq!(string_value("0b01000001"), b"A");
    assert_eq!(string_value("0b1_01000001"), vec![0x01, 0x41]);
}

// === Raw strings ===

#[test]
fn raw_string_keeps_everything() {
    assert_eq!(value(r##"r#"a\n "b" c"#"##), r#"a\n "b" c"#);
    assert_eq!(value(r#"r|'x'y'|"#), "x'y");
}

#[test]
fn raw_string_unterminated() {
    let err = parse_err(r#"r|"abc"#);
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
    assert_eq!(
        err.detail,
        "reached EOF while parsing raw string literal that begins here"
    );
    assert_eq!(err.span, Span::new(0, 2));
}

// === Paragraph strings ===

#[test]
fn paragraph_reflows_whitespace() {
    let src = "p|\"\n    Lorem   ipsum\n    dolor  sit\n\n    amet.\n  \"|";
    assert_eq!(value(src), "Lorem ipsum\ndolor sit\namet.");
}

#[test]
fn paragraph_keeps_escapes_and_quotes() {
    assert_eq!(value(r##"p#"a \t "b" "#"##), "a \t \"b\"");
}

#[test]
fn paragraph_collapses_each_whitespace_run() {
    let pieces = vec![
        Piece::Text(b"a".to_vec()),
        Piece::Whitespace(b"  \t\t ".to_vec()),
        Piece::Text(b"b".to_vec()),
    ];
    assert_eq!(reflow_paragraph(pieces), b"a \t b");
}

#[test]
fn paragraph_of_only_whitespace_is_empty() {
    assert_eq!(value("p|'  \n  '|"), "");
}

// === Code strings ===

#[test]
fn code_strips_common_indentation() {
    let src = "c|\"\n    fn main() {\n        body\n    }\n\"|";
    assert_eq!(value(src), "fn main() {\n    body\n}");
}

#[test]
fn code_keeps_text_on_first_line() {
    assert_eq!(value("c|'  x\n    y'|"), "x\n  y");
}

#[test]
fn code_trims_trailing_whitespace() {
    assert_eq!(value("c|'a  \n\n   '|"), "a");
}

#[test]
fn code_unterminated() {
    let err = parse_err("c|'abc");
    assert_eq!(
        err.detail,
        "reached EOF while parsing code string literal that begins here"
    );
}

#[test]
fn dedent_with_blank_line_keeps_indentation() {
    // The empty indentation of the blank line is the minimum.
    let pieces = vec![
        Piece::Newline(b"\n".to_vec()),
        Piece::Whitespace(b"  ".to_vec()),
        Piece::Text(b"a".to_vec()),
        Piece::Newline(b"\n".to_vec()),
        Piece::Newline(b"\n".to_vec()),
        Piece::Whitespace(b"  ".to_vec()),
        Piece::Text(b"b".to_vec()),
    ];
    assert_eq!(dedent_code(pieces), b"  a\n\n  b");
}
