use super::*;
use pretty_assertions::assert_eq;

// === Keywords ===

#[test]
fn declaration_keywords() {
    assert_eq!(lookup(b"let"), Some(TokenKind::Let));
    assert_eq!(lookup(b"var"), Some(TokenKind::Var));
    assert_eq!(lookup(b"drop"), Some(TokenKind::Drop));
    assert_eq!(lookup(b"prefix"), Some(TokenKind::Prefix));
}

#[test]
fn expression_keywords() {
    assert_eq!(lookup(b"match"), Some(TokenKind::Match));
    assert_eq!(lookup(b"new"), Some(TokenKind::New));
    assert_eq!(lookup(b"pop"), Some(TokenKind::Pop));
    assert_eq!(lookup(b"eval"), Some(TokenKind::Eval));
}

#[test]
fn synonyms_share_a_kind() {
    assert_eq!(lookup(b"map"), lookup(b"match"));
    assert_eq!(lookup(b"source"), lookup(b"use"));
}

#[test]
fn intrinsics() {
    for (text, kind) in [
        (&b"run"[..], TokenKind::Run),
        (b"pipe", TokenKind::Pipe),
        (b"file", TokenKind::File),
        (b"assert", TokenKind::Assert),
        (b"error", TokenKind::Error),
        (b"log", TokenKind::Log),
        (b"length", TokenKind::Length),
        (b"find", TokenKind::Find),
        (b"escape", TokenKind::Escape),
        (b"slice", TokenKind::Slice),
    ] {
        assert_eq!(lookup(text), Some(kind));
        assert!(kind.is_intrinsic());
    }
}

// === Identifiers ===

#[test]
fn non_keywords() {
    assert_eq!(lookup(b"lets"), None);
    assert_eq!(lookup(b"Let"), None);
    assert_eq!(lookup(b"x"), None);
    assert_eq!(lookup(b""), None);
    assert_eq!(lookup(b"namespace"), None);
}
