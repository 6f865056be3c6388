use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_roundtrip() {
    let interner = StringInterner::new();
    let name = interner.intern("greet");
    assert_eq!(interner.lookup(name), "greet");
}

#[test]
fn test_intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("x");
    let b = interner.intern("x");
    let c = interner.intern("y");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_empty_string_is_pre_interned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);

    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
}

#[test]
fn test_lookup_foreign_name() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(4096)), "");
}
