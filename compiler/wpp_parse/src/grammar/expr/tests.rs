use crate::test_helpers::{parse_err, parse_ok, render};
use crate::ParseErrorKind;
use pretty_assertions::assert_eq;
use wpp_ir::{Node, Span};

// === Calls ===

#[test]
fn bare_name_is_variable_reference() {
    let parsed = parse_ok("foo");
    let stmt = parsed.statements()[0];
    assert!(matches!(parsed.arena.get(stmt), Node::VarRef { .. }));
    assert_eq!(parsed.render(stmt), "foo");
}

#[test]
fn call_arguments() {
    assert_eq!(render(r#"f("a", b "c")"#), r#"f("a" b "c")"#);
    assert_eq!(render("f()"), "f()");
    assert_eq!(render("f(g(x), h)"), "f(g(x) h)");
}

#[test]
fn unterminated_argument_list() {
    let err = parse_err(r#"f("a" ->"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`)`"));
    assert_eq!(err.detail, "expecting `)` to follow argument list");
}

// === Concatenation ===

#[test]
fn concat_is_right_recursive() {
    assert_eq!(render(r#""a" .. b .. "c""#), r#"(.. "a" (.. b "c"))"#);
}

#[test]
fn concat_needs_right_hand_side() {
    let err = parse_err(r#""a" .."#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.detail, "expecting an expression to appear here");
}

// === Slices ===

#[test]
fn slice_forms() {
    assert_eq!(render("x[1]"), "x[1]");
    assert_eq!(render("x[1:3]"), "x[1:3]");
    assert_eq!(render("x[ -2 : ]"), "x[-2:]");
    assert_eq!(render("x[:-1]"), "x[:-1]");
}

#[test]
fn slice_then_concat() {
    assert_eq!(render(r#""hello"[1:3] .. x[0]"#), r#"(.. "hello"[1:3] x[0])"#);
}

#[test]
fn empty_slice() {
    let err = parse_err("x[]");
    assert_eq!(err.kind, ParseErrorKind::EmptySlice);
    assert_eq!(err.span, Span::point(2));
}

#[test]
fn slice_stop_requires_integer() {
    let err = parse_err("x[:]");
    assert_eq!(err.kind, ParseErrorKind::ExpectedInteger);
    assert_eq!(err.detail, "expecting an integer literal for stop index");
}

#[test]
fn unterminated_slice() {
    let err = parse_err("x[1 2]");
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`]`"));
    assert_eq!(err.span, Span::point(4));
}

#[test]
fn slice_index_out_of_range() {
    let err = parse_err("x[99999999999999999999]");
    assert_eq!(err.kind, ParseErrorKind::ExpectedInteger);
    assert_eq!(err.detail, "integer literal is out of range");
}

// === Blocks ===

#[test]
fn block_with_trailing_expression() {
    assert_eq!(render(r#"{ "a" }"#), r#"(block "a")"#);
    assert_eq!(
        render(r#"{ let x "a" x .. "b" }"#),
        r#"(block (let x "a") => (.. x "b"))"#
    );
    assert_eq!(render(r#"{ "a" "b" }"#), r#"(block "a" => "b")"#);
}

#[test]
fn empty_block() {
    let err = parse_err("{}");
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.detail, "expecting a trailing expression at the end of block");
}

#[test]
fn block_ending_in_definition() {
    let err = parse_err(r#"{ let x "a" }"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(
        err.detail,
        "expecting a trailing expression at the end of block that begins here"
    );
    assert_eq!(err.span, Span::point(0));
}

#[test]
fn arrow_inside_block() {
    let err = parse_err(r#"{ "a" -> "b" }"#);
    assert_eq!(err.kind, ParseErrorKind::UnexpectedArrow);
    assert_eq!(
        err.hint.as_deref(),
        Some("did you forget the test expression for match?")
    );
}

#[test]
fn unterminated_block() {
    let err = parse_err(r#"{ "a" "#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`}`"));
    assert_eq!(err.span, Span::point(0));
}

// === match ===

#[test]
fn match_with_default() {
    assert_eq!(
        render(r#"match x { "a" -> "1" "b" -> "2" * -> "3" }"#),
        r#"(match x ("a" -> "1") ("b" -> "2") (* -> "3"))"#
    );
}

#[test]
fn map_is_match() {
    assert_eq!(render(r#"map x { "a" -> "1" }"#), r#"(match x ("a" -> "1"))"#);
}

#[test]
fn match_errors() {
    let err = parse_err("match * { }");
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(
        err.hint.as_deref(),
        Some("insert a test expression for `match` to match on")
    );

    assert_eq!(
        parse_err(r#"match x "a""#).kind,
        ParseErrorKind::ExpectedToken("`{`")
    );

    let err = parse_err(r#"match x { "a" "b" }"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`->`"));

    let err = parse_err(r#"match x { "a" -> }"#);
    assert_eq!(err.detail, "expecting an expression after `->`");

    let err = parse_err(r#"match x { * "b" }"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`->`"));

    let err = parse_err(r#"match x { "a" -> "b" "#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`}`"));
    assert_eq!(err.span, Span::point(0));
}

// === new / pop / codeify ===

#[test]
fn new_and_pop() {
    assert_eq!(render(r#"new f("a" "b")"#), r#"(new f("a" "b"))"#);
    assert_eq!(render(r#"pop f("a", *, *)"#), r#"(pop f("a") *2)"#);
    assert_eq!(render("pop f(*)"), "(pop f() *1)");
}

#[test]
fn new_requires_expression() {
    let err = parse_err("new )");
    assert_eq!(err.detail, "expecting an expression to follow `new`");
}

#[test]
fn pop_requires_star() {
    let err = parse_err(r#"pop f("a")"#);
    assert_eq!(err.kind, ParseErrorKind::NoSubstituteArgument);
    assert_eq!(err.span, Span::point(0));
}

#[test]
fn pop_star_must_be_last() {
    let err = parse_err(r#"pop f(* "a")"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`)`"));
    assert_eq!(
        err.hint.as_deref(),
        Some("`*` must come at the end of the argument list")
    );
}

#[test]
fn pop_errors() {
    assert_eq!(parse_err("pop (*)").kind, ParseErrorKind::ExpectedIdentifier);
    assert_eq!(
        parse_err("pop f *").kind,
        ParseErrorKind::ExpectedToken("`(`")
    );
}

#[test]
fn codeify_forms() {
    assert_eq!(render(r#"!"a" .. "b""#), r#"(! (.. "a" "b"))"#);
    assert_eq!(render(r#"eval "x""#), r#"(! "x")"#);
    assert_eq!(render(r#"eval("x")"#), r#"(! "x")"#);

    let err = parse_err("!");
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.hint.as_deref(), Some("insert an expression after `!`"));
}

// === Structure ===

#[test]
fn children_record_their_parent() {
    let parsed = parse_ok(r#"let f(a) { a .. "x" }"#);
    let def = parsed.statements()[0];
    let Node::Fn { body, .. } = parsed.arena.get(def) else {
        panic!("expected fn");
    };
    let Node::Block { expr, .. } = parsed.arena.get(*body) else {
        panic!("expected block");
    };
    let chain: Vec<_> = parsed.arena.ancestors(*expr).collect();
    assert_eq!(chain, vec![*expr, *body, def, parsed.out.root]);
}

#[test]
fn spans_cover_the_construct() {
    let parsed = parse_ok(r#"  f("a")  "#);
    let call = parsed.statements()[0];
    assert_eq!(parsed.arena.position(call).span, Span::new(2, 8));
}
