use crate::test_helpers::{parse_err, render};
use crate::ParseErrorKind;
use pretty_assertions::assert_eq;
use wpp_ir::Span;

// === let / var ===

#[test]
fn let_with_expression_is_variable() {
    assert_eq!(render(r#"let x "a""#), r#"(let x "a")"#);
    assert_eq!(render(r#"var y x .. "b""#), r#"(let y (.. x "b"))"#);
}

#[test]
fn let_with_parameters_is_function() {
    assert_eq!(render(r#"let f(a, b c) a .. c"#), "(let f(a b c) (.. a c))");
    assert_eq!(render(r#"let g() "x""#), r#"(let g() "x")"#);
}

#[test]
fn let_requires_identifier() {
    let err = parse_err(r#"let "x" "y""#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedIdentifier);
    assert_eq!(err.detail, "expecting an identifier to follow `let`");
    assert_eq!(err.span, Span::point(4));
}

#[test]
fn let_without_body_or_params() {
    let err = parse_err("let f");
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`(`"));
    assert_eq!(err.detail, "expecting `(` to open parameter list");
}

#[test]
fn duplicate_parameter() {
    let err = parse_err(r#"let f(a b a) "x""#);
    assert_eq!(err.kind, ParseErrorKind::DuplicateParameter);
    assert_eq!(err.span, Span::new(10, 11));
}

#[test]
fn reserved_parameter_name() {
    let err = parse_err(r#"let f(a run) "x""#);
    assert_eq!(err.kind, ParseErrorKind::InvalidName);
    assert_eq!(
        err.detail,
        "parameter name 'run' conflicts with keyword of the same name"
    );

    let err = parse_err(r#"let f(map) "x""#);
    assert_eq!(err.kind, ParseErrorKind::InvalidName);
}

#[test]
fn unterminated_parameter_list() {
    let err = parse_err(r#"let f(a "b") "x""#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`)`"));
    assert_eq!(
        err.hint.as_deref(),
        Some("there might be a non-identifier token in the parameter list")
    );
}

#[test]
fn var_requires_expression() {
    let err = parse_err("var x )");
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
}

// === drop ===

#[test]
fn drop_counts_parameters() {
    assert_eq!(render("drop f(a, b)"), "(drop f/2)");
    assert_eq!(render("drop g()"), "(drop g/0)");
}

#[test]
fn drop_errors() {
    assert_eq!(parse_err("drop (a)").kind, ParseErrorKind::ExpectedIdentifier);
    assert_eq!(
        parse_err("drop f a").kind,
        ParseErrorKind::ExpectedToken("`(`")
    );
    let err = parse_err(r#"drop f("a")"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`)`"));
    assert_eq!(err.detail, "expecting `)` to follow argument list");
}

// === statements ===

#[test]
fn several_statements() {
    assert_eq!(
        render("let a \"1\"\nlet f() a\nf()\n# done"),
        "(let a \"1\")\n(let f() a)\nf()"
    );
}

#[test]
fn prefix_is_not_a_statement() {
    let err = parse_err("prefix x");
    assert_eq!(err.kind, ParseErrorKind::ExpectedStatement);
    assert_eq!(err.detail, "expecting a statement to appear here");
}

#[test]
fn stray_punctuation_is_not_a_statement() {
    let err = parse_err(r#""a" )"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedStatement);
    assert_eq!(err.span, Span::point(4));
}
