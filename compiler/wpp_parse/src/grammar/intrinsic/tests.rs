use crate::test_helpers::{parse_err, render};
use crate::ParseErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn bare_and_parenthesised_forms_agree() {
    assert_eq!(render(r#"run "ls""#), r#"(run "ls")"#);
    assert_eq!(render(r#"run("ls")"#), r#"(run "ls")"#);
    assert_eq!(render(r#"pipe "cat" "data""#), r#"(pipe "cat" "data")"#);
    assert_eq!(render(r#"pipe("cat", "data")"#), r#"(pipe "cat" "data")"#);
}

#[test]
fn every_intrinsic() {
    let src = r#"
        file "a"
        use "b"
        source "c"
        assert x "1"
        error "e"
        log "l"
        length("abc")
        find("abc", "b")
        escape "q"
        slice("abc", "0", "1")
    "#;
    assert_eq!(
        render(src),
        [
            r#"(file "a")"#,
            r#"(use "b")"#,
            r#"(use "c")"#,
            r#"(assert x "1")"#,
            r#"(error "e")"#,
            r#"(log "l")"#,
            r#"(length "abc")"#,
            r#"(find "abc" "b")"#,
            r#"(escape "q")"#,
            r#"(slice "abc" "0" "1")"#,
        ]
        .join("\n")
    );
}

#[test]
fn bare_argument_takes_whole_expression() {
    assert_eq!(render(r#"run "echo " .. x"#), r#"(run (.. "echo " x))"#);
}

#[test]
fn parenthesised_result_can_be_concatenated() {
    assert_eq!(render(r#"length("ab") .. "!""#), r#"(.. (length "ab") "!")"#);
}

#[test]
fn wrong_argument_count() {
    let err = parse_err(r#"pipe("cat")"#);
    assert_eq!(err.kind, ParseErrorKind::IncorrectArgumentCount);
    assert_eq!(err.detail, "`pipe` takes 2 arguments, found 1");

    let err = parse_err(r#"source("a", "b")"#);
    assert_eq!(err.detail, "`source` takes 1 argument, found 2");
}

#[test]
fn missing_bare_argument() {
    let err = parse_err(r#"assert "a""#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(err.detail, "expecting an argument for `assert`");
}

#[test]
fn statement_intrinsics_are_not_expressions() {
    let err = parse_err(r#"{ log "x" }"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedExpression);
    assert_eq!(render(r#"{ log "x" "y" }"#), r#"(block (log "x") => "y")"#);
}

#[test]
fn unterminated_intrinsic_arguments() {
    let err = parse_err(r#"run("ls" ->"#);
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken("`)`"));
}
