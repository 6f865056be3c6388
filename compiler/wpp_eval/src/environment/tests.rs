use super::*;
use pretty_assertions::assert_eq;

const F: Name = Name::from_raw(1);
const X: Name = Name::from_raw(2);

fn node(i: u32) -> NodeId {
    NodeId::new(i)
}

// === Overload resolution ===

#[test]
fn resolves_largest_arity_not_above_call() {
    let mut env = Environment::new();
    env.define_function(F, 1, node(10));
    env.define_function(F, 3, node(30));

    assert_eq!(env.resolve(F, 2), Some(Resolved { arity: 1, node: node(10) }));
    assert_eq!(env.resolve(F, 3), Some(Resolved { arity: 3, node: node(30) }));
    assert_eq!(env.resolve(F, 7), Some(Resolved { arity: 3, node: node(30) }));
    assert_eq!(env.resolve(F, 0), None);
    assert_eq!(env.resolve(X, 1), None);
}

// === Generations ===

#[test]
fn generations_stack_and_drop() {
    let mut env = Environment::new();
    assert!(!env.define_function(F, 0, node(1)));
    assert!(env.define_function(F, 0, node(2)));
    assert_eq!(env.resolve(F, 0).unwrap().node, node(2));

    assert!(env.drop_function(F, 0));
    assert_eq!(env.resolve(F, 0).unwrap().node, node(1));

    assert!(env.drop_function(F, 0));
    assert_eq!(env.resolve(F, 0), None);
    assert!(!env.has_function(F, 0));
    assert!(!env.drop_function(F, 0));
}

#[test]
fn drop_leaves_other_arities() {
    let mut env = Environment::new();
    env.define_function(F, 0, node(1));
    env.define_function(F, 2, node(2));

    assert!(env.drop_function(F, 2));
    assert!(!env.drop_function(F, 1));
    assert!(env.has_function(F, 0));
    assert_eq!(env.resolve(F, 5).unwrap().arity, 0);
}

// === Variables ===

#[test]
fn variables_report_redefinition() {
    let mut env = Environment::new();
    assert!(!env.define_variable(X, b"a".to_vec()));
    assert!(env.define_variable(X, b"b".to_vec()));
    assert_eq!(env.variable(X), Some(&b"b"[..]));
    assert!(env.has_variable(X));
    assert!(!env.has_variable(F));
}

// === Scope stack ===

#[test]
fn scopes_isolate_values() {
    let mut env = Environment::new();
    env.push_value(b"outer".to_vec());

    env.open_scope();
    assert_eq!(env.scope_depth(), 2);
    assert_eq!(env.pop_value(), None);
    env.push_value(b"inner".to_vec());
    assert_eq!(env.scope_values(), &[b"inner".to_vec()]);
    env.close_scope();

    assert_eq!(env.pop_value(), Some(b"outer".to_vec()));
    assert_eq!(env.pop_value(), None);
}

#[test]
fn outermost_scope_is_permanent() {
    let mut env = Environment::new();
    env.close_scope();
    env.close_scope();
    assert_eq!(env.scope_depth(), 1);
    env.push_value(b"v".to_vec());
    assert_eq!(env.scope_values().len(), 1);
}

// === Frames ===

#[test]
fn frames_inherit_bindings() {
    let mut outer = Frame::inherit(None, F);
    assert!(!outer.bind(X, b"1".to_vec()));

    let mut inner = Frame::inherit(Some(&outer), F);
    assert_eq!(inner.get(X), Some(&b"1"[..]));
    assert!(inner.bind(X, b"2".to_vec()));
    assert_eq!(outer.get(X), Some(&b"1"[..]));

    let mut env = Environment::new();
    env.push_frame(inner);
    assert_eq!(env.frame().unwrap().get(X), Some(&b"2"[..]));
    env.pop_frame();
    assert!(env.frame().is_none());
}

// === Bookkeeping ===

#[test]
fn warnings_fire_once_per_site() {
    let mut env = Environment::new();
    let call = node(5);
    let nested = node(3);

    assert!(env.first_warning(WarningKind::DeepRecursion, call));
    assert!(!env.first_warning(WarningKind::DeepRecursion, call));
    // A nested site is its own site.
    assert!(env.first_warning(WarningKind::DeepRecursion, nested));
    // Different kind, same site.
    assert!(env.first_warning(WarningKind::FuncRedefined, call));
}

#[test]
fn seen_files() {
    let mut env = Environment::new();
    assert!(env.mark_seen(PathBuf::from("/a/b.wpp")));
    assert!(!env.mark_seen(PathBuf::from("/a/b.wpp")));
}
