use super::*;
use pretty_assertions::assert_eq;

#[test]
fn shallow_recursion() {
    fn factorial(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n <= 1 { 1 } else { n * factorial(n - 1) })
    }

    assert_eq!(factorial(10), 3_628_800);
}

#[test]
fn deep_recursion() {
    fn deep_recurse(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
    }

    // Would overflow a typical 8MB stack without growth.
    assert_eq!(deep_recurse(100_000), 100_000);
}

#[test]
fn returns_closure_result() {
    let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
    assert_eq!(result, Ok(123));
}

#[test]
fn depth_reports_threshold() {
    let mut depth = Depth::new(3);
    assert!(!depth.enter());
    assert!(!depth.enter());
    assert!(depth.enter());
    assert!(depth.enter());
    assert_eq!(depth.current(), 4);

    depth.exit();
    depth.exit();
    assert_eq!(depth.current(), 2);
    assert!(depth.enter());
}

#[test]
fn depth_exit_saturates() {
    let mut depth = Depth::new(1);
    depth.exit();
    assert_eq!(depth.current(), 0);
    assert!(depth.enter());
}
