//! Stack safety for the recursive parser and evaluator.
//!
//! Nested expressions recurse in the parser, and user functions recurse in
//! the evaluator with no hard limit. Both wrap their recursive entry points
//! in [`ensure_sufficient_stack`], which grows the native stack on demand,
//! and count their nesting with a [`Depth`] so a soft warning can fire once a
//! threshold is crossed.
//!
//! - **Red zone**: 100KB. If less than this remains, the stack is grown.
//! - **Growth size**: 1MB per growth.
//!
//! On `wasm32` the helper is a plain call.

/// Minimum stack space to keep available.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Nesting counter with a soft threshold.
///
/// Crossing the threshold is reported by [`Depth::enter`] and never stops
/// the caller; it only exists so the caller can emit a warning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Depth {
    current: usize,
    threshold: usize,
}

impl Depth {
    pub const fn new(threshold: usize) -> Self {
        Depth {
            current: 0,
            threshold,
        }
    }

    /// Increment the depth. Returns `true` when the new depth is at or past
    /// the threshold.
    #[inline]
    pub fn enter(&mut self) -> bool {
        self.current += 1;
        self.current >= self.threshold
    }

    #[inline]
    pub fn exit(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
mod tests;
