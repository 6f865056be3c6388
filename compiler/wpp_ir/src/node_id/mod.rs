//! Node handles for the flat syntax tree.

use std::fmt;

/// Index into the node [`Arena`](crate::Arena).
///
/// - Memory: 4 bytes
/// - Equality: O(1) integer compare
/// - Stays valid when the arena grows, unlike a reference into it
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

crate::static_assert_size!(NodeId, 4);

impl NodeId {
    /// Absent node (sentinel value), e.g. a `match` without a default arm.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new `NodeId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this ID refers to a node rather than the sentinel.
    #[inline]
    pub const fn is_present(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::NONE")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}
