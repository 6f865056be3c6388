//! Append-only node arena with a parallel position table.
//!
//! Nodes are never removed. [`Arena::replace`] retags a node in place, which
//! the parser uses to turn a call without an argument list into a variable
//! reference once it has seen the next token.

use crate::{Node, NodeId, SourceId, Span};

/// Where a node came from.
///
/// One entry per node, pushed in lock-step with the node itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Source the node was parsed from.
    pub source: SourceId,
    /// Byte span inside that source.
    pub span: Span,
    /// Structural parent, or [`NodeId::NONE`] for a root.
    pub parent: NodeId,
}

/// Node storage addressed by [`NodeId`].
#[derive(Clone, Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    positions: Vec<Position>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and its position, returning the new id.
    ///
    /// # Panics
    /// Panics if the arena would exceed `u32::MAX - 1` nodes.
    pub fn add(&mut self, node: Node, position: Position) -> NodeId {
        let index = u32::try_from(self.nodes.len())
            .ok()
            .filter(|&i| i != u32::MAX)
            .unwrap_or_else(|| panic!("node arena exceeded u32::MAX nodes"));
        self.nodes.push(node);
        self.positions.push(position);
        NodeId::new(index)
    }

    /// Replace the node stored at `id`, keeping its position.
    pub fn replace(&mut self, id: NodeId, node: Node) {
        self.nodes[id.index()] = node;
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> Position {
        self.positions[id.index()]
    }

    /// Record `parent` as the structural parent of `id`.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.positions[id.index()].parent = parent;
    }

    /// The node itself followed by each of its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id).filter(|id| id.is_present()), move |&current| {
            Some(self.positions[current.index()].parent).filter(|parent| parent.is_present())
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests;
