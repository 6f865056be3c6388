use super::*;
use crate::{Name, NodeList};
use pretty_assertions::assert_eq;

fn pos(parent: NodeId) -> Position {
    Position {
        source: SourceId::new(0),
        span: Span::new(0, 1),
        parent,
    }
}

#[test]
fn test_add_and_get() {
    let mut arena = Arena::new();
    let id = arena.add(Node::String { value: b"hi".to_vec() }, pos(NodeId::NONE));

    assert_eq!(id, NodeId::new(0));
    assert_eq!(arena.get(id), &Node::String { value: b"hi".to_vec() });
    assert_eq!(arena.len(), 1);
}

#[test]
fn test_replace_retags_in_place() {
    let mut arena = Arena::new();
    let name = Name::from_raw(1);
    let id = arena.add(
        Node::FnInvoke {
            name,
            args: NodeList::new(),
        },
        pos(NodeId::NONE),
    );

    arena.replace(id, Node::VarRef { name });

    assert_eq!(arena.get(id), &Node::VarRef { name });
    assert_eq!(arena.len(), 1);
    assert_eq!(arena.position(id), pos(NodeId::NONE));
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut arena = Arena::new();
    let root = arena.add(
        Node::Document {
            statements: NodeList::new(),
        },
        pos(NodeId::NONE),
    );
    let child = arena.add(Node::New { expr: NodeId::NONE }, pos(root));
    let leaf = arena.add(Node::String { value: Vec::new() }, pos(child));

    let chain: Vec<_> = arena.ancestors(leaf).collect();
    assert_eq!(chain, vec![leaf, child, root]);
    assert_eq!(arena.ancestors(NodeId::NONE).count(), 0);
}

#[test]
fn test_set_parent() {
    let mut arena = Arena::new();
    let leaf = arena.add(Node::String { value: Vec::new() }, pos(NodeId::NONE));
    let root = arena.add(Node::Codeify { expr: leaf }, pos(NodeId::NONE));
    arena.set_parent(leaf, root);
    assert_eq!(arena.position(leaf).parent, root);
    assert_eq!(arena.ancestors(leaf).collect::<Vec<_>>(), vec![leaf, root]);
}

#[test]
fn test_for_each_child_skips_absent() {
    let node = Node::Match {
        test: NodeId::new(0),
        arms: vec![crate::MatchArm {
            pattern: NodeId::new(1),
            result: NodeId::new(2),
        }],
        default: NodeId::NONE,
    };
    let mut children = Vec::new();
    node.for_each_child(|id| children.push(id));
    assert_eq!(children, vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)]);
}
