//! Depth-first enter/leave traversal.
//!
//! `enter` runs before a node's children and can skip the subtree or abort
//! the whole walk; `leave` runs after the children and can abort. Children
//! are visited in the order returned by `NodeArena::children`.
//!
//! Recursion depth is bounded by the nesting limit enforced at ingestion
//! (`astscope_common::limits::MAX_AST_DEPTH`).

use crate::base::NodeIndex;
use crate::node_arena::NodeArena;

/// What the walker should do after a callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkControl {
    /// Keep going (descend into children when returned from `enter`).
    Continue,
    /// Do not visit this node's children; `leave` is still called.
    Skip,
    /// Stop the traversal immediately.
    Break,
}

/// How a traversal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Aborted,
}

pub trait Visitor {
    type Error;

    fn enter(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        parent: NodeIndex,
    ) -> Result<WalkControl, Self::Error>;

    /// `Skip` has no meaning here and is treated like `Continue`.
    fn leave(
        &mut self,
        _arena: &NodeArena,
        _idx: NodeIndex,
        _parent: NodeIndex,
    ) -> Result<WalkControl, Self::Error> {
        Ok(WalkControl::Continue)
    }
}

/// Walk the subtree rooted at `root`.
pub fn walk<V: Visitor>(
    arena: &NodeArena,
    root: NodeIndex,
    visitor: &mut V,
) -> Result<WalkOutcome, V::Error> {
    if walk_node(arena, root, NodeIndex::NONE, visitor)? {
        Ok(WalkOutcome::Aborted)
    } else {
        Ok(WalkOutcome::Completed)
    }
}

/// Returns `true` when the traversal was aborted.
fn walk_node<V: Visitor>(
    arena: &NodeArena,
    idx: NodeIndex,
    parent: NodeIndex,
    visitor: &mut V,
) -> Result<bool, V::Error> {
    if arena.get(idx).is_none() {
        return Ok(false);
    }

    match visitor.enter(arena, idx, parent)? {
        WalkControl::Break => return Ok(true),
        WalkControl::Skip => {}
        WalkControl::Continue => {
            for child in arena.children(idx) {
                if walk_node(arena, child, idx, visitor)? {
                    return Ok(true);
                }
            }
        }
    }

    Ok(visitor.leave(arena, idx, parent)? == WalkControl::Break)
}

/// Adapter turning an `enter` closure into a `Visitor`.
struct EnterFn<F>(F);

impl<E, F> Visitor for EnterFn<F>
where
    F: FnMut(&NodeArena, NodeIndex, NodeIndex) -> Result<WalkControl, E>,
{
    type Error = E;

    fn enter(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        parent: NodeIndex,
    ) -> Result<WalkControl, E> {
        (self.0)(arena, idx, parent)
    }
}

/// Walk with only an `enter` callback.
pub fn walk_fn<E, F>(arena: &NodeArena, root: NodeIndex, enter: F) -> Result<WalkOutcome, E>
where
    F: FnMut(&NodeArena, NodeIndex, NodeIndex) -> Result<WalkControl, E>,
{
    walk(arena, root, &mut EnterFn(enter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::NodeList;
    use crate::node::{NodeData, NodeKind};
    use std::convert::Infallible;

    /// `f(a, function () { b; })`
    fn sample(arena: &mut NodeArena) -> NodeIndex {
        let f = arena.add(NodeData::Identifier { name: "f".into() });
        let a = arena.add(NodeData::Identifier { name: "a".into() });
        let b = arena.add(NodeData::Identifier { name: "b".into() });
        let stmt = arena.add(NodeData::ExpressionStatement { expression: b });
        let body = arena.add(NodeData::BlockStatement {
            body: NodeList::from([stmt]),
        });
        let func = arena.add(NodeData::FunctionExpression(crate::node::Function {
            id: NodeIndex::NONE,
            params: NodeList::new(),
            body,
        }));
        arena.add(NodeData::CallExpression {
            callee: f,
            arguments: NodeList::from([a, func]),
        })
    }

    struct Recorder {
        events: Vec<String>,
        skip: NodeKind,
    }

    impl Visitor for Recorder {
        type Error = Infallible;

        fn enter(
            &mut self,
            arena: &NodeArena,
            idx: NodeIndex,
            _parent: NodeIndex,
        ) -> Result<WalkControl, Infallible> {
            let kind = arena.kind(idx).unwrap();
            self.events.push(format!("enter {kind}"));
            if kind == self.skip {
                return Ok(WalkControl::Skip);
            }
            Ok(WalkControl::Continue)
        }

        fn leave(
            &mut self,
            arena: &NodeArena,
            idx: NodeIndex,
            _parent: NodeIndex,
        ) -> Result<WalkControl, Infallible> {
            self.events
                .push(format!("leave {}", arena.kind(idx).unwrap()));
            Ok(WalkControl::Continue)
        }
    }

    #[test]
    fn test_skip_does_not_descend_but_leaves() {
        let mut arena = NodeArena::new();
        let root = sample(&mut arena);
        let mut recorder = Recorder {
            events: Vec::new(),
            skip: NodeKind::FunctionExpression,
        };

        let outcome = walk(&arena, root, &mut recorder).unwrap();
        assert_eq!(outcome, WalkOutcome::Completed);
        assert_eq!(
            recorder.events,
            vec![
                "enter CallExpression",
                "enter Identifier",
                "leave Identifier",
                "enter Identifier",
                "leave Identifier",
                "enter FunctionExpression",
                "leave FunctionExpression",
                "leave CallExpression",
            ]
        );
    }

    #[test]
    fn test_break_aborts_walk() {
        let mut arena = NodeArena::new();
        let root = sample(&mut arena);
        let mut seen = 0;

        let outcome = walk_fn(&arena, root, |arena, idx, _| {
            seen += 1;
            if arena.kind(idx) == Some(NodeKind::FunctionExpression) {
                return Ok::<_, Infallible>(WalkControl::Break);
            }
            Ok(WalkControl::Continue)
        })
        .unwrap();

        assert_eq!(outcome, WalkOutcome::Aborted);
        assert_eq!(seen, 4);
    }

    #[test]
    fn test_parent_is_reported() {
        let mut arena = NodeArena::new();
        let root = sample(&mut arena);
        let mut parents = Vec::new();

        walk_fn(&arena, root, |arena, idx, parent| {
            if arena.identifier_name(idx) == Some("b") {
                parents.push(arena.kind(parent));
            }
            Ok::<_, Infallible>(WalkControl::Continue)
        })
        .unwrap();

        assert_eq!(parents, vec![Some(NodeKind::ExpressionStatement)]);
    }

    #[test]
    fn test_errors_propagate() {
        let mut arena = NodeArena::new();
        let root = sample(&mut arena);

        let result = walk_fn(&arena, root, |_, _, _| Err::<WalkControl, _>("boom"));
        assert_eq!(result, Err("boom"));
    }
}
