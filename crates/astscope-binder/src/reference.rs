//! Resolved use sites.

use crate::error::{Construct, ScopeError};
use crate::ids::{ScopeId, VariableId};
use crate::scope::ScopeTree;
use crate::variable::THIS;
use astscope_ast::{NodeArena, NodeData, NodeIndex, WalkControl, WalkOutcome, walk_fn};
use std::convert::Infallible;

/// A use of a binding, resolved when it is recorded.
///
/// `node` is the whole use expression (`foo.bar().baz`); `id` is its root
/// identifier or `this` (`foo`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub node: NodeIndex,
    pub id: NodeIndex,
    pub scope: ScopeId,
    pub variable: VariableId,
    /// The use is a plain `a.b[c]` path of identifiers and member accesses.
    pub is_member_chain: bool,
}

impl Reference {
    /// Whether `node` has a root identifier and can be referenced.
    pub fn is_required(arena: &NodeArena, node: NodeIndex) -> bool {
        extract_id(arena, node).is_some()
    }

    /// Build a reference for `node` used in `scope`, resolving its root
    /// name through the scope chain. The reference is not yet recorded;
    /// see `ScopeTree::reference`.
    pub fn new(
        tree: &mut ScopeTree,
        arena: &NodeArena,
        node: NodeIndex,
        scope: ScopeId,
    ) -> Result<Reference, ScopeError> {
        let id = extract_id(arena, node)
            .ok_or_else(|| ScopeError::invalid_node(Construct::Reference, arena, node))?;
        let variable = tree.resolve_variable(scope, root_name(arena, id))?;

        Ok(Reference {
            node,
            id,
            scope,
            variable,
            is_member_chain: is_member_chain(arena, node),
        })
    }

    /// Name of the root binding (`this` for a `this` root).
    pub fn name<'a>(&self, arena: &'a NodeArena) -> &'a str {
        root_name(arena, self.id)
    }
}

/// Root identifier (or `this`) of a use expression, following member
/// objects and call/new callees.
///
/// `new this.foo().bar().baz` has root `this`; `[foo].slice()` has none.
pub fn extract_id(arena: &NodeArena, node: NodeIndex) -> Option<NodeIndex> {
    let mut current = node;
    loop {
        match arena.data(current)? {
            NodeData::Identifier { .. } | NodeData::ThisExpression => return Some(current),
            NodeData::MemberExpression { object, .. } => current = *object,
            NodeData::CallExpression { callee, .. } | NodeData::NewExpression { callee, .. } => {
                current = *callee;
            }
            _ => return None,
        }
    }
}

fn root_name(arena: &NodeArena, id: NodeIndex) -> &str {
    arena.identifier_name(id).unwrap_or(THIS)
}

fn is_member_chain(arena: &NodeArena, node: NodeIndex) -> bool {
    let outcome = walk_fn(arena, node, |arena, idx, _parent| {
        Ok::<_, Infallible>(match arena.data(idx) {
            Some(NodeData::Identifier { .. } | NodeData::MemberExpression { .. }) => {
                WalkControl::Continue
            }
            _ => WalkControl::Break,
        })
    });
    matches!(outcome, Ok(WalkOutcome::Completed))
}
