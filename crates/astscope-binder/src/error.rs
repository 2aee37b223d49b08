//! Errors raised while building a scope tree.
//!
//! All of these indicate a tree the analyzer cannot bind (a node of the wrong
//! kind in a binding position); unresolved names are never errors.

use astscope_ast::{NodeIndex, NodeKind};

/// The record whose construction rejected a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Construct {
    Scope,
    Variable,
    Declaration,
    Assignment,
    Reference,
}

impl Construct {
    pub const fn as_str(self) -> &'static str {
        match self {
            Construct::Scope => "scope",
            Construct::Variable => "variable",
            Construct::Declaration => "declaration",
            Construct::Assignment => "assignment",
            Construct::Reference => "reference",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeError {
    /// `node` cannot back the given construct. `kind` is `None` when the
    /// index is absent from the arena.
    InvalidNodeKind {
        construct: Construct,
        kind: Option<NodeKind>,
        node: NodeIndex,
    },
    /// Only `this` and `arguments` may be defined without a node.
    InvalidSyntheticName { name: String },
    /// An arena of the tree ran out of `u32` ids.
    CapacityExceeded { construct: Construct },
}

impl ScopeError {
    pub(crate) fn invalid_node(
        construct: Construct,
        arena: &astscope_ast::NodeArena,
        node: NodeIndex,
    ) -> Self {
        ScopeError::InvalidNodeKind {
            construct,
            kind: arena.kind(node),
            node,
        }
    }
}

impl std::fmt::Display for ScopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeError::InvalidNodeKind {
                construct,
                kind: Some(kind),
                node,
            } => write!(
                f,
                "invalid node type for {}: {kind} ({node})",
                construct.as_str()
            ),
            ScopeError::InvalidNodeKind {
                construct,
                kind: None,
                node,
            } => write!(f, "missing node for {}: {node}", construct.as_str()),
            ScopeError::InvalidSyntheticName { name } => {
                write!(f, "`{name}` cannot be defined without a declaring node")
            }
            ScopeError::CapacityExceeded { construct } => {
                write!(f, "too many {}s: ids are limited to u32", construct.as_str())
            }
        }
    }
}

impl std::error::Error for ScopeError {}
