//! Named bindings.

use crate::error::{Construct, ScopeError};
use crate::ids::{AssignmentId, ReferenceId, ScopeId};
use astscope_ast::{NodeArena, NodeIndex};
use smallvec::SmallVec;

/// Implicit per-function binding for `this`.
pub const THIS: &str = "this";
/// Implicit per-function binding for `arguments`.
pub const ARGUMENTS: &str = "arguments";

/// What a variable is defined from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// A binding identifier in the tree.
    Identifier(NodeIndex),
    /// An implicit binding without a node (`this` or `arguments`).
    Synthetic(&'static str),
}

/// A named binding and everything that declares, writes or reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Defining identifier. `None` for synthetic and unscoped variables.
    pub node: Option<NodeIndex>,
    /// Owning scope. `None` for unscoped (undeclared) variables.
    pub scope: Option<ScopeId>,
    /// Declaring nodes in encounter order: variable declarators, function
    /// nodes, parameter and catch-parameter identifiers.
    pub declarations: SmallVec<[NodeIndex; 1]>,
    pub assignments: Vec<AssignmentId>,
    pub references: Vec<ReferenceId>,
}

impl Variable {
    /// Create a variable from a binding identifier.
    pub fn new(arena: &NodeArena, node: NodeIndex, scope: ScopeId) -> Result<Variable, ScopeError> {
        let name = arena
            .identifier_name(node)
            .ok_or_else(|| ScopeError::invalid_node(Construct::Variable, arena, node))?;
        Ok(Variable::empty(name.to_string(), Some(node), Some(scope)))
    }

    /// Create an implicit `this` or `arguments` binding.
    pub fn synthetic(name: &str, scope: ScopeId) -> Result<Variable, ScopeError> {
        if !is_synthetic_name(name) {
            return Err(ScopeError::InvalidSyntheticName {
                name: name.to_string(),
            });
        }
        Ok(Variable::empty(name.to_string(), None, Some(scope)))
    }

    /// Create a binding for a name that no scope declares.
    pub(crate) fn unscoped(name: &str) -> Variable {
        Variable::empty(name.to_string(), None, None)
    }

    pub(crate) fn empty(name: String, node: Option<NodeIndex>, scope: Option<ScopeId>) -> Variable {
        Variable {
            name,
            node,
            scope,
            declarations: SmallVec::new(),
            assignments: Vec::new(),
            references: Vec::new(),
        }
    }

    #[inline]
    pub fn is_unscoped(&self) -> bool {
        self.scope.is_none()
    }

    /// `this` or `arguments` bound without a declaration.
    #[inline]
    pub fn is_synthetic(&self) -> bool {
        self.scope.is_some() && self.node.is_none()
    }
}

pub fn is_synthetic_name(name: &str) -> bool {
    name == THIS || name == ARGUMENTS
}
