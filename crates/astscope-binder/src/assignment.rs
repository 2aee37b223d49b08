//! Normalized write records.

use crate::error::{Construct, ScopeError};
use crate::ids::{ScopeId, VariableId};
use astscope_ast::{NodeArena, NodeData, NodeIndex};
use astscope_emitter::Printer;

/// A write `left operator right`, normalized from an assignment expression,
/// a function declaration (`f = function f() {}`) or an initialized
/// variable declarator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub node: NodeIndex,
    pub operator: String,
    pub left: NodeIndex,
    pub right: NodeIndex,
    pub scope: ScopeId,
    /// The binding written, when `left` is a plain identifier.
    pub variable: Option<VariableId>,
}

impl Assignment {
    /// Whether `node` produces an assignment.
    pub fn is_required(arena: &NodeArena, node: NodeIndex) -> bool {
        match arena.data(node) {
            Some(NodeData::AssignmentExpression { .. } | NodeData::FunctionDeclaration(_)) => true,
            Some(NodeData::VariableDeclarator { init, .. }) => init.is_some(),
            _ => false,
        }
    }

    /// Build the assignment for `node`. The written variable is linked by
    /// `ScopeTree::assign`.
    pub fn new(arena: &NodeArena, node: NodeIndex, scope: ScopeId) -> Result<Assignment, ScopeError> {
        let (operator, left, right) = match arena.data(node) {
            Some(NodeData::AssignmentExpression {
                operator,
                left,
                right,
            }) => (operator.clone(), *left, *right),
            Some(NodeData::FunctionDeclaration(func)) => ("=".to_string(), func.id, node),
            Some(NodeData::VariableDeclarator { id, init }) if init.is_some() => {
                ("=".to_string(), *id, *init)
            }
            _ => return Err(ScopeError::invalid_node(Construct::Assignment, arena, node)),
        };

        Ok(Assignment {
            node,
            operator,
            left,
            right,
            scope,
            variable: None,
        })
    }

    /// Name written, when the target is a plain identifier.
    pub fn target_name<'a>(&self, arena: &'a NodeArena) -> Option<&'a str> {
        arena.identifier_name(self.left)
    }

    /// Render as `left operator right`.
    pub fn to_source(&self, arena: &NodeArena) -> String {
        let left = Printer::new(arena).print(self.left);
        let right = Printer::new(arena).print(self.right);
        format!("{left} {} {right}", self.operator)
    }
}
