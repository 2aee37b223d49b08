//! Serializable summary of a scope tree.

use crate::ids::{ScopeId, VariableId};
use crate::scope::{ScopeKind, ScopeTree};
use astscope_ast::{NodeArena, NodeKind};
use astscope_common::Span;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeReport {
    pub kind: ScopeKind,
    /// ESTree type of the owning node; absent for the top-level wrapper.
    pub node_type: Option<NodeKind>,
    /// Source range of the owning node, when the producer supplied one.
    pub span: Option<Span>,
    pub variables: Vec<VariableReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unscoped_variables: Vec<VariableReport>,
    /// Assignments recorded in this scope.
    pub assignments: usize,
    /// References recorded in this scope.
    pub references: usize,
    pub children: Vec<ScopeReport>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableReport {
    pub name: String,
    pub declarations: usize,
    /// Every write to the variable, rendered as source.
    pub assignments: Vec<String>,
    pub references: usize,
    /// `this`/`arguments` bound without a declaration.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub implicit: bool,
}

impl ScopeReport {
    pub fn from_tree(arena: &NodeArena, tree: &ScopeTree) -> ScopeReport {
        ScopeReport::from_scope(arena, tree, tree.root())
    }

    fn from_scope(arena: &NodeArena, tree: &ScopeTree, id: ScopeId) -> ScopeReport {
        let scope = &tree[id];
        let variables = |ids: Vec<VariableId>| -> Vec<VariableReport> {
            ids.into_iter()
                .map(|v| VariableReport::new(arena, tree, v))
                .collect()
        };

        ScopeReport {
            kind: scope.kind,
            node_type: scope.node.and_then(|n| arena.kind(n)),
            span: scope
                .node
                .map(|n| arena.span(n))
                .filter(|span| !span.is_dummy()),
            variables: variables(scope.variables.values().copied().collect()),
            unscoped_variables: match &scope.unscoped_variables {
                Some(table) => variables(table.values().copied().collect()),
                None => Vec::new(),
            },
            assignments: scope.assignments.len(),
            references: scope.references.len(),
            children: scope
                .children
                .iter()
                .map(|&child| ScopeReport::from_scope(arena, tree, child))
                .collect(),
        }
    }

    /// Number of scopes in this report, including itself.
    pub fn scope_count(&self) -> usize {
        1 + self.children.iter().map(ScopeReport::scope_count).sum::<usize>()
    }
}

impl VariableReport {
    fn new(arena: &NodeArena, tree: &ScopeTree, id: VariableId) -> VariableReport {
        let variable = &tree[id];
        VariableReport {
            name: variable.name.clone(),
            declarations: variable.declarations.len(),
            assignments: variable
                .assignments
                .iter()
                .map(|&a| tree[a].to_source(arena))
                .collect(),
            references: variable.references.len(),
            implicit: variable.is_synthetic(),
        }
    }
}
