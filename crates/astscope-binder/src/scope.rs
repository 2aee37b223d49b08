//! Scope tree and the operations that populate it.
//!
//! `ScopeTree` owns four arenas (scopes, variables, assignments, references)
//! that point at each other through typed ids. The root scope is always
//! `ScopeId(0)` and is the only scope holding an unscoped-variable table.
//!
//! Lookups walk `parent` links. Declarations always land in the nearest
//! variable scope (program, function or synthetic top level); parameters,
//! catch parameters and implicit `this`/`arguments` are bound directly in
//! the scope that owns them.

use crate::assignment::Assignment;
use crate::error::{Construct, ScopeError};
use crate::ids::{AssignmentId, ReferenceId, ScopeId, VariableId};
use crate::reference::Reference;
use crate::variable::{ARGUMENTS, Binding, THIS, Variable};
use astscope_ast::{NodeArena, NodeData, NodeIndex, NodeKind, WalkControl, walk_fn};
use astscope_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::ops::Index;
use tracing::{debug, trace, warn};

/// Insertion-ordered name table.
pub type VariableTable = IndexMap<String, VariableId, FxBuildHasher>;

/// What introduced a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeKind {
    Program,
    Function,
    Catch,
    With,
    /// Wrapper created when analysis starts at a node other than a program.
    TopLevel,
}

impl ScopeKind {
    /// Scope kind introduced by nodes of `kind`, if any.
    pub const fn for_node(kind: NodeKind) -> Option<ScopeKind> {
        match kind {
            NodeKind::Program => Some(ScopeKind::Program),
            NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => {
                Some(ScopeKind::Function)
            }
            NodeKind::CatchClause => Some(ScopeKind::Catch),
            NodeKind::WithStatement => Some(ScopeKind::With),
            _ => None,
        }
    }

    /// Program, function and top-level scopes receive hoisted declarations.
    pub const fn is_variable_scope(self) -> bool {
        matches!(
            self,
            ScopeKind::Program | ScopeKind::Function | ScopeKind::TopLevel
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Program => "program",
            ScopeKind::Function => "function",
            ScopeKind::Catch => "catch",
            ScopeKind::With => "with",
            ScopeKind::TopLevel => "top-level",
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Owning node; `None` for the synthetic top-level wrapper.
    pub node: Option<NodeIndex>,
    pub parent: Option<ScopeId>,
    /// Child scopes in traversal order.
    pub children: Vec<ScopeId>,
    pub variables: VariableTable,
    /// Undeclared names; present only on the root scope.
    pub unscoped_variables: Option<VariableTable>,
    pub assignments: Vec<AssignmentId>,
    pub references: Vec<ReferenceId>,
}

impl Scope {
    fn new(kind: ScopeKind, node: Option<NodeIndex>, parent: Option<ScopeId>) -> Scope {
        Scope {
            kind,
            node,
            parent,
            children: Vec::new(),
            variables: VariableTable::default(),
            unscoped_variables: parent.is_none().then(VariableTable::default),
            assignments: Vec::new(),
            references: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Result of an analysis: every scope, variable, assignment and reference.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    assignments: Vec<Assignment>,
    references: Vec<Reference>,
}

impl ScopeTree {
    /// Create a tree whose root is the scope of `program`, or a synthetic
    /// top-level scope when `program` is `None`.
    pub fn new(arena: &NodeArena, program: Option<NodeIndex>) -> Result<ScopeTree, ScopeError> {
        let kind = match program {
            None => ScopeKind::TopLevel,
            Some(node) if arena.kind(node) == Some(NodeKind::Program) => ScopeKind::Program,
            Some(node) => return Err(ScopeError::invalid_node(Construct::Scope, arena, node)),
        };
        Ok(ScopeTree {
            scopes: vec![Scope::new(kind, program, None)],
            variables: Vec::new(),
            assignments: Vec::new(),
            references: Vec::new(),
        })
    }

    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a child of `parent` owned by `node`, appended to the parent's
    /// children.
    pub fn create_child(
        &mut self,
        arena: &NodeArena,
        parent: ScopeId,
        node: NodeIndex,
    ) -> Result<ScopeId, ScopeError> {
        let kind = arena
            .kind(node)
            .and_then(ScopeKind::for_node)
            .filter(|kind| *kind != ScopeKind::Program)
            .ok_or_else(|| ScopeError::invalid_node(Construct::Scope, arena, node))?;

        let id = ScopeId::next(self.scopes.len())?;
        self.scopes.push(Scope::new(kind, Some(node), Some(parent)));
        self.scopes[parent.index()].children.push(id);
        debug!(scope = %id, parent = %parent, kind = %kind, node = node.0, "Created scope");
        Ok(id)
    }

    /// Declare the name bound by `node` in the nearest variable scope of
    /// `scope` and record `node` as a declaration.
    ///
    /// `node` is a variable declarator, a function node or an identifier.
    /// Declaring the same node again is a no-op.
    pub fn declare(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        node: NodeIndex,
    ) -> Result<VariableId, ScopeError> {
        let target = self.resolve_variable_scope(scope);
        self.declare_local(arena, target, node)
    }

    /// Like `declare`, but binds in `scope` itself. Used for parameters,
    /// catch parameters and function expression names.
    pub fn declare_local(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        node: NodeIndex,
    ) -> Result<VariableId, ScopeError> {
        let id = declared_identifier(arena, node)
            .ok_or_else(|| ScopeError::invalid_node(Construct::Declaration, arena, node))?;
        let variable = self.define(arena, scope, Binding::Identifier(id))?;

        let declarations = &mut self.variables[variable.index()].declarations;
        if !declarations.contains(&node) {
            declarations.push(node);
        }
        Ok(variable)
    }

    /// Variable for a binding in `scope`'s own table, created if absent.
    pub fn define(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        binding: Binding,
    ) -> Result<VariableId, ScopeError> {
        let name = match binding {
            Binding::Identifier(node) => arena
                .identifier_name(node)
                .ok_or_else(|| ScopeError::invalid_node(Construct::Variable, arena, node))?,
            Binding::Synthetic(name) => name,
        };
        if let Some(&existing) = self.scopes[scope.index()].variables.get(name) {
            return Ok(existing);
        }

        let variable = match binding {
            Binding::Identifier(node) => Variable::new(arena, node, scope)?,
            Binding::Synthetic(name) => Variable::synthetic(name, scope)?,
        };
        let id = VariableId::next(self.variables.len())?;
        self.variables.push(variable);
        self.scopes[scope.index()]
            .variables
            .insert(name.to_string(), id);
        trace!(scope = %scope, variable = %id, name, "Defined variable");
        Ok(id)
    }

    /// Record the assignment built from `node` in `scope` and link it to the
    /// variable it writes.
    pub fn assign(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        node: NodeIndex,
    ) -> Result<AssignmentId, ScopeError> {
        let mut assignment = Assignment::new(arena, node, scope)?;
        assignment.variable = assignment
            .target_name(arena)
            .map(|name| self.resolve_variable(scope, name))
            .transpose()?;

        let id = AssignmentId::next(self.assignments.len())?;
        if let Some(variable) = assignment.variable {
            self.variables[variable.index()].assignments.push(id);
        }
        self.assignments.push(assignment);
        self.scopes[scope.index()].assignments.push(id);
        Ok(id)
    }

    /// Record a use of `node` in `scope`.
    ///
    /// Returns `None` without recording anything when `node` is absent or
    /// has no root identifier (`[a].slice()`, `(a || b).c`).
    pub fn reference(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        node: NodeIndex,
    ) -> Result<Option<ReferenceId>, ScopeError> {
        if node.is_none() {
            return Ok(None);
        }
        if !Reference::is_required(arena, node) {
            trace!(node = node.0, kind = ?arena.kind(node), "Skipping reference without a root identifier");
            return Ok(None);
        }

        let reference = Reference::new(self, arena, node, scope)?;
        let id = ReferenceId::next(self.references.len())?;
        self.variables[reference.variable.index()].references.push(id);
        self.references.push(reference);
        self.scopes[scope.index()].references.push(id);
        Ok(Some(id))
    }

    /// Declare every `var` declarator and function declaration under
    /// `subtree_root` in the variable scope of `scope`, without entering
    /// nested functions. Returns the number of declaring nodes visited.
    pub fn hoist(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        subtree_root: NodeIndex,
    ) -> Result<usize, ScopeError> {
        let target = self.resolve_variable_scope(scope);
        let owner = self.scopes[scope.index()].node;
        let mut hoisted = 0;

        walk_fn::<ScopeError, _>(arena, subtree_root, |arena, idx, _parent| {
            let Some(kind) = arena.kind(idx) else {
                return Ok(WalkControl::Skip);
            };
            if kind.is_function() && owner == Some(idx) {
                return Ok(WalkControl::Continue);
            }
            match kind {
                NodeKind::FunctionDeclaration => {
                    self.declare_local(arena, target, idx)?;
                    hoisted += 1;
                    Ok(WalkControl::Skip)
                }
                NodeKind::FunctionExpression => Ok(WalkControl::Skip),
                NodeKind::VariableDeclarator => {
                    self.declare_local(arena, target, idx)?;
                    hoisted += 1;
                    Ok(WalkControl::Continue)
                }
                _ => Ok(WalkControl::Continue),
            }
        })?;

        debug!(scope = %scope, target = %target, hoisted, "Hoisted declarations");
        Ok(hoisted)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Variable that `name` refers to from `scope`.
    ///
    /// Ordinary names walk the whole chain and fall back to the root's
    /// unscoped table, creating the unscoped variable on first use. `this`
    /// and `arguments` stop at the nearest variable scope and are defined
    /// there when no nearer binding exists. Program code has no `arguments`
    /// object, so outside functions it resolves like any other name.
    pub fn resolve_variable(&mut self, scope: ScopeId, name: &str) -> Result<VariableId, ScopeError> {
        let target = self.resolve_variable_scope(scope);
        let implicit = synthetic_name(name).filter(|&synthetic| {
            synthetic == THIS || self.scopes[target.index()].kind == ScopeKind::Function
        });
        if let Some(synthetic) = implicit {
            let local = self
                .chain(scope)
                .take_while(|&id| id != target)
                .chain(std::iter::once(target))
                .find_map(|id| self.scopes[id.index()].variables.get(name).copied());
            if let Some(found) = local {
                return Ok(found);
            }
            return self.define_synthetic(target, synthetic);
        }

        match self.find_variable(scope, name) {
            Some(found) => Ok(found),
            None => self.unscoped(name),
        }
    }

    /// Nearest program, function or top-level scope at or above `scope`.
    pub fn resolve_variable_scope(&self, scope: ScopeId) -> ScopeId {
        self.chain(scope)
            .find(|&id| self.is_variable_scope(id))
            .unwrap_or(self.root())
    }

    fn define_synthetic(&mut self, scope: ScopeId, name: &'static str) -> Result<VariableId, ScopeError> {
        let id = VariableId::next(self.variables.len())?;
        self.variables
            .push(Variable::empty(name.to_string(), None, Some(scope)));
        self.scopes[scope.index()]
            .variables
            .insert(name.to_string(), id);
        trace!(scope = %scope, variable = %id, name, "Defined implicit variable");
        Ok(id)
    }

    fn unscoped(&mut self, name: &str) -> Result<VariableId, ScopeError> {
        if let Some(existing) = self.get_unscoped_variable(name) {
            return Ok(existing);
        }
        let id = VariableId::next(self.variables.len())?;
        self.variables.push(Variable::unscoped(name));
        let root = self.root().index();
        self.scopes[root]
            .unscoped_variables
            .get_or_insert_with(VariableTable::default)
            .insert(name.to_string(), id);
        trace!(variable = %id, name, "Created unscoped variable");
        Ok(id)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Nearest declared binding of `name` visible from `scope`, without
    /// creating anything. Unscoped variables are not consulted.
    pub fn find_variable(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        self.chain(scope)
            .find_map(|id| self.scopes[id.index()].variables.get(name).copied())
    }

    /// Binding of `name` in `scope`'s own table.
    pub fn get_variable(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        self.scopes
            .get(scope.index())?
            .variables
            .get(name)
            .copied()
    }

    pub fn get_unscoped_variable(&self, name: &str) -> Option<VariableId> {
        self.scopes
            .first()?
            .unscoped_variables
            .as_ref()?
            .get(name)
            .copied()
    }

    /// Strict ancestors of `scope`, nearest first.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        self.chain(scope).skip(1)
    }

    pub fn is_variable_scope(&self, scope: ScopeId) -> bool {
        self.scopes
            .get(scope.index())
            .is_some_and(|s| s.kind.is_variable_scope())
    }

    /// Scope owned by `node`, if any.
    pub fn scope_of_node(&self, node: NodeIndex) -> Option<ScopeId> {
        self.scopes
            .iter()
            .position(|s| s.node == Some(node))
            .map(ScopeId::from_index)
    }

    /// `scope` followed by its ancestors.
    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        let mut steps = 0usize;
        std::iter::successors(Some(scope), move |id| {
            steps += 1;
            if steps > MAX_SCOPE_WALK_ITERATIONS {
                warn!(scope = %scope, "Scope chain walk limit reached");
                return None;
            }
            self.scopes.get(id.index())?.parent
        })
        .filter(move |id| id.index() < self.scopes.len())
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    pub fn scopes(&self) -> impl ExactSizeIterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, s)| (ScopeId::from_index(i), s))
    }

    pub fn variables(&self) -> impl ExactSizeIterator<Item = (VariableId, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| (VariableId::from_index(i), v))
    }

    pub fn assignments(&self) -> impl ExactSizeIterator<Item = (AssignmentId, &Assignment)> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(i, a)| (AssignmentId::from_index(i), a))
    }

    pub fn references(&self) -> impl ExactSizeIterator<Item = (ReferenceId, &Reference)> {
        self.references
            .iter()
            .enumerate()
            .map(|(i, r)| (ReferenceId::from_index(i), r))
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

/// Identifier bound by a declaring node.
fn declared_identifier(arena: &NodeArena, node: NodeIndex) -> Option<NodeIndex> {
    match arena.data(node)? {
        NodeData::Identifier { .. } => Some(node),
        NodeData::VariableDeclarator { id, .. } => Some(*id),
        NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
            func.id.into_option()
        }
        _ => None,
    }
}

fn synthetic_name(name: &str) -> Option<&'static str> {
    [THIS, ARGUMENTS].into_iter().find(|&s| s == name)
}

impl Index<ScopeId> for ScopeTree {
    type Output = Scope;

    fn index(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }
}

impl Index<VariableId> for ScopeTree {
    type Output = Variable;

    fn index(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }
}

impl Index<AssignmentId> for ScopeTree {
    type Output = Assignment;

    fn index(&self, id: AssignmentId) -> &Assignment {
        &self.assignments[id.index()]
    }
}

impl Index<ReferenceId> for ScopeTree {
    type Output = Reference;

    fn index(&self, id: ReferenceId) -> &Reference {
        &self.references[id.index()]
    }
}
