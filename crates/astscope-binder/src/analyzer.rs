//! Single-pass scope analysis driver.
//!
//! The analyzer walks the tree once with an explicit stack of open scopes.
//! Entering a scope-introducing node creates the child scope and hoists its
//! declarations before any of its children are visited; every node is then
//! dispatched by kind to `declare`, `assign` or `reference` on the current
//! scope. Leaving the node pops the scope.

use crate::error::ScopeError;
use crate::ids::ScopeId;
use crate::options::{AnalyzerOptions, LexicalScopeMode};
use crate::scope::{ScopeKind, ScopeTree};
use astscope_ast::{NodeArena, NodeData, NodeIndex, NodeKind, Visitor, WalkControl, walk};
use tracing::{debug, trace};

/// Scope analyzer with fixed options.
#[derive(Clone, Copy, Debug, Default)]
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer::default()
    }

    pub fn with_options(options: AnalyzerOptions) -> Self {
        Analyzer { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyze the tree rooted at `root`.
    ///
    /// A `Program` root owns the root scope. Any other root is wrapped in a
    /// synthetic top-level scope that receives its hoisted declarations and
    /// unscoped names.
    #[tracing::instrument(level = "debug", skip_all, fields(root = root.0))]
    pub fn analyze(&self, arena: &NodeArena, root: NodeIndex) -> Result<ScopeTree, ScopeError> {
        let program = (arena.kind(root) == Some(NodeKind::Program)).then_some(root);
        let mut tree = ScopeTree::new(arena, program)?;

        let mut builder = ScopeBuilder {
            tree: &mut tree,
            options: self.options,
            stack: Vec::new(),
            root,
        };
        if program.is_none() {
            let top = builder.tree.root();
            builder.tree.hoist(arena, top, root)?;
            builder.stack.push(top);
        }
        walk(arena, root, &mut builder)?;

        debug!(
            scopes = tree.scope_count(),
            variables = tree.variables().len(),
            references = tree.references().len(),
            "Analysis complete"
        );
        Ok(tree)
    }
}

/// Analyze with default options.
pub fn analyze(arena: &NodeArena, root: NodeIndex) -> Result<ScopeTree, ScopeError> {
    Analyzer::new().analyze(arena, root)
}

struct ScopeBuilder<'t> {
    tree: &'t mut ScopeTree,
    options: AnalyzerOptions,
    /// Open scopes, innermost last.
    stack: Vec<ScopeId>,
    root: NodeIndex,
}

impl ScopeBuilder<'_> {
    fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(self.tree.root())
    }

    fn introduces_scope(&self, kind: NodeKind) -> bool {
        match ScopeKind::for_node(kind) {
            Some(ScopeKind::Catch | ScopeKind::With) => {
                self.options.lexical_scopes == LexicalScopeMode::Separate
            }
            Some(_) => true,
            None => false,
        }
    }

    fn open_scope(&mut self, arena: &NodeArena, idx: NodeIndex) -> Result<ScopeId, ScopeError> {
        let scope = if idx == self.root && self.stack.is_empty() {
            self.tree.root()
        } else {
            self.tree.create_child(arena, self.current(), idx)?
        };
        self.tree.hoist(arena, scope, idx)?;
        self.stack.push(scope);
        debug!(scope = %scope, node = idx.0, "Entered scope");
        Ok(scope)
    }

    fn reference_all(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        nodes: impl IntoIterator<Item = NodeIndex>,
    ) -> Result<(), ScopeError> {
        for node in nodes {
            self.tree.reference(arena, scope, node)?;
        }
        Ok(())
    }

    /// Apply the binding effects of one node. `outer` is the scope enclosing
    /// the node, `scope` the innermost open scope (the node's own scope when
    /// it introduces one).
    fn dispatch(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        data: &NodeData,
        outer: ScopeId,
        scope: ScopeId,
    ) -> Result<(), ScopeError> {
        match data {
            NodeData::AssignmentExpression { left, right, .. } => {
                self.tree.assign(arena, scope, idx)?;
                self.reference_all(arena, scope, [*left, *right])?;
            }
            NodeData::ArrayExpression { elements } => {
                self.reference_all(arena, scope, elements.iter())?;
            }
            NodeData::BinaryExpression { left, right, .. }
            | NodeData::LogicalExpression { left, right, .. } => {
                self.reference_all(arena, scope, [*left, *right])?;
            }
            NodeData::CallExpression { arguments, .. } | NodeData::NewExpression { arguments, .. } => {
                self.reference_all(arena, scope, arguments.iter())?;
            }
            NodeData::CatchClause { param, .. } => {
                match self.options.lexical_scopes {
                    LexicalScopeMode::Separate => self.tree.declare_local(arena, scope, *param)?,
                    LexicalScopeMode::Fold => self.tree.declare(arena, scope, *param)?,
                };
            }
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.reference_all(arena, scope, [*test, *consequent, *alternate])?;
            }
            NodeData::DoWhileStatement { test, .. }
            | NodeData::WhileStatement { test, .. }
            | NodeData::IfStatement { test, .. } => {
                self.tree.reference(arena, scope, *test)?;
            }
            NodeData::ExpressionStatement { expression } => {
                self.tree.reference(arena, scope, *expression)?;
            }
            NodeData::ForStatement {
                init, test, update, ..
            } => {
                self.reference_all(arena, scope, [*init, *test, *update])?;
            }
            NodeData::ForInStatement { left, right, .. } => {
                self.reference_all(arena, scope, [*left, *right])?;
            }
            NodeData::FunctionDeclaration(func) => {
                self.tree.declare(arena, outer, idx)?;
                self.tree.assign(arena, outer, idx)?;
                self.tree.reference(arena, outer, func.id)?;
                for param in func.params.iter() {
                    self.tree.declare_local(arena, scope, param)?;
                }
            }
            NodeData::FunctionExpression(func) => {
                if func.id.is_some() {
                    self.tree.declare_local(arena, scope, idx)?;
                }
                for param in func.params.iter() {
                    self.tree.declare_local(arena, scope, param)?;
                }
            }
            NodeData::MemberExpression {
                property, computed, ..
            } => {
                if *computed {
                    self.tree.reference(arena, scope, *property)?;
                }
            }
            NodeData::Property { value, .. } => {
                self.tree.reference(arena, scope, *value)?;
            }
            NodeData::ReturnStatement { argument }
            | NodeData::ThrowStatement { argument }
            | NodeData::UnaryExpression { argument, .. }
            | NodeData::UpdateExpression { argument, .. } => {
                self.tree.reference(arena, scope, *argument)?;
            }
            NodeData::SequenceExpression { expressions } => {
                self.reference_all(arena, scope, expressions.iter())?;
            }
            NodeData::SwitchStatement { discriminant, .. } => {
                self.tree.reference(arena, scope, *discriminant)?;
            }
            NodeData::SwitchCase { test, .. } => {
                self.tree.reference(arena, scope, *test)?;
            }
            NodeData::VariableDeclarator { id, init } => {
                self.tree.declare(arena, scope, idx)?;
                if init.is_some() {
                    self.tree.assign(arena, scope, idx)?;
                    self.reference_all(arena, scope, [*id, *init])?;
                }
            }
            NodeData::WithStatement { object, .. } => {
                self.tree.reference(arena, outer, *object)?;
            }
            NodeData::Program { .. }
            | NodeData::Identifier { .. }
            | NodeData::Literal { .. }
            | NodeData::ThisExpression
            | NodeData::ObjectExpression { .. }
            | NodeData::BlockStatement { .. }
            | NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::LabeledStatement { .. }
            | NodeData::BreakStatement { .. }
            | NodeData::ContinueStatement { .. }
            | NodeData::TryStatement { .. }
            | NodeData::VariableDeclaration { .. }
            | NodeData::DirectiveStatement { .. } => {}
        }
        Ok(())
    }
}

impl Visitor for ScopeBuilder<'_> {
    type Error = ScopeError;

    fn enter(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        _parent: NodeIndex,
    ) -> Result<WalkControl, ScopeError> {
        let Some(node) = arena.get(idx) else {
            return Ok(WalkControl::Skip);
        };
        let outer = self.current();
        let scope = if self.introduces_scope(node.kind()) {
            self.open_scope(arena, idx)?
        } else {
            outer
        };
        trace!(node = idx.0, kind = %node.kind(), scope = %scope, "Binding node");
        self.dispatch(arena, idx, &node.data, outer, scope)?;
        Ok(WalkControl::Continue)
    }

    fn leave(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
        _parent: NodeIndex,
    ) -> Result<WalkControl, ScopeError> {
        if arena.kind(idx).is_some_and(|kind| self.introduces_scope(kind)) {
            if let Some(scope) = self.stack.pop() {
                debug!(scope = %scope, node = idx.0, "Left scope");
            }
        }
        Ok(WalkControl::Continue)
    }
}
