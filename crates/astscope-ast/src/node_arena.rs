//! Arena-based storage for ESTree nodes.
//! Nodes are stored contiguously and referenced by index.

use crate::base::{NodeIndex, NodeList};
use crate::node::{Node, NodeData, NodeKind};
use crate::walk::{WalkControl, walk_fn};
use astscope_common::Span;
use astscope_common::limits::MAX_NODE_PREALLOC;
use serde::Serialize;
use smallvec::SmallVec;
use std::convert::Infallible;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity.min(MAX_NODE_PREALLOC)),
        }
    }

    /// Add a node to the arena and return its index.
    ///
    /// Children must already be in the arena, so trees are built bottom-up
    /// and the root is usually the last node added.
    pub fn add(&mut self, data: NodeData) -> NodeIndex {
        self.add_with_span(data, Span::DUMMY)
    }

    pub fn add_with_span(&mut self, data: NodeData, span: Span) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new(data, span));
        NodeIndex(index)
    }

    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    #[inline]
    pub fn span(&self, index: NodeIndex) -> Span {
        self.get(index).map_or(Span::DUMMY, |node| node.span)
    }

    /// Name of an `Identifier` node.
    pub fn identifier_name(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of a node, in ESTree visitor-key order.
    ///
    /// Absent optional children are omitted.
    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        let mut out = SmallVec::new();
        let Some(node) = self.get(index) else {
            return out;
        };

        fn push(out: &mut SmallVec<[NodeIndex; 4]>, idx: NodeIndex) {
            if idx.is_some() {
                out.push(idx);
            }
        }
        fn extend(out: &mut SmallVec<[NodeIndex; 4]>, list: &NodeList) {
            out.extend(list.iter().filter(|idx| idx.is_some()));
        }

        match &node.data {
            NodeData::Program { body } | NodeData::BlockStatement { body } => extend(&mut out, body),
            NodeData::Identifier { .. }
            | NodeData::Literal { .. }
            | NodeData::ThisExpression
            | NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::DirectiveStatement { .. } => {}
            NodeData::ArrayExpression { elements } => extend(&mut out, elements),
            NodeData::ObjectExpression { properties } => extend(&mut out, properties),
            NodeData::Property { key, value, .. } => {
                push(&mut out, *key);
                push(&mut out, *value);
            }
            NodeData::FunctionExpression(func) | NodeData::FunctionDeclaration(func) => {
                push(&mut out, func.id);
                extend(&mut out, &func.params);
                push(&mut out, func.body);
            }
            NodeData::SequenceExpression { expressions } => extend(&mut out, expressions),
            NodeData::UnaryExpression { argument, .. }
            | NodeData::UpdateExpression { argument, .. }
            | NodeData::ReturnStatement { argument }
            | NodeData::ThrowStatement { argument } => push(&mut out, *argument),
            NodeData::BinaryExpression { left, right, .. }
            | NodeData::AssignmentExpression { left, right, .. }
            | NodeData::LogicalExpression { left, right, .. } => {
                push(&mut out, *left);
                push(&mut out, *right);
            }
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            }
            | NodeData::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                push(&mut out, *test);
                push(&mut out, *consequent);
                push(&mut out, *alternate);
            }
            NodeData::CallExpression { callee, arguments }
            | NodeData::NewExpression { callee, arguments } => {
                push(&mut out, *callee);
                extend(&mut out, arguments);
            }
            NodeData::MemberExpression {
                object, property, ..
            } => {
                push(&mut out, *object);
                push(&mut out, *property);
            }
            NodeData::ExpressionStatement { expression } => push(&mut out, *expression),
            NodeData::WithStatement { object, body } => {
                push(&mut out, *object);
                push(&mut out, *body);
            }
            NodeData::LabeledStatement { label, body } => {
                push(&mut out, *label);
                push(&mut out, *body);
            }
            NodeData::BreakStatement { label } | NodeData::ContinueStatement { label } => {
                push(&mut out, *label)
            }
            NodeData::SwitchStatement {
                discriminant,
                cases,
            } => {
                push(&mut out, *discriminant);
                extend(&mut out, cases);
            }
            NodeData::SwitchCase { test, consequent } => {
                push(&mut out, *test);
                extend(&mut out, consequent);
            }
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                push(&mut out, *block);
                push(&mut out, *handler);
                push(&mut out, *finalizer);
            }
            NodeData::CatchClause { param, body } => {
                push(&mut out, *param);
                push(&mut out, *body);
            }
            NodeData::WhileStatement { test, body } => {
                push(&mut out, *test);
                push(&mut out, *body);
            }
            NodeData::DoWhileStatement { body, test } => {
                push(&mut out, *body);
                push(&mut out, *test);
            }
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                push(&mut out, *init);
                push(&mut out, *test);
                push(&mut out, *update);
                push(&mut out, *body);
            }
            NodeData::ForInStatement { left, right, body } => {
                push(&mut out, *left);
                push(&mut out, *right);
                push(&mut out, *body);
            }
            NodeData::VariableDeclaration { declarations, .. } => extend(&mut out, declarations),
            NodeData::VariableDeclarator { id, init } => {
                push(&mut out, *id);
                push(&mut out, *init);
            }
        }

        out
    }

    /// First node under `root` (pre-order, `root` included) matching `pred`.
    pub fn find_first<F>(&self, root: NodeIndex, mut pred: F) -> Option<NodeIndex>
    where
        F: FnMut(&Node) -> bool,
    {
        let mut found = None;
        let _ = walk_fn(self, root, |arena, idx, _parent| {
            let hit = arena.get(idx).is_some_and(&mut pred);
            if hit {
                found = Some(idx);
                return Ok::<_, Infallible>(WalkControl::Break);
            }
            Ok(WalkControl::Continue)
        });
        found
    }

    /// First node of the given kind under `root`.
    pub fn find_kind(&self, root: NodeIndex, kind: NodeKind) -> Option<NodeIndex> {
        self.find_first(root, |node| node.kind() == kind)
    }

    /// First `Identifier` named `name` under `root`.
    pub fn find_identifier(&self, root: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.find_first(root, |node| {
            matches!(&node.data, NodeData::Identifier { name: n } if n == name)
        })
    }
}
