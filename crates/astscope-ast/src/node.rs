//! ESTree node definitions.
//!
//! `NodeData` is a closed sum type over the ES5 ESTree grammar (plus the
//! legacy esprima `DirectiveStatement`). Consumers match on it exhaustively,
//! so adding a kind here surfaces every dispatch site that must handle it.

use crate::base::{NodeIndex, NodeList};
use astscope_common::Span;
use serde::Serialize;

/// A node stored in the arena.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub data: NodeData,
    pub span: Span,
}

impl Node {
    pub fn new(data: NodeData, span: Span) -> Node {
        Node { data, span }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

/// Shared shape of function declarations and function expressions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Function {
    /// Function name; `NONE` for anonymous function expressions.
    pub id: NodeIndex,
    pub params: NodeList,
    pub body: NodeIndex,
}

/// `var`, `let` or `const`.
///
/// The analyzer treats all three as function-scoped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// Object literal property kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    #[default]
    Init,
    Get,
    Set,
}

/// Value of a `Literal` node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    RegExp { pattern: String, flags: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeData {
    Program {
        body: NodeList,
    },
    Identifier {
        name: String,
    },
    Literal {
        value: LiteralValue,
        /// Source text of the literal, when the producer recorded it.
        raw: Option<String>,
    },
    ThisExpression,
    ArrayExpression {
        /// Elided elements (`[a, , b]`) are `NodeIndex::NONE`.
        elements: NodeList,
    },
    ObjectExpression {
        properties: NodeList,
    },
    Property {
        key: NodeIndex,
        value: NodeIndex,
        kind: PropertyKind,
    },
    FunctionExpression(Function),
    FunctionDeclaration(Function),
    SequenceExpression {
        expressions: NodeList,
    },
    UnaryExpression {
        operator: String,
        prefix: bool,
        argument: NodeIndex,
    },
    BinaryExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    AssignmentExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    UpdateExpression {
        operator: String,
        prefix: bool,
        argument: NodeIndex,
    },
    LogicalExpression {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    ConditionalExpression {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    CallExpression {
        callee: NodeIndex,
        arguments: NodeList,
    },
    NewExpression {
        callee: NodeIndex,
        arguments: NodeList,
    },
    MemberExpression {
        object: NodeIndex,
        property: NodeIndex,
        computed: bool,
    },
    ExpressionStatement {
        expression: NodeIndex,
    },
    BlockStatement {
        body: NodeList,
    },
    EmptyStatement,
    DebuggerStatement,
    WithStatement {
        object: NodeIndex,
        body: NodeIndex,
    },
    ReturnStatement {
        argument: NodeIndex,
    },
    LabeledStatement {
        label: NodeIndex,
        body: NodeIndex,
    },
    BreakStatement {
        label: NodeIndex,
    },
    ContinueStatement {
        label: NodeIndex,
    },
    IfStatement {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    SwitchStatement {
        discriminant: NodeIndex,
        cases: NodeList,
    },
    SwitchCase {
        /// `NONE` for the `default:` clause.
        test: NodeIndex,
        consequent: NodeList,
    },
    ThrowStatement {
        argument: NodeIndex,
    },
    TryStatement {
        block: NodeIndex,
        handler: NodeIndex,
        finalizer: NodeIndex,
    },
    CatchClause {
        param: NodeIndex,
        body: NodeIndex,
    },
    WhileStatement {
        test: NodeIndex,
        body: NodeIndex,
    },
    DoWhileStatement {
        body: NodeIndex,
        test: NodeIndex,
    },
    ForStatement {
        init: NodeIndex,
        test: NodeIndex,
        update: NodeIndex,
        body: NodeIndex,
    },
    ForInStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
    },
    VariableDeclaration {
        declarations: NodeList,
        kind: VariableKind,
    },
    VariableDeclarator {
        id: NodeIndex,
        init: NodeIndex,
    },
    DirectiveStatement {
        directive: String,
    },
}

macro_rules! node_kinds {
    ($($kind:ident),+ $(,)?) => {
        /// Fieldless mirror of `NodeData`, named after the ESTree `type` tag.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub enum NodeKind {
            $($kind,)+
        }

        impl NodeKind {
            /// Every supported kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind,)+];

            /// The ESTree `type` tag for this kind.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)+
                }
            }

            /// Look up a kind by its ESTree `type` tag.
            pub fn from_type_tag(tag: &str) -> Option<NodeKind> {
                match tag {
                    $(stringify!($kind) => Some(NodeKind::$kind),)+
                    _ => None,
                }
            }
        }
    };
}

node_kinds!(
    Program,
    Identifier,
    Literal,
    ThisExpression,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    FunctionDeclaration,
    SequenceExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    UpdateExpression,
    LogicalExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    WithStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    VariableDeclaration,
    VariableDeclarator,
    DirectiveStatement,
);

impl NodeKind {
    #[inline]
    pub const fn is_function(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration | NodeKind::FunctionExpression
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeData {
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeData::Program { .. } => NodeKind::Program,
            NodeData::Identifier { .. } => NodeKind::Identifier,
            NodeData::Literal { .. } => NodeKind::Literal,
            NodeData::ThisExpression => NodeKind::ThisExpression,
            NodeData::ArrayExpression { .. } => NodeKind::ArrayExpression,
            NodeData::ObjectExpression { .. } => NodeKind::ObjectExpression,
            NodeData::Property { .. } => NodeKind::Property,
            NodeData::FunctionExpression(_) => NodeKind::FunctionExpression,
            NodeData::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            NodeData::SequenceExpression { .. } => NodeKind::SequenceExpression,
            NodeData::UnaryExpression { .. } => NodeKind::UnaryExpression,
            NodeData::BinaryExpression { .. } => NodeKind::BinaryExpression,
            NodeData::AssignmentExpression { .. } => NodeKind::AssignmentExpression,
            NodeData::UpdateExpression { .. } => NodeKind::UpdateExpression,
            NodeData::LogicalExpression { .. } => NodeKind::LogicalExpression,
            NodeData::ConditionalExpression { .. } => NodeKind::ConditionalExpression,
            NodeData::CallExpression { .. } => NodeKind::CallExpression,
            NodeData::NewExpression { .. } => NodeKind::NewExpression,
            NodeData::MemberExpression { .. } => NodeKind::MemberExpression,
            NodeData::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            NodeData::BlockStatement { .. } => NodeKind::BlockStatement,
            NodeData::EmptyStatement => NodeKind::EmptyStatement,
            NodeData::DebuggerStatement => NodeKind::DebuggerStatement,
            NodeData::WithStatement { .. } => NodeKind::WithStatement,
            NodeData::ReturnStatement { .. } => NodeKind::ReturnStatement,
            NodeData::LabeledStatement { .. } => NodeKind::LabeledStatement,
            NodeData::BreakStatement { .. } => NodeKind::BreakStatement,
            NodeData::ContinueStatement { .. } => NodeKind::ContinueStatement,
            NodeData::IfStatement { .. } => NodeKind::IfStatement,
            NodeData::SwitchStatement { .. } => NodeKind::SwitchStatement,
            NodeData::SwitchCase { .. } => NodeKind::SwitchCase,
            NodeData::ThrowStatement { .. } => NodeKind::ThrowStatement,
            NodeData::TryStatement { .. } => NodeKind::TryStatement,
            NodeData::CatchClause { .. } => NodeKind::CatchClause,
            NodeData::WhileStatement { .. } => NodeKind::WhileStatement,
            NodeData::DoWhileStatement { .. } => NodeKind::DoWhileStatement,
            NodeData::ForStatement { .. } => NodeKind::ForStatement,
            NodeData::ForInStatement { .. } => NodeKind::ForInStatement,
            NodeData::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            NodeData::VariableDeclarator { .. } => NodeKind::VariableDeclarator,
            NodeData::DirectiveStatement { .. } => NodeKind::DirectiveStatement,
        }
    }

    /// Function payload of a function declaration or expression.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => Some(func),
            _ => None,
        }
    }
}
