//! ESTree builders and analysis helpers shared by the binder tests.
#![allow(dead_code)]

use astscope_ast::{NodeArena, NodeIndex, from_value};
use astscope_binder::{Analyzer, AnalyzerOptions, ScopeId, ScopeTree, Variable, VariableId};
use serde_json::{Value, json};

pub struct Analyzed {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub tree: ScopeTree,
}

impl Analyzed {
    /// Variable named `name` in `scope`'s own table.
    pub fn var(&self, scope: ScopeId, name: &str) -> &Variable {
        let id = self
            .tree
            .get_variable(scope, name)
            .unwrap_or_else(|| panic!("no variable `{name}` in {scope}"));
        &self.tree[id]
    }

    pub fn unscoped(&self, name: &str) -> &Variable {
        let id = self
            .tree
            .get_unscoped_variable(name)
            .unwrap_or_else(|| panic!("no unscoped variable `{name}`"));
        &self.tree[id]
    }

    /// Names of the references recorded in `scope`, in order.
    pub fn reference_names(&self, scope: ScopeId) -> Vec<&str> {
        self.tree[scope]
            .references
            .iter()
            .map(|&r| self.tree[r].name(&self.arena))
            .collect()
    }

    pub fn variable_names(&self, scope: ScopeId) -> Vec<&str> {
        self.tree[scope].variables.keys().map(String::as_str).collect()
    }

    pub fn child(&self, scope: ScopeId, n: usize) -> ScopeId {
        self.tree[scope].children[n]
    }

    pub fn kind(&self, node: NodeIndex) -> Option<astscope_ast::NodeKind> {
        self.arena.kind(node)
    }

    pub fn find_var(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        self.tree.find_variable(scope, name)
    }
}

pub fn lower(doc: &Value) -> (NodeArena, NodeIndex) {
    let mut arena = NodeArena::new();
    let root = from_value(&mut arena, doc).expect("valid ESTree document");
    (arena, root)
}

pub fn analyze_json(doc: Value) -> Analyzed {
    analyze_with(doc, AnalyzerOptions::default())
}

pub fn analyze_with(doc: Value, options: AnalyzerOptions) -> Analyzed {
    let (arena, root) = lower(&doc);
    let tree = Analyzer::with_options(options)
        .analyze(&arena, root)
        .expect("analysis should succeed");
    Analyzed { arena, root, tree }
}

// =============================================================================
// ESTree builders
// =============================================================================

pub fn program(body: Vec<Value>) -> Value {
    json!({ "type": "Program", "body": body })
}

pub fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

pub fn this() -> Value {
    json!({ "type": "ThisExpression" })
}

pub fn num(value: f64) -> Value {
    json!({ "type": "Literal", "value": value, "raw": value.to_string() })
}

pub fn string(value: &str) -> Value {
    json!({ "type": "Literal", "value": value, "raw": format!("'{value}'") })
}

pub fn expr(expression: Value) -> Value {
    json!({ "type": "ExpressionStatement", "expression": expression })
}

pub fn block(body: Vec<Value>) -> Value {
    json!({ "type": "BlockStatement", "body": body })
}

pub fn var(declarations: Vec<(&str, Option<Value>)>) -> Value {
    let declarations: Vec<Value> = declarations
        .into_iter()
        .map(|(name, init)| {
            json!({ "type": "VariableDeclarator", "id": ident(name), "init": init })
        })
        .collect();
    json!({ "type": "VariableDeclaration", "kind": "var", "declarations": declarations })
}

pub fn assign(left: Value, operator: &str, right: Value) -> Value {
    json!({ "type": "AssignmentExpression", "operator": operator, "left": left, "right": right })
}

pub fn member(object: Value, property: Value) -> Value {
    json!({ "type": "MemberExpression", "object": object, "property": property, "computed": false })
}

pub fn index(object: Value, property: Value) -> Value {
    json!({ "type": "MemberExpression", "object": object, "property": property, "computed": true })
}

pub fn call(callee: Value, arguments: Vec<Value>) -> Value {
    json!({ "type": "CallExpression", "callee": callee, "arguments": arguments })
}

pub fn new(callee: Value, arguments: Vec<Value>) -> Value {
    json!({ "type": "NewExpression", "callee": callee, "arguments": arguments })
}

pub fn array(elements: Vec<Value>) -> Value {
    json!({ "type": "ArrayExpression", "elements": elements })
}

pub fn binary(left: Value, operator: &str, right: Value) -> Value {
    json!({ "type": "BinaryExpression", "operator": operator, "left": left, "right": right })
}

pub fn function(name: &str, params: &[&str], body: Vec<Value>) -> Value {
    let params: Vec<Value> = params.iter().map(|p| ident(p)).collect();
    json!({ "type": "FunctionDeclaration", "id": ident(name), "params": params, "body": block(body) })
}

pub fn function_expr(name: Option<&str>, params: &[&str], body: Vec<Value>) -> Value {
    let params: Vec<Value> = params.iter().map(|p| ident(p)).collect();
    json!({
        "type": "FunctionExpression",
        "id": name.map(ident),
        "params": params,
        "body": block(body)
    })
}

pub fn ret(argument: Value) -> Value {
    json!({ "type": "ReturnStatement", "argument": argument })
}

pub fn try_catch(block_body: Vec<Value>, param: &str, handler_body: Vec<Value>) -> Value {
    json!({
        "type": "TryStatement",
        "block": block(block_body),
        "handler": { "type": "CatchClause", "param": ident(param), "body": block(handler_body) },
        "finalizer": null
    })
}

pub fn with(object: Value, body: Vec<Value>) -> Value {
    json!({ "type": "WithStatement", "object": object, "body": block(body) })
}
