//! Direct use of the `ScopeTree` operations.

mod support;

use astscope_ast::NodeKind;
use astscope_binder::{Binding, Construct, ScopeError, ScopeKind, ScopeTree};
use serde_json::json;
use support::*;

#[test]
fn test_new_requires_program_or_nothing() {
    let (arena, root) = lower(&program(vec![]));
    let tree = ScopeTree::new(&arena, Some(root)).expect("program scope");
    assert_eq!(tree[tree.root()].kind, ScopeKind::Program);
    assert_eq!(tree[tree.root()].node, Some(root));

    let top = ScopeTree::new(&arena, None).expect("top-level scope");
    assert_eq!(top[top.root()].kind, ScopeKind::TopLevel);

    let (arena, foo) = lower(&ident("foo"));
    let err = ScopeTree::new(&arena, Some(foo)).unwrap_err();
    assert!(matches!(
        err,
        ScopeError::InvalidNodeKind {
            construct: Construct::Scope,
            kind: Some(NodeKind::Identifier),
            ..
        }
    ));
}

#[test]
fn test_create_child_rejects_non_scope_nodes() {
    let (arena, root) = lower(&program(vec![
        function("f", &[], vec![]),
        expr(ident("x")),
    ]));
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");
    let func = arena
        .find_kind(root, NodeKind::FunctionDeclaration)
        .expect("function");
    let x = arena.find_identifier(root, "x").expect("identifier");

    let child = tree.create_child(&arena, tree.root(), func).expect("function scope");
    assert_eq!(tree[child].kind, ScopeKind::Function);
    assert_eq!(tree[child].parent, Some(tree.root()));
    assert_eq!(tree[tree.root()].children, [child]);
    assert!(tree[child].unscoped_variables.is_none());

    assert!(tree.create_child(&arena, tree.root(), x).is_err());
    assert!(tree.create_child(&arena, tree.root(), root).is_err());
    assert_eq!(tree.scope_count(), 2);
}

#[test]
fn test_declare_targets_variable_scope_and_is_idempotent() {
    // try {} catch (e) { var v; }
    let (arena, root) = lower(&program(vec![try_catch(
        vec![],
        "e",
        vec![var(vec![("v", None)])],
    )]));
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");
    let catch = arena.find_kind(root, NodeKind::CatchClause).expect("catch");
    let declarator = arena
        .find_kind(root, NodeKind::VariableDeclarator)
        .expect("declarator");
    let param = arena.find_identifier(catch, "e").expect("param");

    let catch_scope = tree.create_child(&arena, tree.root(), catch).expect("catch scope");
    let v = tree.declare(&arena, catch_scope, declarator).expect("declare");
    let again = tree.declare(&arena, catch_scope, declarator).expect("declare");
    let e = tree.declare_local(&arena, catch_scope, param).expect("declare param");

    assert_eq!(v, again);
    assert_eq!(tree[v].declarations.len(), 1);
    assert_eq!(tree[v].scope, Some(tree.root()));
    assert_eq!(tree.get_variable(tree.root(), "v"), Some(v));
    assert_eq!(tree.get_variable(catch_scope, "e"), Some(e));
    assert_eq!(tree.find_variable(catch_scope, "v"), Some(v));
    assert_eq!(tree.find_variable(tree.root(), "e"), None);
    assert_eq!(tree.resolve_variable_scope(catch_scope), tree.root());
    assert!(!tree.is_variable_scope(catch_scope));
}

#[test]
fn test_declare_rejects_non_declaring_nodes() {
    let (arena, root) = lower(&program(vec![expr(num(1.0))]));
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");
    let literal = arena.find_kind(root, NodeKind::Literal).expect("literal");

    let err = tree.declare(&arena, tree.root(), literal).unwrap_err();
    assert!(matches!(
        err,
        ScopeError::InvalidNodeKind {
            construct: Construct::Declaration,
            ..
        }
    ));
    assert_eq!(tree.variables().len(), 0);
}

#[test]
fn test_define_synthetic_and_identifier() {
    let (arena, root) = lower(&program(vec![expr(ident("foo"))]));
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");
    let foo = arena.find_identifier(root, "foo").expect("identifier");

    let this = tree
        .define(&arena, tree.root(), Binding::Synthetic("this"))
        .expect("define this");
    assert!(tree[this].is_synthetic());
    let var = tree
        .define(&arena, tree.root(), Binding::Identifier(foo))
        .expect("define foo");
    assert_eq!(tree[var].node, Some(foo));
    assert!(tree[var].declarations.is_empty());

    // Defining an existing name returns the same variable.
    assert_eq!(
        tree.define(&arena, tree.root(), Binding::Identifier(foo)),
        Ok(var)
    );
    assert!(matches!(
        tree.define(&arena, tree.root(), Binding::Synthetic("self")),
        Err(ScopeError::InvalidSyntheticName { .. })
    ));
}

#[test]
fn test_resolve_creates_unscoped_once() {
    let (arena, root) = lower(&program(vec![]));
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");

    let first = tree.resolve_variable(tree.root(), "window").expect("resolves");
    let second = tree.resolve_variable(tree.root(), "window").expect("resolves");
    assert_eq!(first, second);
    assert!(tree[first].is_unscoped());
    assert_eq!(tree.get_unscoped_variable("window"), Some(first));
    assert_eq!(tree.find_variable(tree.root(), "window"), None);
}

#[test]
fn test_reference_skips_unrootable_nodes() {
    // [foo].slice();
    let doc = program(vec![expr(call(
        member(array(vec![ident("foo")]), ident("slice")),
        vec![],
    ))]);
    let (arena, root) = lower(&doc);
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");
    let call = arena.find_kind(root, NodeKind::CallExpression).expect("call");
    let foo = arena.find_identifier(root, "foo").expect("identifier");

    assert_eq!(tree.reference(&arena, tree.root(), call), Ok(None));
    assert_eq!(
        tree.reference(&arena, tree.root(), astscope_ast::NodeIndex::NONE),
        Ok(None)
    );
    let id = tree
        .reference(&arena, tree.root(), foo)
        .expect("reference")
        .expect("rootable");
    assert_eq!(tree[id].node, foo);
    assert_eq!(tree.references().len(), 1);
}

#[test]
fn test_assign_links_declared_variable() {
    // var a = 1; a += 2;
    let doc = program(vec![
        var(vec![("a", Some(num(1.0)))]),
        expr(assign(ident("a"), "+=", num(2.0))),
    ]);
    let (arena, root) = lower(&doc);
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");
    let declarator = arena
        .find_kind(root, NodeKind::VariableDeclarator)
        .expect("declarator");
    let write = arena
        .find_kind(root, NodeKind::AssignmentExpression)
        .expect("assignment");

    let a = tree.declare(&arena, tree.root(), declarator).expect("declare");
    let init = tree.assign(&arena, tree.root(), declarator).expect("assign");
    let update = tree.assign(&arena, tree.root(), write).expect("assign");

    assert_eq!(tree[a].assignments, [init, update]);
    assert_eq!(tree[update].operator, "+=");
    assert_eq!(tree[update].variable, Some(a));
    assert_eq!(tree[tree.root()].assignments.len(), 2);

    let err = tree.assign(&arena, tree.root(), root).unwrap_err();
    assert!(matches!(
        err,
        ScopeError::InvalidNodeKind {
            construct: Construct::Assignment,
            kind: Some(NodeKind::Program),
            ..
        }
    ));
}

#[test]
fn test_hoist_counts_declarations_and_skips_functions() {
    // var a; function f() { var b; } (function g() { var c; });
    let doc = program(vec![
        var(vec![("a", None)]),
        function("f", &[], vec![var(vec![("b", None)])]),
        expr(function_expr(Some("g"), &[], vec![var(vec![("c", None)])])),
    ]);
    let (arena, root) = lower(&doc);
    let mut tree = ScopeTree::new(&arena, Some(root)).expect("program scope");

    let hoisted = tree.hoist(&arena, tree.root(), root).expect("hoist");
    assert_eq!(hoisted, 2);
    let names: Vec<&str> = tree[tree.root()]
        .variables
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, ["a", "f"]);

    // Hoisting a function's own scope enters its body.
    let func = arena
        .find_kind(root, NodeKind::FunctionDeclaration)
        .expect("function");
    let scope = tree.create_child(&arena, tree.root(), func).expect("scope");
    assert_eq!(tree.hoist(&arena, scope, func).expect("hoist"), 1);
    assert!(tree.get_variable(scope, "b").is_some());
}

#[test]
fn test_hoist_into_top_level_wrapper() {
    let doc = json!({
        "type": "BlockStatement",
        "body": [var(vec![("x", None)])]
    });
    let (arena, root) = lower(&doc);
    let mut tree = ScopeTree::new(&arena, None).expect("top-level scope");

    assert_eq!(tree.hoist(&arena, tree.root(), root), Ok(1));
    assert!(tree.get_variable(tree.root(), "x").is_some());
    assert!(tree.scope_of_node(root).is_none());
}

#[test]
fn test_empty_program() {
    let (arena, root) = lower(&program(vec![]));
    let tree = astscope_binder::analyze(&arena, root).expect("analysis");
    assert_eq!(tree.scope_count(), 1);
    assert_eq!(tree.variables().len(), 0);
}
