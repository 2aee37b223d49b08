use super::driver::AnalyzedFile;
use super::reporter::Reporter;
use anyhow::anyhow;
use astscope_ast::from_json_str;
use astscope_binder::{ScopeReport, analyze};
use std::path::PathBuf;

fn report_for(text: &str) -> ScopeReport {
    let (arena, root) = from_json_str(text).expect("valid ESTree");
    let tree = analyze(&arena, root).expect("analysis");
    ScopeReport::from_tree(&arena, &tree)
}

fn sample() -> Vec<AnalyzedFile> {
    // var foo = 1; function f(a) { this; bar = a; }
    let text = r#"{
        "type": "Program",
        "body": [
            {
                "type": "VariableDeclaration",
                "kind": "var",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": { "type": "Identifier", "name": "foo" },
                    "init": { "type": "Literal", "value": 1, "raw": "1" }
                }]
            },
            {
                "type": "FunctionDeclaration",
                "id": { "type": "Identifier", "name": "f" },
                "params": [{ "type": "Identifier", "name": "a" }],
                "body": {
                    "type": "BlockStatement",
                    "body": [
                        { "type": "ExpressionStatement", "expression": { "type": "ThisExpression" } },
                        {
                            "type": "ExpressionStatement",
                            "expression": {
                                "type": "AssignmentExpression",
                                "operator": "=",
                                "left": { "type": "Identifier", "name": "bar" },
                                "right": { "type": "Identifier", "name": "a" }
                            }
                        }
                    ]
                },
                "range": [13, 52]
            }
        ]
    }"#;
    vec![
        AnalyzedFile {
            path: PathBuf::from("a.json"),
            result: Ok(report_for(text)),
        },
        AnalyzedFile {
            path: PathBuf::from("b.json"),
            result: Err(anyhow!("unsupported ESTree node type `ClassDeclaration`")
                .context("failed to load ESTree from b.json")),
        },
    ]
}

#[test]
fn renders_plain_text() {
    let text = Reporter::new(false).render_text(&sample());
    let expected = "\
a.json
  program (Program): 2 assignments, 2 references
    foo: 1 declaration, 1 reference
      foo = 1
    f: 1 declaration, 1 reference
      f = function f(a) { this; bar = a; }
    unscoped bar: 0 declarations, 1 reference
      bar = a
    function (FunctionDeclaration 13..52): 1 assignment, 3 references
      a: 1 declaration, 1 reference
      this (implicit): 0 declarations, 1 reference

b.json - error: failed to load ESTree from b.json: unsupported ESTree node type `ClassDeclaration`
";
    assert_eq!(text, expected);
}

#[test]
fn renders_json() {
    let json = Reporter::new(false).render_json(&sample()).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value[0]["path"], "a.json");
    assert_eq!(value[0]["scope"]["kind"], "program");
    assert_eq!(value[0]["scope"]["variables"][0]["name"], "foo");
    assert_eq!(value[0]["scope"]["children"][0]["span"]["start"], 13);
    assert!(value[0].get("error").is_none());
    assert!(value[1].get("scope").is_none());
    assert_eq!(
        value[1]["error"],
        "failed to load ESTree from b.json: unsupported ESTree node type `ClassDeclaration`"
    );
}

#[test]
fn renders_summary() {
    let files = sample();
    let reporter = Reporter::new(false);
    assert_eq!(reporter.render_summary(&files), "2 files analyzed, 1 failed");
    assert_eq!(reporter.render_summary(&files[..1]), "1 file analyzed");
}

#[test]
fn color_adds_escape_codes() {
    colored::control::set_override(true);
    let text = Reporter::new(true).render_text(&sample()[..1]);
    assert!(text.contains("\u{1b}["));
}
