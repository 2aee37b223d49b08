//! ESTree JSON ingestion.
//!
//! Lowers a `type`-tagged ESTree document (as produced by esprima, acorn or
//! any other ESTree-conforming parser) into a `NodeArena`. Children are
//! lowered before their parent, so the returned root is the last node in
//! the arena.
//!
//! Accepted producer variations:
//! - `TryStatement.handler` (ESTree) or `TryStatement.handlers` (esprima 1.x,
//!   first element used)
//! - `range: [start, end]` or acorn-style `start`/`end` offsets
//! - `Literal.regex` for regular expression literals

use crate::base::{NodeIndex, NodeList};
use crate::node::{Function, LiteralValue, NodeData, NodeKind, PropertyKind, VariableKind};
use crate::node_arena::NodeArena;
use astscope_common::Span;
use astscope_common::limits::{ESTREE_BYTES_PER_NODE, MAX_AST_DEPTH};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Error raised while lowering an ESTree document.
#[derive(Debug)]
pub enum AstError {
    /// The input is not valid JSON.
    Json(serde_json::Error),
    /// A value in node position is not a JSON object.
    NotANode { found: &'static str },
    /// A node object has no string `type` field.
    MissingType,
    /// The `type` tag is outside the supported grammar.
    UnsupportedNodeType(String),
    /// A required field is absent (or `null` where a node is required).
    MissingField {
        node_type: NodeKind,
        field: &'static str,
    },
    /// A field has the wrong JSON shape or an unknown enumerated value.
    InvalidField {
        node_type: NodeKind,
        field: &'static str,
        expected: &'static str,
    },
    /// The document nests deeper than `MAX_AST_DEPTH`.
    NestingTooDeep { limit: u32 },
}

impl std::fmt::Display for AstError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AstError::Json(err) => write!(f, "invalid ESTree JSON: {err}"),
            AstError::NotANode { found } => {
                write!(f, "expected an ESTree node object, found {found}")
            }
            AstError::MissingType => f.write_str("ESTree node has no `type` field"),
            AstError::UnsupportedNodeType(tag) => {
                write!(f, "unsupported ESTree node type `{tag}`")
            }
            AstError::MissingField { node_type, field } => {
                write!(f, "{node_type} is missing required field `{field}`")
            }
            AstError::InvalidField {
                node_type,
                field,
                expected,
            } => write!(f, "{node_type}.{field} must be {expected}"),
            AstError::NestingTooDeep { limit } => {
                write!(f, "ESTree document nests deeper than {limit} levels")
            }
        }
    }
}

impl std::error::Error for AstError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AstError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AstError {
    fn from(err: serde_json::Error) -> Self {
        AstError::Json(err)
    }
}

/// Parse ESTree JSON text into a fresh arena, returning the arena and root.
pub fn from_json_str(text: &str) -> Result<(NodeArena, NodeIndex), AstError> {
    let value: Value = serde_json::from_str(text)?;
    let mut arena = NodeArena::with_capacity(text.len() / ESTREE_BYTES_PER_NODE);
    let root = from_value(&mut arena, &value)?;
    Ok((arena, root))
}

/// Lower an already-parsed ESTree value into `arena`.
pub fn from_value(arena: &mut NodeArena, value: &Value) -> Result<NodeIndex, AstError> {
    let before = arena.len();
    let root = Lowering {
        arena: &mut *arena,
        depth: 0,
    }
    .node(value)?;
    debug!(
        nodes = arena.len() - before,
        root = root.0,
        "Lowered ESTree document"
    );
    Ok(root)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

struct Lowering<'a> {
    arena: &'a mut NodeArena,
    depth: u32,
}

impl Lowering<'_> {
    fn node(&mut self, value: &Value) -> Result<NodeIndex, AstError> {
        let Value::Object(obj) = value else {
            return Err(AstError::NotANode {
                found: json_kind(value),
            });
        };
        let tag = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(AstError::MissingType)?;
        let kind = NodeKind::from_type_tag(tag)
            .ok_or_else(|| AstError::UnsupportedNodeType(tag.to_string()))?;

        if self.depth >= MAX_AST_DEPTH {
            return Err(AstError::NestingTooDeep {
                limit: MAX_AST_DEPTH,
            });
        }
        self.depth += 1;
        let data = self.node_data(kind, obj);
        self.depth -= 1;

        let data = data?;
        trace!(kind = %kind, "Lowered node");
        Ok(self.arena.add_with_span(data, span_of(obj)))
    }

    fn node_data(&mut self, kind: NodeKind, obj: &Map<String, Value>) -> Result<NodeData, AstError> {
        let f = Fields { kind, obj };
        let data = match kind {
            NodeKind::Program => NodeData::Program {
                body: self.list(&f, "body", false)?,
            },
            NodeKind::Identifier => NodeData::Identifier {
                name: f.string("name")?.to_string(),
            },
            NodeKind::Literal => self.literal(&f)?,
            NodeKind::ThisExpression => NodeData::ThisExpression,
            NodeKind::ArrayExpression => NodeData::ArrayExpression {
                elements: self.list(&f, "elements", true)?,
            },
            NodeKind::ObjectExpression => NodeData::ObjectExpression {
                properties: self.list(&f, "properties", false)?,
            },
            NodeKind::Property => NodeData::Property {
                key: self.required(&f, "key")?,
                value: self.required(&f, "value")?,
                kind: match f.opt_string("kind")? {
                    None | Some("init") => PropertyKind::Init,
                    Some("get") => PropertyKind::Get,
                    Some("set") => PropertyKind::Set,
                    Some(_) => return Err(f.invalid("kind", "\"init\", \"get\" or \"set\"")),
                },
            },
            NodeKind::FunctionExpression => NodeData::FunctionExpression(self.function(&f)?),
            NodeKind::FunctionDeclaration => NodeData::FunctionDeclaration(self.function(&f)?),
            NodeKind::SequenceExpression => NodeData::SequenceExpression {
                expressions: self.list(&f, "expressions", false)?,
            },
            NodeKind::UnaryExpression => NodeData::UnaryExpression {
                operator: f.string("operator")?.to_string(),
                prefix: f.opt_bool("prefix")?.unwrap_or(true),
                argument: self.required(&f, "argument")?,
            },
            NodeKind::BinaryExpression => NodeData::BinaryExpression {
                operator: f.string("operator")?.to_string(),
                left: self.required(&f, "left")?,
                right: self.required(&f, "right")?,
            },
            NodeKind::AssignmentExpression => NodeData::AssignmentExpression {
                operator: f.string("operator")?.to_string(),
                left: self.required(&f, "left")?,
                right: self.required(&f, "right")?,
            },
            NodeKind::UpdateExpression => NodeData::UpdateExpression {
                operator: f.string("operator")?.to_string(),
                prefix: f.opt_bool("prefix")?.unwrap_or(false),
                argument: self.required(&f, "argument")?,
            },
            NodeKind::LogicalExpression => NodeData::LogicalExpression {
                operator: f.string("operator")?.to_string(),
                left: self.required(&f, "left")?,
                right: self.required(&f, "right")?,
            },
            NodeKind::ConditionalExpression => NodeData::ConditionalExpression {
                test: self.required(&f, "test")?,
                consequent: self.required(&f, "consequent")?,
                alternate: self.required(&f, "alternate")?,
            },
            NodeKind::CallExpression => NodeData::CallExpression {
                callee: self.required(&f, "callee")?,
                arguments: self.list(&f, "arguments", false)?,
            },
            NodeKind::NewExpression => NodeData::NewExpression {
                callee: self.required(&f, "callee")?,
                arguments: self.opt_list(&f, "arguments")?,
            },
            NodeKind::MemberExpression => NodeData::MemberExpression {
                object: self.required(&f, "object")?,
                property: self.required(&f, "property")?,
                computed: f.opt_bool("computed")?.unwrap_or(false),
            },
            NodeKind::ExpressionStatement => NodeData::ExpressionStatement {
                expression: self.required(&f, "expression")?,
            },
            NodeKind::BlockStatement => NodeData::BlockStatement {
                body: self.list(&f, "body", false)?,
            },
            NodeKind::EmptyStatement => NodeData::EmptyStatement,
            NodeKind::DebuggerStatement => NodeData::DebuggerStatement,
            NodeKind::WithStatement => NodeData::WithStatement {
                object: self.required(&f, "object")?,
                body: self.required(&f, "body")?,
            },
            NodeKind::ReturnStatement => NodeData::ReturnStatement {
                argument: self.optional(&f, "argument")?,
            },
            NodeKind::LabeledStatement => NodeData::LabeledStatement {
                label: self.required(&f, "label")?,
                body: self.required(&f, "body")?,
            },
            NodeKind::BreakStatement => NodeData::BreakStatement {
                label: self.optional(&f, "label")?,
            },
            NodeKind::ContinueStatement => NodeData::ContinueStatement {
                label: self.optional(&f, "label")?,
            },
            NodeKind::IfStatement => NodeData::IfStatement {
                test: self.required(&f, "test")?,
                consequent: self.required(&f, "consequent")?,
                alternate: self.optional(&f, "alternate")?,
            },
            NodeKind::SwitchStatement => NodeData::SwitchStatement {
                discriminant: self.required(&f, "discriminant")?,
                cases: self.opt_list(&f, "cases")?,
            },
            NodeKind::SwitchCase => NodeData::SwitchCase {
                test: self.optional(&f, "test")?,
                consequent: self.list(&f, "consequent", false)?,
            },
            NodeKind::ThrowStatement => NodeData::ThrowStatement {
                argument: self.required(&f, "argument")?,
            },
            NodeKind::TryStatement => {
                let block = self.required(&f, "block")?;
                let handler = match obj.get("handler") {
                    Some(Value::Null) | None => match obj.get("handlers") {
                        Some(Value::Array(handlers)) => match handlers.first() {
                            Some(first) => self.node(first)?,
                            None => NodeIndex::NONE,
                        },
                        Some(Value::Null) | None => NodeIndex::NONE,
                        Some(_) => return Err(f.invalid("handlers", "an array")),
                    },
                    Some(handler) => self.node(handler)?,
                };
                NodeData::TryStatement {
                    block,
                    handler,
                    finalizer: self.optional(&f, "finalizer")?,
                }
            }
            NodeKind::CatchClause => NodeData::CatchClause {
                param: self.required(&f, "param")?,
                body: self.required(&f, "body")?,
            },
            NodeKind::WhileStatement => NodeData::WhileStatement {
                test: self.required(&f, "test")?,
                body: self.required(&f, "body")?,
            },
            NodeKind::DoWhileStatement => NodeData::DoWhileStatement {
                body: self.required(&f, "body")?,
                test: self.required(&f, "test")?,
            },
            NodeKind::ForStatement => NodeData::ForStatement {
                init: self.optional(&f, "init")?,
                test: self.optional(&f, "test")?,
                update: self.optional(&f, "update")?,
                body: self.required(&f, "body")?,
            },
            NodeKind::ForInStatement => NodeData::ForInStatement {
                left: self.required(&f, "left")?,
                right: self.required(&f, "right")?,
                body: self.required(&f, "body")?,
            },
            NodeKind::VariableDeclaration => NodeData::VariableDeclaration {
                declarations: self.list(&f, "declarations", false)?,
                kind: match f.opt_string("kind")? {
                    None | Some("var") => VariableKind::Var,
                    Some("let") => VariableKind::Let,
                    Some("const") => VariableKind::Const,
                    Some(_) => return Err(f.invalid("kind", "\"var\", \"let\" or \"const\"")),
                },
            },
            NodeKind::VariableDeclarator => NodeData::VariableDeclarator {
                id: self.required(&f, "id")?,
                init: self.optional(&f, "init")?,
            },
            NodeKind::DirectiveStatement => NodeData::DirectiveStatement {
                directive: f.string("directive")?.to_string(),
            },
        };
        Ok(data)
    }

    fn function(&mut self, f: &Fields<'_>) -> Result<Function, AstError> {
        Ok(Function {
            id: self.optional(f, "id")?,
            params: self.list(f, "params", false)?,
            body: self.required(f, "body")?,
        })
    }

    fn literal(&mut self, f: &Fields<'_>) -> Result<NodeData, AstError> {
        let raw = f.opt_string("raw")?.map(str::to_string);

        if let Some(regex) = f.obj.get("regex").filter(|v| !v.is_null()) {
            let pattern = regex.get("pattern").and_then(Value::as_str);
            let flags = regex.get("flags").and_then(Value::as_str);
            let (Some(pattern), Some(flags)) = (pattern, flags) else {
                return Err(f.invalid("regex", "an object with `pattern` and `flags` strings"));
            };
            return Ok(NodeData::Literal {
                value: LiteralValue::RegExp {
                    pattern: pattern.to_string(),
                    flags: flags.to_string(),
                },
                raw,
            });
        }

        let value = match f.obj.get("value") {
            None | Some(Value::Null) => LiteralValue::Null,
            Some(Value::Bool(b)) => LiteralValue::Boolean(*b),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(n) => LiteralValue::Number(n),
                None => return Err(f.invalid("value", "a finite number")),
            },
            Some(Value::String(s)) => LiteralValue::String(s.clone()),
            Some(_) => return Err(f.invalid("value", "a primitive")),
        };
        Ok(NodeData::Literal { value, raw })
    }

    fn required(&mut self, f: &Fields<'_>, field: &'static str) -> Result<NodeIndex, AstError> {
        match f.obj.get(field) {
            None | Some(Value::Null) => Err(f.missing(field)),
            Some(value) => self.node(value),
        }
    }

    fn optional(&mut self, f: &Fields<'_>, field: &'static str) -> Result<NodeIndex, AstError> {
        match f.obj.get(field) {
            None | Some(Value::Null) => Ok(NodeIndex::NONE),
            Some(value) => self.node(value),
        }
    }

    /// Lower a required array field. `holes` permits `null` entries.
    fn list(
        &mut self,
        f: &Fields<'_>,
        field: &'static str,
        holes: bool,
    ) -> Result<NodeList, AstError> {
        let Some(value) = f.obj.get(field) else {
            return Err(f.missing(field));
        };
        let Value::Array(items) = value else {
            return Err(f.invalid(field, "an array"));
        };

        let mut list = NodeList::with_capacity(items.len());
        for item in items {
            let idx = match item {
                Value::Null if holes => NodeIndex::NONE,
                item => self.node(item)?,
            };
            list.push(idx);
        }
        Ok(list)
    }

    /// Array field that producers may omit (`new Foo` without parentheses).
    fn opt_list(&mut self, f: &Fields<'_>, field: &'static str) -> Result<NodeList, AstError> {
        match f.obj.get(field) {
            None | Some(Value::Null) => Ok(NodeList::new()),
            Some(_) => self.list(f, field, false),
        }
    }
}

/// Field accessors bound to the node being lowered, for error reporting.
struct Fields<'a> {
    kind: NodeKind,
    obj: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn missing(&self, field: &'static str) -> AstError {
        AstError::MissingField {
            node_type: self.kind,
            field,
        }
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> AstError {
        AstError::InvalidField {
            node_type: self.kind,
            field,
            expected,
        }
    }

    fn string(&self, field: &'static str) -> Result<&'a str, AstError> {
        self.opt_string(field)?.ok_or_else(|| self.missing(field))
    }

    fn opt_string(&self, field: &'static str) -> Result<Option<&'a str>, AstError> {
        match self.obj.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid(field, "a string")),
        }
    }

    fn opt_bool(&self, field: &'static str) -> Result<Option<bool>, AstError> {
        match self.obj.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.invalid(field, "a boolean")),
        }
    }
}

fn span_of(obj: &Map<String, Value>) -> Span {
    let offset = |v: &Value| v.as_u64().and_then(|n| u32::try_from(n).ok());

    if let Some(Value::Array(range)) = obj.get("range")
        && let [start, end] = range.as_slice()
        && let (Some(start), Some(end)) = (offset(start), offset(end))
    {
        return Span::new(start, end);
    }
    match (obj.get("start").and_then(offset), obj.get("end").and_then(offset)) {
        (Some(start), Some(end)) => Span::new(start, end),
        _ => Span::DUMMY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lowers_variable_declaration() {
        let doc = json!({
            "type": "Program",
            "body": [{
                "type": "VariableDeclaration",
                "kind": "var",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": { "type": "Identifier", "name": "foo", "range": [4, 7] },
                    "init": { "type": "Literal", "value": 1, "raw": "1" }
                }]
            }],
            "range": [0, 12]
        });
        let mut arena = NodeArena::new();
        let root = from_value(&mut arena, &doc).unwrap();

        assert_eq!(arena.kind(root), Some(NodeKind::Program));
        assert_eq!(root.0 as usize, arena.len() - 1);
        assert_eq!(arena.span(root), Span::new(0, 12));

        let foo = arena.find_identifier(root, "foo").unwrap();
        assert_eq!(arena.span(foo), Span::new(4, 7));

        let literal = arena.find_kind(root, NodeKind::Literal).unwrap();
        assert_eq!(
            arena.data(literal),
            Some(&NodeData::Literal {
                value: LiteralValue::Number(1.0),
                raw: Some("1".to_string()),
            })
        );
    }

    #[test]
    fn test_accepts_legacy_try_handlers_array() {
        let text = r#"{
            "type": "TryStatement",
            "block": { "type": "BlockStatement", "body": [] },
            "guardedHandlers": [],
            "handlers": [{
                "type": "CatchClause",
                "param": { "type": "Identifier", "name": "e" },
                "body": { "type": "BlockStatement", "body": [] }
            }],
            "finalizer": null
        }"#;
        let (arena, root) = from_json_str(text).unwrap();
        let Some(NodeData::TryStatement {
            handler, finalizer, ..
        }) = arena.data(root)
        else {
            panic!("expected TryStatement");
        };
        assert_eq!(arena.kind(*handler), Some(NodeKind::CatchClause));
        assert!(finalizer.is_none());
    }

    #[test]
    fn test_array_holes_and_regex_literal() {
        let doc = json!({
            "type": "ArrayExpression",
            "elements": [
                null,
                { "type": "Literal", "value": {}, "raw": "/a+/g", "regex": { "pattern": "a+", "flags": "g" } }
            ]
        });
        let mut arena = NodeArena::new();
        let root = from_value(&mut arena, &doc).unwrap();
        let Some(NodeData::ArrayExpression { elements }) = arena.data(root) else {
            panic!("expected ArrayExpression");
        };
        assert_eq!(elements.len(), 2);
        assert!(elements.nodes[0].is_none());
        assert!(matches!(
            arena.data(elements.nodes[1]),
            Some(NodeData::Literal {
                value: LiteralValue::RegExp { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_acorn_offsets() {
        let doc = json!({ "type": "ThisExpression", "start": 3, "end": 7 });
        let mut arena = NodeArena::new();
        let root = from_value(&mut arena, &doc).unwrap();
        assert_eq!(arena.span(root), Span::new(3, 7));
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let err = from_json_str(r#"{ "type": "ArrowFunctionExpression" }"#).unwrap_err();
        assert!(matches!(err, AstError::UnsupportedNodeType(ref t) if t == "ArrowFunctionExpression"));
        assert_eq!(
            err.to_string(),
            "unsupported ESTree node type `ArrowFunctionExpression`"
        );
    }

    #[test]
    fn test_rejects_missing_field() {
        let err = from_json_str(r#"{ "type": "ExpressionStatement" }"#).unwrap_err();
        assert!(matches!(
            err,
            AstError::MissingField {
                node_type: NodeKind::ExpressionStatement,
                field: "expression"
            }
        ));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            from_json_str("[1, 2]").unwrap_err(),
            AstError::NotANode { found: "an array" }
        ));
        assert!(matches!(
            from_json_str(r#"{ "name": "x" }"#).unwrap_err(),
            AstError::MissingType
        ));
        assert!(matches!(
            from_json_str(r#"{ "type": "VariableDeclaration", "kind": "auto", "declarations": [] }"#)
                .unwrap_err(),
            AstError::InvalidField {
                field: "kind",
                ..
            }
        ));
        assert!(matches!(
            from_json_str("{ not json").unwrap_err(),
            AstError::Json(_)
        ));
    }

    #[test]
    fn test_rejects_excessive_nesting() {
        let mut doc = json!({ "type": "Identifier", "name": "x" });
        for _ in 0..=MAX_AST_DEPTH {
            doc = json!({ "type": "UnaryExpression", "operator": "!", "prefix": true, "argument": doc });
        }
        let mut arena = NodeArena::new();
        let err = from_value(&mut arena, &doc).unwrap_err();
        assert!(matches!(err, AstError::NestingTooDeep { limit: MAX_AST_DEPTH }));
    }

    #[test]
    fn test_accepts_nesting_at_the_limit() {
        let mut doc = json!({ "type": "Identifier", "name": "x" });
        for _ in 1..MAX_AST_DEPTH {
            doc = json!({ "type": "UnaryExpression", "operator": "!", "prefix": true, "argument": doc });
        }
        let mut arena = NodeArena::new();
        let root = from_value(&mut arena, &doc).unwrap();
        assert_eq!(arena.len(), MAX_AST_DEPTH as usize);
        assert_eq!(arena.kind(root), Some(NodeKind::UnaryExpression));
    }

    #[test]
    fn test_every_kind_has_a_type_tag() {
        for &kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_type_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::from_type_tag("ClassDeclaration"), None);
    }
}
